//! Splice scoring rule engine
//!
//! Converts raw splice-strength scores into standardized z-scores, then
//! applies the published donor/acceptor decision tables to produce a prior
//! probability of pathogenicity and a qualitative ENIGMA class. The raw
//! scores come from an external scorer (MaxEntScan in production) behind
//! the [`SpliceScorer`] trait.

use serde::{Deserialize, Serialize};

use crate::error::PriorsError;
use crate::seqs::RefAltSequences;

/// Which splice-site motif a sequence is scored as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpliceSiteKind {
    /// 9 nt: last 3 exonic + first 6 intronic bases
    Donor,
    /// 23 nt: 20 intronic bases + first 3 exonic bases
    Acceptor,
}

/// External splice-strength scorer. One call per sequence; the mode must
/// match the region the sequence was cut from.
pub trait SpliceScorer {
    fn score(&self, sequence: &str, site: SpliceSiteKind) -> Result<f64, PriorsError>;
}

impl<C: SpliceScorer + ?Sized> SpliceScorer for &C {
    fn score(&self, sequence: &str, site: SpliceSiteKind) -> Result<f64, PriorsError> {
        (**self).score(sequence, site)
    }
}

impl SpliceScorer for Box<dyn SpliceScorer + Send + Sync> {
    fn score(&self, sequence: &str, site: SpliceSiteKind) -> Result<f64, PriorsError> {
        (**self).score(sequence, site)
    }
}

/// Population mean and standard deviation for one site kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanStd {
    pub mean: f64,
    pub std: f64,
}

/// Precomputed standardization constants, separate for donors and
/// acceptors. Explicit configuration so tests can substitute synthetic
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScoreParams {
    pub donors: MeanStd,
    pub acceptors: MeanStd,
}

impl ZScoreParams {
    /// Constants computed over all MaxEntScan-scored reference splice
    /// sites in the two transcripts
    pub fn maxentscan_brca() -> Self {
        Self {
            donors: MeanStd {
                mean: 7.938_090_909_090_907_3,
                std: 2.328_995_685_016_708_2,
            },
            acceptors: MeanStd {
                mean: 7.984_909_090_909_089,
                std: 2.433_662_315_207_845_2,
            },
        }
    }

    /// Standardize a raw score for the given site kind
    pub fn z_score(&self, raw: f64, site: SpliceSiteKind) -> f64 {
        let MeanStd { mean, std } = match site {
            SpliceSiteKind::Donor => self.donors,
            SpliceSiteKind::Acceptor => self.acceptors,
        };
        (raw - mean) / std
    }
}

/// Raw and standardized score for one sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorePair {
    pub raw: f64,
    pub z: f64,
}

/// Five-level qualitative pathogenicity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EnigmaClass {
    Class1,
    Class2,
    Class3,
    Class4,
    Class5,
}

impl EnigmaClass {
    /// Map a prior probability onto its class.
    ///
    /// The bands are half-open and cover `[0, 1]` exactly: `>0.99` is
    /// class 5, `[0.95, 0.99]` class 4, `[0.05, 0.95)` class 3,
    /// `[0.001, 0.05)` class 2, `<0.001` class 1.
    ///
    /// ```
    /// use splice_priors::scoring::EnigmaClass;
    ///
    /// assert_eq!(EnigmaClass::from_probability(0.995), EnigmaClass::Class5);
    /// assert_eq!(EnigmaClass::from_probability(0.99), EnigmaClass::Class4);
    /// assert_eq!(EnigmaClass::from_probability(0.95), EnigmaClass::Class4);
    /// assert_eq!(EnigmaClass::from_probability(0.05), EnigmaClass::Class3);
    /// assert_eq!(EnigmaClass::from_probability(0.04), EnigmaClass::Class2);
    /// assert_eq!(EnigmaClass::from_probability(0.001), EnigmaClass::Class2);
    /// assert_eq!(EnigmaClass::from_probability(0.0005), EnigmaClass::Class1);
    /// ```
    pub fn from_probability(prob: f64) -> EnigmaClass {
        if prob > 0.99 {
            EnigmaClass::Class5
        } else if prob >= 0.95 {
            EnigmaClass::Class4
        } else if prob < 0.001 {
            EnigmaClass::Class1
        } else if prob < 0.05 {
            EnigmaClass::Class2
        } else {
            EnigmaClass::Class3
        }
    }
}

impl std::fmt::Display for EnigmaClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EnigmaClass::Class1 => "class_1",
            EnigmaClass::Class2 => "class_2",
            EnigmaClass::Class3 => "class_3",
            EnigmaClass::Class4 => "class_4",
            EnigmaClass::Class5 => "class_5",
        };
        f.write_str(label)
    }
}

/// Prior probability and class for one scored splice-site variant,
/// together with the scores that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorResult {
    pub probability: f64,
    pub class: EnigmaClass,
    pub site: SpliceSiteKind,
    pub ref_scores: ScorePair,
    pub alt_scores: ScorePair,
}

/// Donor decision table. Thresholds are published clinical criteria;
/// evaluate in order.
pub fn donor_prior_probability(ref_scores: ScorePair, alt_scores: ScorePair) -> f64 {
    if alt_scores.raw >= ref_scores.raw {
        0.04
    } else if ref_scores.z < -1.5 && (ref_scores.z - alt_scores.z) > 0.5 {
        0.97
    } else if alt_scores.z > 0.0 {
        0.04
    } else {
        // altZ in [-2, 0] or below both score 0.34; the split is kept in
        // the published criteria but collapses here
        0.34
    }
}

/// Acceptor decision table; same structure as the donor table with
/// different thresholds.
pub fn acceptor_prior_probability(ref_scores: ScorePair, alt_scores: ScorePair) -> f64 {
    if alt_scores.raw >= ref_scores.raw {
        0.04
    } else if ref_scores.z < -1.0 && (ref_scores.z - alt_scores.z) > 0.5 {
        0.97
    } else if alt_scores.z > 0.5 {
        0.04
    } else {
        0.34
    }
}

/// Score a reconstructed splice-region pair and apply the decision table
/// for the site kind.
pub fn score_splice_site<C: SpliceScorer>(
    scorer: &C,
    params: &ZScoreParams,
    site: SpliceSiteKind,
    seqs: &RefAltSequences,
) -> Result<PriorResult, PriorsError> {
    let ref_raw = scorer.score(&seqs.ref_seq, site)?;
    let alt_raw = scorer.score(&seqs.alt_seq, site)?;
    let ref_scores = ScorePair {
        raw: ref_raw,
        z: params.z_score(ref_raw, site),
    };
    let alt_scores = ScorePair {
        raw: alt_raw,
        z: params.z_score(alt_raw, site),
    };
    let probability = match site {
        SpliceSiteKind::Donor => donor_prior_probability(ref_scores, alt_scores),
        SpliceSiteKind::Acceptor => acceptor_prior_probability(ref_scores, alt_scores),
    };
    Ok(PriorResult {
        probability,
        class: EnigmaClass::from_probability(probability),
        site,
        ref_scores,
        alt_scores,
    })
}
