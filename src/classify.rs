//! Location classifier and allele-shape classification
//!
//! [`classify_location`] assigns exactly one [`LocationCategory`] per
//! variant using a fixed precedence order: outside-transcript first, then
//! for exonic variants CI-domain splice sites over plain splice sites over
//! domain-only over grey zone over UTR; intronic variants only see splice,
//! UTR, and intron. Donor/acceptor checks always beat domain-only and
//! grey-zone checks, and grey-zone categories apply to exonic variants
//! only.

use crate::reference::domains::{BoundaryProfile, ClinicalDomains, GreyZones};
use crate::reference::transcript::{Strand, TranscriptModel};
use crate::regions::{
    acceptor_boundaries, donor_boundaries, exon_boundaries, in_any_region, position_in_exon,
    within_boundaries,
};

/// Bases acceptable in an allele for shape classification.
///
/// Includes the ambiguity codes N, R, Y on top of the four canonical
/// bases. The consequence annotator and the splice scorer accept
/// canonical bases only.
const ACCEPTABLE_BASES: [char; 7] = ['A', 'C', 'T', 'G', 'N', 'R', 'Y'];

/// Whether a sequence is non-empty and drawn entirely from the accepted
/// IUPAC subset.
///
/// ```
/// use splice_priors::classify::is_acceptable_sequence;
///
/// assert!(is_acceptable_sequence("ACGT"));
/// assert!(is_acceptable_sequence("NRY"));
/// assert!(!is_acceptable_sequence(""));
/// assert!(!is_acceptable_sequence("AXG"));
/// ```
pub fn is_acceptable_sequence(seq: &str) -> bool {
    !seq.is_empty() && seq.chars().all(|base| ACCEPTABLE_BASES.contains(&base))
}

/// Allele-shape classification, derived purely from allele lengths and
/// base-alphabet validity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    Substitution,
    Insertion,
    Deletion,
    Delins,
    /// Unclassifiable alleles; the scoring engine never touches these
    Other,
}

impl std::fmt::Display for VariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            VariantKind::Substitution => "substitution",
            VariantKind::Insertion => "insertion",
            VariantKind::Deletion => "deletion",
            VariantKind::Delins => "delins",
            VariantKind::Other => "other",
        };
        f.write_str(label)
    }
}

/// Classify a variant's shape from its reference and alternate alleles.
///
/// ```
/// use splice_priors::classify::{classify_alleles, VariantKind};
///
/// assert_eq!(classify_alleles("A", "T"), VariantKind::Substitution);
/// assert_eq!(classify_alleles("A", "AAA"), VariantKind::Insertion);
/// assert_eq!(classify_alleles("AGT", "A"), VariantKind::Deletion);
/// assert_eq!(classify_alleles("AG", "GT"), VariantKind::Delins);
/// assert_eq!(classify_alleles("AXG", "A"), VariantKind::Other);
/// ```
pub fn classify_alleles(ref_allele: &str, alt_allele: &str) -> VariantKind {
    if !is_acceptable_sequence(ref_allele) || !is_acceptable_sequence(alt_allele) {
        return VariantKind::Other;
    }
    match ref_allele.len().cmp(&alt_allele.len()) {
        std::cmp::Ordering::Equal => {
            if ref_allele.len() == 1 {
                VariantKind::Substitution
            } else {
                VariantKind::Delins
            }
        }
        std::cmp::Ordering::Greater => {
            if alt_allele.len() == 1 {
                VariantKind::Deletion
            } else {
                VariantKind::Delins
            }
        }
        std::cmp::Ordering::Less => {
            if ref_allele.len() == 1 {
                VariantKind::Insertion
            } else {
                VariantKind::Delins
            }
        }
    }
}

/// Qualitative location category; exactly one per variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationCategory {
    OutsideTranscriptBoundaries,
    CiSpliceDonor,
    CiSpliceAcceptor,
    CiDomain,
    SpliceDonor,
    SpliceAcceptor,
    GreyZone,
    AfterGreyZone,
    Utr,
    Exon,
    Intron,
}

impl LocationCategory {
    /// Whether this category sits in a splice-donor region (plain or
    /// clinically important)
    pub fn is_splice_donor(&self) -> bool {
        matches!(
            self,
            LocationCategory::SpliceDonor | LocationCategory::CiSpliceDonor
        )
    }

    /// Whether this category sits in a splice-acceptor region
    pub fn is_splice_acceptor(&self) -> bool {
        matches!(
            self,
            LocationCategory::SpliceAcceptor | LocationCategory::CiSpliceAcceptor
        )
    }
}

impl std::fmt::Display for LocationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LocationCategory::OutsideTranscriptBoundaries => "outside_transcript_boundaries",
            LocationCategory::CiSpliceDonor => "CI_splice_donor",
            LocationCategory::CiSpliceAcceptor => "CI_splice_acceptor",
            LocationCategory::CiDomain => "CI_domain",
            LocationCategory::SpliceDonor => "splice_donor",
            LocationCategory::SpliceAcceptor => "splice_acceptor",
            LocationCategory::GreyZone => "grey_zone",
            LocationCategory::AfterGreyZone => "after_grey_zone",
            LocationCategory::Utr => "UTR",
            LocationCategory::Exon => "exon",
            LocationCategory::Intron => "intron",
        };
        f.write_str(label)
    }
}

/// Whether a position lies outside the transcribed region, strand-aware
fn outside_transcript(pos: u64, tx: &TranscriptModel) -> bool {
    match tx.strand {
        Strand::Plus => pos < tx.tx_start || pos > tx.tx_end,
        Strand::Minus => pos > tx.tx_end || pos < tx.tx_start,
    }
}

/// Whether a position inside the transcript lies in the 5' or 3' UTR
fn in_utr(pos: u64, tx: &TranscriptModel) -> bool {
    match tx.strand {
        Strand::Plus => pos < tx.cds_start || pos > tx.cds_end,
        Strand::Minus => pos > tx.cds_end || pos < tx.cds_start,
    }
}

/// Assign the location category for a variant position.
///
/// `profile` selects which clinically-important-domain extents apply.
/// The precedence order is fixed; see the module docs.
pub fn classify_location(
    pos: u64,
    tx: &TranscriptModel,
    domains: &ClinicalDomains,
    grey_zones: &GreyZones,
    profile: BoundaryProfile,
) -> LocationCategory {
    if outside_transcript(pos, tx) {
        return LocationCategory::OutsideTranscriptBoundaries;
    }

    let exons = exon_boundaries(tx);
    let in_exon = position_in_exon(&exons, tx.strand, pos);
    let in_donor = in_any_region(&donor_boundaries(tx), tx.strand, pos);
    let in_acceptor = in_any_region(&acceptor_boundaries(tx), tx.strand, pos);

    if in_exon {
        let in_ci_domain = domains
            .domains(tx.gene, profile)
            .iter()
            .any(|d| within_boundaries(tx.strand, pos, d.start, d.end));
        if in_ci_domain && in_donor {
            return LocationCategory::CiSpliceDonor;
        }
        if in_ci_domain && in_acceptor {
            return LocationCategory::CiSpliceAcceptor;
        }
        if in_ci_domain {
            return LocationCategory::CiDomain;
        }
        if in_donor {
            return LocationCategory::SpliceDonor;
        }
        if in_acceptor {
            return LocationCategory::SpliceAcceptor;
        }
        if let Some(zone) = grey_zones.for_gene(tx.gene) {
            if within_boundaries(tx.strand, pos, zone.start, zone.end) {
                return LocationCategory::GreyZone;
            }
            // Strictly past the grey zone, still coding: reachable for
            // exonic variants only
            if !in_utr(pos, tx) && pos > zone.end {
                return LocationCategory::AfterGreyZone;
            }
        }
        if in_utr(pos, tx) {
            return LocationCategory::Utr;
        }
        LocationCategory::Exon
    } else {
        if in_donor {
            return LocationCategory::SpliceDonor;
        }
        if in_acceptor {
            return LocationCategory::SpliceAcceptor;
        }
        if in_utr(pos, tx) {
            return LocationCategory::Utr;
        }
        LocationCategory::Intron
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::transcript::TranscriptModel;
    use crate::reference::ReferenceData;

    fn canonical() -> (ReferenceData, TranscriptModel, TranscriptModel) {
        let reference = ReferenceData::canonical();
        let brca1 = reference
            .transcripts
            .by_accession("NM_007294.3")
            .unwrap()
            .clone();
        let brca2 = reference
            .transcripts
            .by_accession("NM_000059.3")
            .unwrap()
            .clone();
        (reference, brca1, brca2)
    }

    fn classify(pos: u64, tx: &TranscriptModel, reference: &ReferenceData) -> LocationCategory {
        classify_location(
            pos,
            tx,
            &reference.domains,
            &reference.grey_zones,
            BoundaryProfile::Enigma,
        )
    }

    #[test]
    fn test_outside_transcript_takes_precedence() {
        let (reference, brca1, brca2) = canonical();
        // One base past the plus-strand transcript end
        assert_eq!(
            classify(32_399_673, &brca2, &reference),
            LocationCategory::OutsideTranscriptBoundaries
        );
        assert_eq!(
            classify(32_315_478, &brca2, &reference),
            LocationCategory::OutsideTranscriptBoundaries
        );
        assert_eq!(
            classify(43_125_484, &brca1, &reference),
            LocationCategory::OutsideTranscriptBoundaries
        );
        assert_eq!(
            classify(43_044_293, &brca1, &reference),
            LocationCategory::OutsideTranscriptBoundaries
        );
    }

    #[test]
    fn test_ci_splice_donor_beats_domain_and_donor() {
        let (reference, _, brca2) = canonical();
        // Exon 15 ends at 32356609, inside the enigma dnb domain; the
        // exonic donor bases 32356607-32356609 are both in-domain and
        // in-donor
        assert_eq!(
            classify(32_356_608, &brca2, &reference),
            LocationCategory::CiSpliceDonor
        );
        // Intronic donor bases fall out of the domain check entirely
        assert_eq!(
            classify(32_356_610, &brca2, &reference),
            LocationCategory::SpliceDonor
        );
        // Mid-exon domain position
        assert_eq!(
            classify(32_356_500, &brca2, &reference),
            LocationCategory::CiDomain
        );
    }

    #[test]
    fn test_ci_splice_acceptor_minus_strand() {
        let (reference, brca1, _) = canonical();
        // BRCA1 exon 7 (43104261..43104121) starts where the enigma ring
        // domain (43124096..43104260) ends; its acceptor region
        // (43104281..43104259) straddles the domain boundary
        assert_eq!(
            classify(43_104_260, &brca1, &reference),
            LocationCategory::CiSpliceAcceptor
        );
        // Exonic acceptor base just past the domain stays a plain acceptor
        assert_eq!(
            classify(43_104_259, &brca1, &reference),
            LocationCategory::SpliceAcceptor
        );
    }

    #[test]
    fn test_grey_zone_and_after() {
        let (reference, _, brca2) = canonical();
        assert_eq!(
            classify(32_398_460, &brca2, &reference),
            LocationCategory::GreyZone
        );
        // Exonic, past the grey zone, before the stop codon
        assert_eq!(
            classify(32_398_500, &brca2, &reference),
            LocationCategory::AfterGreyZone
        );
        // Past the coding end: UTR wins over after-grey-zone
        assert_eq!(
            classify(32_399_000, &brca2, &reference),
            LocationCategory::Utr
        );
    }

    #[test]
    fn test_utr_and_intron() {
        let (reference, brca1, brca2) = canonical();
        // Inside transcript, before coding start, not exonic (genePred
        // exon start base), upstream of any acceptor region
        assert_eq!(
            classify(32_315_479, &brca2, &reference),
            LocationCategory::Utr
        );
        // Exonic 5' UTR base
        assert_eq!(
            classify(32_315_500, &brca2, &reference),
            LocationCategory::Utr
        );
        // Deep intron: between BRCA2 exons 2 and 3, outside all windows
        assert_eq!(
            classify(32_317_000, &brca2, &reference),
            LocationCategory::Intron
        );
        // Deep intron on the minus strand, between exons 2 and 3
        assert_eq!(
            classify(43_120_000, &brca1, &reference),
            LocationCategory::Intron
        );
    }

    #[test]
    fn test_plain_exon() {
        let (reference, brca1, brca2) = canonical();
        // BRCA2 exon 10 coding base outside every special region
        assert_eq!(
            classify(32_332_800, &brca2, &reference),
            LocationCategory::Exon
        );
        // BRCA1 exon 11 coding base (enigma profile has no domain there)
        assert_eq!(
            classify(43_093_000, &brca1, &reference),
            LocationCategory::Exon
        );
    }

    #[test]
    fn test_intronic_splice_regions() {
        let (reference, brca1, brca2) = canonical();
        // First intronic donor base after BRCA2 exon 2 (exon end 32316527)
        assert_eq!(
            classify(32_316_528, &brca2, &reference),
            LocationCategory::SpliceDonor
        );
        // Intronic acceptor base before BRCA2 exon 3 (genePred start 32319076)
        assert_eq!(
            classify(32_319_060, &brca2, &reference),
            LocationCategory::SpliceAcceptor
        );
        // Minus strand: first intronic donor base after BRCA1 exon 2
        // (exon 2 runs 43124115..43124016, donor region 43124019..43124011)
        assert_eq!(
            classify(43_124_015, &brca1, &reference),
            LocationCategory::SpliceDonor
        );
    }

    #[test]
    fn test_priors_profile_differs() {
        let (reference, _, brca2) = canonical();
        // BRCA2 initiation codon is a priors-only domain
        let loc_priors = classify_location(
            32_316_462,
            &brca2,
            &reference.domains,
            &reference.grey_zones,
            BoundaryProfile::Priors,
        );
        assert_eq!(loc_priors, LocationCategory::CiDomain);
        let loc_enigma = classify_location(
            32_316_462,
            &brca2,
            &reference.domains,
            &reference.grey_zones,
            BoundaryProfile::Enigma,
        );
        assert_eq!(loc_enigma, LocationCategory::Exon);
    }

    #[test]
    fn test_variant_kind_table() {
        assert_eq!(classify_alleles("A", "G"), VariantKind::Substitution);
        assert_eq!(classify_alleles("AG", "GT"), VariantKind::Delins);
        assert_eq!(classify_alleles("AGTA", "AG"), VariantKind::Delins);
        assert_eq!(classify_alleles("AG", "AGTA"), VariantKind::Delins);
        assert_eq!(classify_alleles("AGT", "A"), VariantKind::Deletion);
        assert_eq!(classify_alleles("A", "AAA"), VariantKind::Insertion);
        assert_eq!(classify_alleles("", "A"), VariantKind::Other);
        assert_eq!(classify_alleles("A", "Z"), VariantKind::Other);
        // Ambiguity codes are acceptable for shape classification
        assert_eq!(classify_alleles("N", "R"), VariantKind::Substitution);
    }
}
