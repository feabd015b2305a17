//! Per-variant output record
//!
//! The fixed 17-column row shape the curation database ingests. Fields
//! with no applicable value carry a single dash; the de-novo score columns
//! are reserved and always carry the sentinel here.

use crate::classify::{LocationCategory, VariantKind};
use crate::scoring::{PriorResult, SpliceSiteKind};
use crate::variant::Variant;

/// Output column headers, in order
pub const OUTPUT_HEADERS: [&str; 17] = [
    "HGVS_cDNA",
    "Pos",
    "varType",
    "varLoc",
    "priorProb",
    "enigmaClass",
    "donorVarMES",
    "donorVarZ",
    "donorRefMES",
    "donorRefZ",
    "accVarMES",
    "accVarZ",
    "accRefMES",
    "accRefZ",
    "deNovoMES",
    "deNovoZ",
    "spliceSite",
];

/// Sentinel for fields with no applicable value
pub const NOT_APPLICABLE: &str = "-";

/// The assembled result for one variant
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub hgvs_cdna: String,
    pub position: u64,
    pub kind: VariantKind,
    /// None when classification itself failed (e.g. unknown transcript)
    pub location: Option<LocationCategory>,
    pub prior: Option<PriorResult>,
}

impl VariantRecord {
    /// Compose the final record from the classifier and scorer outputs.
    /// Pure transformation: safe to run per variant on worker threads.
    pub fn assemble(
        variant: &Variant,
        kind: VariantKind,
        location: Option<LocationCategory>,
        prior: Option<PriorResult>,
    ) -> Self {
        Self {
            hgvs_cdna: variant.hgvs_cdna.clone(),
            position: variant.position,
            kind,
            location,
            prior,
        }
    }

    /// A record for a variant whose processing failed entirely; the
    /// allele shape falls back to `other`
    pub fn unscored(variant: &Variant) -> Self {
        Self {
            hgvs_cdna: variant.hgvs_cdna.clone(),
            position: variant.position,
            kind: VariantKind::Other,
            location: None,
            prior: None,
        }
    }

    /// 1 iff a prior probability was computed for this variant
    pub fn splice_site_flag(&self) -> u8 {
        u8::from(self.prior.is_some())
    }

    /// Render the 17 output columns in header order
    pub fn to_row(&self) -> Vec<String> {
        let dash = || NOT_APPLICABLE.to_string();
        let mut row = vec![
            self.hgvs_cdna.clone(),
            self.position.to_string(),
            self.kind.to_string(),
            self.location.map_or_else(dash, |loc| loc.to_string()),
        ];
        match &self.prior {
            Some(prior) => {
                row.push(prior.probability.to_string());
                row.push(prior.class.to_string());
                let scores = [
                    prior.alt_scores.raw.to_string(),
                    prior.alt_scores.z.to_string(),
                    prior.ref_scores.raw.to_string(),
                    prior.ref_scores.z.to_string(),
                ];
                match prior.site {
                    SpliceSiteKind::Donor => {
                        row.extend(scores);
                        row.extend(std::iter::repeat_with(dash).take(4));
                    }
                    SpliceSiteKind::Acceptor => {
                        row.extend(std::iter::repeat_with(dash).take(4));
                        row.extend(scores);
                    }
                }
            }
            None => row.extend(std::iter::repeat_with(dash).take(10)),
        }
        // Reserved de-novo columns
        row.push(dash());
        row.push(dash());
        row.push(self.splice_site_flag().to_string());
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{EnigmaClass, ScorePair};

    fn variant() -> Variant {
        Variant {
            gene_symbol: "BRCA2".to_string(),
            chromosome: "13".to_string(),
            position: 32_356_608,
            ref_allele: "A".to_string(),
            alt_allele: "G".to_string(),
            accession: "NM_000059.3".to_string(),
            hgvs_cdna: "c.7435A>G".to_string(),
        }
    }

    fn donor_prior() -> PriorResult {
        PriorResult {
            probability: 0.97,
            class: EnigmaClass::Class4,
            site: SpliceSiteKind::Donor,
            ref_scores: ScorePair { raw: 9.2, z: 0.5 },
            alt_scores: ScorePair { raw: 1.3, z: -2.9 },
        }
    }

    #[test]
    fn test_row_width_matches_headers() {
        let scored = VariantRecord::assemble(
            &variant(),
            VariantKind::Substitution,
            Some(LocationCategory::CiSpliceDonor),
            Some(donor_prior()),
        );
        assert_eq!(scored.to_row().len(), OUTPUT_HEADERS.len());
        let unscored = VariantRecord::unscored(&variant());
        assert_eq!(unscored.to_row().len(), OUTPUT_HEADERS.len());
    }

    #[test]
    fn test_donor_columns_populated() {
        let record = VariantRecord::assemble(
            &variant(),
            VariantKind::Substitution,
            Some(LocationCategory::CiSpliceDonor),
            Some(donor_prior()),
        );
        let row = record.to_row();
        assert_eq!(row[0], "c.7435A>G");
        assert_eq!(row[1], "32356608");
        assert_eq!(row[2], "substitution");
        assert_eq!(row[3], "CI_splice_donor");
        assert_eq!(row[4], "0.97");
        assert_eq!(row[5], "class_4");
        // donorVarMES..donorRefZ
        assert_eq!(&row[6..10], &["1.3", "-2.9", "9.2", "0.5"]);
        // Acceptor and de-novo columns stay sentinels
        assert!(row[10..16].iter().all(|v| v == NOT_APPLICABLE));
        assert_eq!(row[16], "1");
    }

    #[test]
    fn test_acceptor_columns_populated() {
        let mut prior = donor_prior();
        prior.site = SpliceSiteKind::Acceptor;
        let record = VariantRecord::assemble(
            &variant(),
            VariantKind::Substitution,
            Some(LocationCategory::SpliceAcceptor),
            Some(prior),
        );
        let row = record.to_row();
        assert!(row[6..10].iter().all(|v| v == NOT_APPLICABLE));
        assert_eq!(&row[10..14], &["1.3", "-2.9", "9.2", "0.5"]);
        assert_eq!(row[16], "1");
    }

    #[test]
    fn test_unscored_variant_is_all_sentinels() {
        let record = VariantRecord::assemble(
            &variant(),
            VariantKind::Deletion,
            Some(LocationCategory::Intron),
            None,
        );
        let row = record.to_row();
        assert_eq!(row[2], "deletion");
        assert_eq!(row[3], "intron");
        assert!(row[4..16].iter().all(|v| v == NOT_APPLICABLE));
        assert_eq!(row[16], "0");
    }
}
