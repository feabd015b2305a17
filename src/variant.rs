//! Input variant record
//!
//! One immutable [`Variant`] per input row. Coordinates are 1-based
//! genomic positions on the plus strand, as delivered by the curation
//! database export; alleles are likewise plus-strand.

use serde::{Deserialize, Serialize};

/// A single variant as read from the input TSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Gene symbol (e.g. `BRCA2`)
    #[serde(rename = "Gene_Symbol")]
    pub gene_symbol: String,
    /// Bare chromosome number (e.g. `13`)
    #[serde(rename = "Chr")]
    pub chromosome: String,
    /// 1-based genomic position (hg38, plus strand)
    #[serde(rename = "Pos")]
    pub position: u64,
    /// Reference allele, plus strand
    #[serde(rename = "Ref")]
    pub ref_allele: String,
    /// Alternate allele, plus strand
    #[serde(rename = "Alt")]
    pub alt_allele: String,
    /// RefSeq transcript accession the variant was called against
    #[serde(rename = "Reference_Sequence")]
    pub accession: String,
    /// Externally supplied HGVS cDNA identifier; `-` when absent
    #[serde(rename = "HGVS_cDNA")]
    pub hgvs_cdna: String,
}

impl Variant {
    /// Chromosome in UCSC notation, as the sequence source expects
    pub fn ucsc_chromosome(&self) -> String {
        if self.chromosome.starts_with("chr") {
            self.chromosome.clone()
        } else {
            format!("chr{}", self.chromosome)
        }
    }
}
