//! Transcript models for the two canonical BRCA transcripts
//!
//! # Coordinate System
//!
//! All stored coordinates follow the UCSC genePred convention:
//!
//! | Field | Basis | Notes |
//! |-------|-------|-------|
//! | `tx_start`, `exon_starts[i]` | 0-based | The base *before* the first transcribed/exonic base |
//! | `tx_end`, `exon_ends[i]` | 1-based | Last transcribed/exonic base (inclusive) |
//! | `cds_start`, `cds_end` | as above | Coding-region bounds |
//!
//! Variant positions are 1-based genomic coordinates. The boundary
//! calculator ([`crate::regions`]) carries the `+1`/`-1` corrections that
//! reconcile the two conventions; nothing here adjusts the raw values.
//!
//! Models are immutable after construction. [`ReferenceBundle::canonical`]
//! builds the two production transcripts (hg38) once; tests construct
//! synthetic models directly.

use serde::{Deserialize, Serialize};

use crate::error::PriorsError;

/// Strand orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Strand {
    #[serde(rename = "+")]
    #[default]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
        }
    }
}

/// The two genes with reference data in this pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gene {
    #[serde(rename = "BRCA1")]
    Brca1,
    #[serde(rename = "BRCA2")]
    Brca2,
}

impl Gene {
    /// Look up a gene by its symbol
    pub fn from_symbol(symbol: &str) -> Option<Gene> {
        match symbol {
            "BRCA1" => Some(Gene::Brca1),
            "BRCA2" => Some(Gene::Brca2),
            _ => None,
        }
    }

    /// Gene symbol as used in input/output rows
    pub fn symbol(&self) -> &'static str {
        match self {
            Gene::Brca1 => "BRCA1",
            Gene::Brca2 => "BRCA2",
        }
    }

    /// Coding strand of the gene
    pub fn strand(&self) -> Strand {
        match self {
            Gene::Brca1 => Strand::Minus,
            Gene::Brca2 => Strand::Plus,
        }
    }

    /// Chromosome in UCSC notation (e.g. `chr17`)
    pub fn chromosome(&self) -> &'static str {
        match self {
            Gene::Brca1 => "chr17",
            Gene::Brca2 => "chr13",
        }
    }

    /// Bare chromosome number as it appears in input rows
    pub fn chromosome_number(&self) -> &'static str {
        match self {
            Gene::Brca1 => "17",
            Gene::Brca2 => "13",
        }
    }

    /// Canonical Ensembl transcript, used to filter VEP consequences
    pub fn ensembl_canonical(&self) -> &'static str {
        match self {
            Gene::Brca1 => "ENST00000357654",
            Gene::Brca2 => "ENST00000380152",
        }
    }
}

impl std::fmt::Display for Gene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Per-gene canonical transcript coordinates, shared read-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptModel {
    /// RefSeq accession (e.g. `NM_000059.3`)
    pub accession: String,
    pub gene: Gene,
    /// Chromosome in UCSC notation
    pub chromosome: String,
    pub strand: Strand,
    /// Transcription start (0-based, genePred)
    pub tx_start: u64,
    /// Transcription end (1-based inclusive)
    pub tx_end: u64,
    /// Coding-region start (0-based, genePred)
    pub cds_start: u64,
    /// Coding-region end (1-based inclusive)
    pub cds_end: u64,
    /// Exon starts in ascending genomic order (0-based, genePred)
    pub exon_starts: Vec<u64>,
    /// Exon ends in ascending genomic order (1-based inclusive)
    pub exon_ends: Vec<u64>,
    /// Exon number absent from the published transcript, if any.
    /// Numbering jumps over it so published exon names stay stable.
    pub skipped_exon: Option<u32>,
}

impl TranscriptModel {
    /// Number of exons in the transcript
    pub fn exon_count(&self) -> usize {
        self.exon_starts.len()
    }

    /// Published exon number for a 1-based exon ordinal (5' to 3').
    ///
    /// NM_007294.3 lacks the exon historically numbered 4, so its exons
    /// are published as 1-3, 5-24 while every other transcript numbers
    /// its exons consecutively.
    ///
    /// ```
    /// use splice_priors::reference::transcript::ReferenceBundle;
    ///
    /// let bundle = ReferenceBundle::canonical();
    /// let brca1 = bundle.by_accession("NM_007294.3").unwrap();
    /// assert_eq!(brca1.exon_number(3), 3);
    /// assert_eq!(brca1.exon_number(4), 5);
    /// assert_eq!(brca1.exon_number(23), 24);
    /// ```
    pub fn exon_number(&self, ordinal: u32) -> u32 {
        match self.skipped_exon {
            Some(skip) if ordinal >= skip => ordinal + 1,
            _ => ordinal,
        }
    }

    /// The canonical BRCA1 transcript, NM_007294.3 (hg38, UCSC refGene)
    pub fn brca1() -> Self {
        TranscriptModel {
            accession: "NM_007294.3".to_string(),
            gene: Gene::Brca1,
            chromosome: "chr17".to_string(),
            strand: Strand::Minus,
            tx_start: 43_044_294,
            tx_end: 43_125_483,
            cds_start: 43_045_677,
            cds_end: 43_124_096,
            exon_starts: vec![
                43_044_294, 43_047_642, 43_049_120, 43_051_062, 43_057_051, 43_063_332,
                43_063_873, 43_067_607, 43_070_927, 43_074_330, 43_076_487, 43_082_403,
                43_090_943, 43_091_434, 43_095_845, 43_097_243, 43_099_774, 43_104_121,
                43_104_867, 43_106_455, 43_115_725, 43_124_016, 43_125_270,
            ],
            exon_ends: vec![
                43_045_802, 43_047_703, 43_049_194, 43_051_117, 43_057_135, 43_063_373,
                43_063_951, 43_067_695, 43_071_238, 43_074_521, 43_076_614, 43_082_575,
                43_091_032, 43_094_860, 43_095_922, 43_097_289, 43_099_880, 43_104_261,
                43_104_956, 43_106_533, 43_115_779, 43_124_115, 43_125_483,
            ],
            skipped_exon: Some(4),
        }
    }

    /// The canonical BRCA2 transcript, NM_000059.3 (hg38, UCSC refGene)
    pub fn brca2() -> Self {
        TranscriptModel {
            accession: "NM_000059.3".to_string(),
            gene: Gene::Brca2,
            chromosome: "chr13".to_string(),
            strand: Strand::Plus,
            tx_start: 32_315_479,
            tx_end: 32_399_672,
            cds_start: 32_316_460,
            cds_end: 32_398_770,
            exon_starts: vec![
                32_315_479, 32_316_421, 32_319_076, 32_325_075, 32_326_100, 32_326_241,
                32_326_498, 32_329_442, 32_330_918, 32_332_271, 32_336_264, 32_344_557,
                32_346_826, 32_354_860, 32_356_427, 32_357_741, 32_362_522, 32_363_178,
                32_370_401, 32_370_955, 32_376_669, 32_379_316, 32_379_749, 32_380_006,
                32_394_688, 32_396_897, 32_398_161,
            ],
            exon_ends: vec![
                32_315_667, 32_316_527, 32_319_325, 32_325_184, 32_326_150, 32_326_282,
                32_326_613, 32_329_492, 32_331_030, 32_333_387, 32_341_196, 32_344_653,
                32_346_896, 32_355_288, 32_356_609, 32_357_929, 32_362_693, 32_363_533,
                32_370_557, 32_371_100, 32_376_791, 32_379_515, 32_379_913, 32_380_145,
                32_394_933, 32_397_044, 32_399_672,
            ],
            skipped_exon: None,
        }
    }
}

/// The set of transcript models available to a run, looked up by accession
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceBundle {
    transcripts: Vec<TranscriptModel>,
}

impl ReferenceBundle {
    /// Build a bundle from explicit transcript models
    pub fn new(transcripts: Vec<TranscriptModel>) -> Self {
        Self { transcripts }
    }

    /// The two production transcripts
    pub fn canonical() -> Self {
        Self::new(vec![TranscriptModel::brca1(), TranscriptModel::brca2()])
    }

    /// Look up a transcript by its RefSeq accession.
    ///
    /// An unrecognized accession is a configuration error: there is no
    /// fallback transcript to classify against.
    pub fn by_accession(&self, accession: &str) -> Result<&TranscriptModel, PriorsError> {
        self.transcripts
            .iter()
            .find(|tx| tx.accession == accession)
            .ok_or_else(|| PriorsError::UnknownTranscript {
                accession: accession.to_string(),
            })
    }

    /// Look up the transcript for a gene, if the bundle carries one
    pub fn by_gene(&self, gene: Gene) -> Option<&TranscriptModel> {
        self.transcripts.iter().find(|tx| tx.gene == gene)
    }
}
