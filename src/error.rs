//! Error types for splice-priors
//!
//! Errors fall into the categories the batch layer cares about:
//! data-integrity errors (bad input for a single variant, folded into that
//! variant's output row), configuration errors (unknown transcript or gene),
//! and external-service errors (fatal for the variant that triggered them).

use thiserror::Error;

/// Main error type for splice-priors operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriorsError {
    /// Variant references a transcript accession with no loaded model
    #[error("Unrecognized transcript accession: {accession}")]
    UnknownTranscript { accession: String },

    /// Variant references a gene symbol with no reference data
    #[error("Unrecognized gene symbol: {gene}")]
    UnknownGene { gene: String },

    /// Stated reference allele does not match the retrieved reference base
    #[error("Reference mismatch at {chromosome}:{position}: expected {expected}, found {found}")]
    ReferenceMismatch {
        chromosome: String,
        position: u64,
        expected: String,
        found: String,
    },

    /// Allele contains bases outside the accepted IUPAC subset
    #[error("Malformed allele: {allele}")]
    MalformedAllele { allele: String },

    /// Variant position falls outside the requested sequence window
    #[error("Position {position} outside window {start}-{end}")]
    PositionOutsideWindow { position: u64, start: u64, end: u64 },

    /// Retrieved sequence does not cover the requested range
    #[error("Sequence length mismatch for {chromosome}:{start}-{end}: expected {expected} bases, got {actual}")]
    SequenceLength {
        chromosome: String,
        start: u64,
        end: u64,
        expected: usize,
        actual: usize,
    },

    /// Non-success HTTP status other than rate limiting
    #[error("HTTP {status} from {url}")]
    ServiceStatus { status: u16, url: String },

    /// Transport-level HTTP failure
    #[error("Request to {url} failed: {msg}")]
    Http { url: String, msg: String },

    /// External splice scorer invocation failed
    #[error("Splice scorer failed: {msg}")]
    Scorer { msg: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON parsing error
    #[error("JSON error: {msg}")]
    Json { msg: String },

    /// TSV read/write error
    #[error("TSV error: {msg}")]
    Tsv { msg: String },
}

impl PriorsError {
    /// Whether this error reflects bad data for a single variant rather
    /// than a broken run. Data-integrity errors are folded into the
    /// variant's output row; everything else is surfaced to the caller.
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            PriorsError::UnknownTranscript { .. }
                | PriorsError::UnknownGene { .. }
                | PriorsError::ReferenceMismatch { .. }
                | PriorsError::MalformedAllele { .. }
                | PriorsError::PositionOutsideWindow { .. }
        )
    }
}

impl From<std::io::Error> for PriorsError {
    fn from(e: std::io::Error) -> Self {
        PriorsError::Io { msg: e.to_string() }
    }
}

impl From<serde_json::Error> for PriorsError {
    fn from(e: serde_json::Error) -> Self {
        PriorsError::Json { msg: e.to_string() }
    }
}

impl From<csv::Error> for PriorsError {
    fn from(e: csv::Error) -> Self {
        PriorsError::Tsv { msg: e.to_string() }
    }
}
