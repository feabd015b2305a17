//! Variant location classification and splice-site prior probabilities
//! for BRCA1 and BRCA2
//!
//! Given a variant on one of the two canonical transcripts
//! (NM_007294.3, NM_000059.3), this crate determines where it falls
//! relative to exon, splice-region, clinically important domain, grey
//! zone and UTR boundaries, and for single-nucleotide substitutions in
//! native splice sites computes a prior probability of pathogenicity
//! from reference and variant MaxEntScan scores.
//!
//! # Example
//!
//! ```
//! use splice_priors::classify::{classify_location, LocationCategory};
//! use splice_priors::reference::domains::BoundaryProfile;
//! use splice_priors::reference::ReferenceData;
//!
//! let reference = ReferenceData::canonical();
//! let tx = reference.transcripts.by_accession("NM_000059.3")?;
//! let location = classify_location(
//!     32_316_462,
//!     tx,
//!     &reference.domains,
//!     &reference.grey_zones,
//!     BoundaryProfile::Priors,
//! );
//! assert_eq!(location, LocationCategory::CiDomain);
//! # Ok::<(), splice_priors::error::PriorsError>(())
//! ```

pub mod classify;
pub mod cli;
pub mod error;
pub mod mock;
pub mod pipeline;
pub mod record;
pub mod reference;
pub mod regions;
pub mod scoring;
pub mod seqs;
pub mod service;
pub mod tsv;
pub mod variant;

pub use classify::{classify_alleles, classify_location, LocationCategory, VariantKind};
pub use error::PriorsError;
pub use pipeline::{BatchOutcome, BatchSummary, Pipeline};
pub use record::VariantRecord;
pub use reference::{ReferenceData, Strand};
pub use scoring::{EnigmaClass, PriorResult, SpliceScorer, SpliceSiteKind, ZScoreParams};
pub use seqs::SequenceSource;
pub use variant::Variant;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, PriorsError>;
