//! Shared, read-only reference data
//!
//! Transcript models, clinically important domains, and grey zones are
//! explicitly constructed configuration objects passed into the pipeline,
//! never module-level globals. One [`ReferenceData`] instance is built per
//! process and shared immutably across worker threads.

pub mod domains;
pub mod transcript;

pub use domains::{BoundaryProfile, CiDomain, ClinicalDomains, GreyZone, GreyZones};
pub use transcript::{Gene, ReferenceBundle, Strand, TranscriptModel};

/// All reference tables a run needs, bundled for injection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceData {
    pub transcripts: ReferenceBundle,
    pub domains: ClinicalDomains,
    pub grey_zones: GreyZones,
}

impl ReferenceData {
    /// The production BRCA1/BRCA2 reference tables (hg38)
    pub fn canonical() -> Self {
        Self {
            transcripts: ReferenceBundle::canonical(),
            domains: ClinicalDomains::canonical(),
            grey_zones: GreyZones::canonical(),
        }
    }
}
