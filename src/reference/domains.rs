//! Clinically important domains and grey zones
//!
//! Domain extents are genomic coordinate pairs oriented along the coding
//! strand: for BRCA1 (minus strand) `start > end`. Two boundary profiles
//! exist, `enigma` and `priors`, with different extents per gene; the
//! profile is selected once per run.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::reference::transcript::Gene;

/// Which clinically-important-domain extents apply to a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryProfile {
    #[default]
    Enigma,
    Priors,
}

impl std::fmt::Display for BoundaryProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryProfile::Enigma => write!(f, "enigma"),
            BoundaryProfile::Priors => write!(f, "priors"),
        }
    }
}

impl FromStr for BoundaryProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "enigma" => Ok(BoundaryProfile::Enigma),
            "priors" => Ok(BoundaryProfile::Priors),
            other => Err(format!(
                "unknown boundary profile '{other}' (expected 'enigma' or 'priors')"
            )),
        }
    }
}

/// A named clinically important domain with strand-oriented genomic bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiDomain {
    pub name: String,
    /// 5'-most genomic bound (larger than `end` on the minus strand)
    pub start: u64,
    /// 3'-most genomic bound
    pub end: u64,
}

impl CiDomain {
    pub fn new(name: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }
}

/// Gene- and profile-keyed clinically important domain table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClinicalDomains {
    entries: Vec<DomainEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct DomainEntry {
    gene: Gene,
    profile: BoundaryProfile,
    domains: Vec<CiDomain>,
}

impl ClinicalDomains {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the domain set for a gene/profile pair
    pub fn insert(&mut self, gene: Gene, profile: BoundaryProfile, domains: Vec<CiDomain>) {
        self.entries.push(DomainEntry {
            gene,
            profile,
            domains,
        });
    }

    /// Domains for a gene under a profile; empty if none are registered
    pub fn domains(&self, gene: Gene, profile: BoundaryProfile) -> &[CiDomain] {
        self.entries
            .iter()
            .find(|e| e.gene == gene && e.profile == profile)
            .map(|e| e.domains.as_slice())
            .unwrap_or(&[])
    }

    /// The published BRCA1/BRCA2 domain boundaries (hg38)
    pub fn canonical() -> Self {
        let mut table = Self::new();
        table.insert(
            Gene::Brca1,
            BoundaryProfile::Enigma,
            vec![
                CiDomain::new("ring", 43_124_096, 43_104_260),
                CiDomain::new("brct", 43_070_966, 43_045_705),
            ],
        );
        table.insert(
            Gene::Brca1,
            BoundaryProfile::Priors,
            vec![
                CiDomain::new("initiation", 43_124_096, 43_124_094),
                CiDomain::new("ring", 43_124_084, 43_104_875),
                CiDomain::new("brct", 43_070_966, 43_045_705),
            ],
        );
        table.insert(
            Gene::Brca2,
            BoundaryProfile::Enigma,
            vec![CiDomain::new("dnb", 32_356_433, 32_396_954)],
        );
        table.insert(
            Gene::Brca2,
            BoundaryProfile::Priors,
            vec![
                CiDomain::new("initiation", 32_316_461, 32_316_463),
                CiDomain::new("palb2", 32_316_491, 32_319_108),
                CiDomain::new("dnb", 32_356_433, 32_396_954),
                CiDomain::new("tr2/rad5", 32_398_318, 32_398_428),
            ],
        );
        table
    }
}

/// A historically ambiguous genomic sub-region, excluded from standard
/// domain/exon scoring. Only BRCA2 has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreyZone {
    pub gene: Gene,
    pub start: u64,
    pub end: u64,
}

/// Grey zone lookup table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GreyZones {
    zones: Vec<GreyZone>,
}

impl GreyZones {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, zone: GreyZone) {
        self.zones.push(zone);
    }

    /// The grey zone for a gene, if it has one
    pub fn for_gene(&self, gene: Gene) -> Option<&GreyZone> {
        self.zones.iter().find(|z| z.gene == gene)
    }

    /// The published BRCA2 grey zone (hg38)
    pub fn canonical() -> Self {
        let mut zones = Self::new();
        zones.insert(GreyZone {
            gene: Gene::Brca2,
            start: 32_398_438,
            end: 32_398_488,
        });
        zones
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_parsing() {
        assert_eq!("enigma".parse::<BoundaryProfile>(), Ok(BoundaryProfile::Enigma));
        assert_eq!("PRIORS".parse::<BoundaryProfile>(), Ok(BoundaryProfile::Priors));
        assert!("strict".parse::<BoundaryProfile>().is_err());
    }

    #[test]
    fn test_canonical_domain_counts() {
        let table = ClinicalDomains::canonical();
        assert_eq!(table.domains(Gene::Brca1, BoundaryProfile::Enigma).len(), 2);
        assert_eq!(table.domains(Gene::Brca1, BoundaryProfile::Priors).len(), 3);
        assert_eq!(table.domains(Gene::Brca2, BoundaryProfile::Enigma).len(), 1);
        assert_eq!(table.domains(Gene::Brca2, BoundaryProfile::Priors).len(), 4);
    }

    #[test]
    fn test_domain_orientation_follows_strand() {
        let table = ClinicalDomains::canonical();
        // BRCA1 is minus strand: start > end
        for domain in table.domains(Gene::Brca1, BoundaryProfile::Enigma) {
            assert!(domain.start > domain.end, "{}", domain.name);
        }
        // BRCA2 is plus strand: start < end
        for domain in table.domains(Gene::Brca2, BoundaryProfile::Priors) {
            assert!(domain.start < domain.end, "{}", domain.name);
        }
    }

    #[test]
    fn test_grey_zone_only_brca2() {
        let zones = GreyZones::canonical();
        assert!(zones.for_gene(Gene::Brca1).is_none());
        let zone = zones.for_gene(Gene::Brca2).unwrap();
        assert_eq!(zone.start, 32_398_438);
        assert_eq!(zone.end, 32_398_488);
    }
}
