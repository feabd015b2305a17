//! Variant consequence annotation via the Ensembl VEP REST endpoint
//!
//! `GET {base}/vep/human/region/{chrom}:{pos}-{pos}:1/{alt}?` returns a
//! JSON array of annotated entries; the consequence reported for the
//! gene's canonical Ensembl transcript is the one that matters.

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::PriorsError;
use crate::reference::Gene;
use crate::variant::Variant;

use super::retry::{get_with_retry, Sleeper, ThreadSleeper};

const DEFAULT_BASE_URL: &str = "https://rest.ensembl.org";

/// Outcome of a consequence lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Consequence {
    /// Sequence Ontology term reported for the canonical transcript
    Determined(String),
    /// Lookup could not be performed or yielded no usable annotation
    Undetermined,
}

impl std::fmt::Display for Consequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Consequence::Determined(term) => write!(f, "{term}"),
            Consequence::Undetermined => write!(f, "unable_to_determine"),
        }
    }
}

/// Service that maps a variant to its predicted transcript consequence.
///
/// Annotation is a standalone lookup for downstream consumers; the batch
/// pipeline classifies and scores without it.
pub trait ConsequenceAnnotator {
    fn annotate(&self, variant: &Variant) -> Result<Consequence, PriorsError>;
}

impl<A: ConsequenceAnnotator + ?Sized> ConsequenceAnnotator for &A {
    fn annotate(&self, variant: &Variant) -> Result<Consequence, PriorsError> {
        (**self).annotate(variant)
    }
}

impl ConsequenceAnnotator for Box<dyn ConsequenceAnnotator + Send + Sync> {
    fn annotate(&self, variant: &Variant) -> Result<Consequence, PriorsError> {
        (**self).annotate(variant)
    }
}

#[derive(Debug, Deserialize)]
struct VepEntry {
    #[serde(default)]
    transcript_consequences: Vec<VepTranscript>,
}

#[derive(Debug, Deserialize)]
struct VepTranscript {
    transcript_id: String,
    #[serde(default)]
    consequence_terms: Vec<String>,
}

/// [`ConsequenceAnnotator`] backed by the Ensembl REST VEP
pub struct EnsemblVep<S: Sleeper = ThreadSleeper> {
    client: Client,
    base_url: String,
    sleeper: S,
}

impl EnsemblVep {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            sleeper: ThreadSleeper,
        }
    }
}

impl Default for EnsemblVep {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sleeper> EnsemblVep<S> {
    pub fn with_sleeper(base_url: &str, sleeper: S) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            sleeper,
        }
    }

    fn region_url(&self, variant: &Variant) -> String {
        format!(
            "{}/vep/human/region/{}:{}-{}:1/{}?content-type=application/json",
            self.base_url, variant.chromosome, variant.position, variant.position,
            variant.alt_allele
        )
    }
}

/// Alternate alleles the endpoint accepts: plain bases only, no
/// ambiguity codes
fn queryable_allele(allele: &str) -> bool {
    !allele.is_empty() && allele.chars().all(|b| matches!(b, 'A' | 'C' | 'G' | 'T'))
}

impl<S: Sleeper> ConsequenceAnnotator for EnsemblVep<S> {
    fn annotate(&self, variant: &Variant) -> Result<Consequence, PriorsError> {
        // Only the two covered chromosomes are ever queried
        if variant.chromosome != "13" && variant.chromosome != "17" {
            return Ok(Consequence::Undetermined);
        }
        if !queryable_allele(&variant.alt_allele) {
            return Ok(Consequence::Undetermined);
        }
        let gene = match Gene::from_symbol(&variant.gene_symbol) {
            Some(gene) => gene,
            None => return Ok(Consequence::Undetermined),
        };
        let url = self.region_url(variant);
        let response = get_with_retry(&self.client, &url, &self.sleeper)?;
        let entries: Vec<VepEntry> = response.json().map_err(|e| PriorsError::Http {
            url: url.clone(),
            msg: e.to_string(),
        })?;
        let canonical = gene.ensembl_canonical();
        for entry in entries {
            for tx in entry.transcript_consequences {
                if tx.transcript_id == canonical {
                    if let Some(term) = tx.consequence_terms.into_iter().next() {
                        return Ok(Consequence::Determined(term));
                    }
                }
            }
        }
        Ok(Consequence::Undetermined)
    }
}
