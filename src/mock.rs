//! In-memory stand-ins for the external services, for tests and demos

use std::collections::HashMap;

use crate::error::PriorsError;
use crate::scoring::{SpliceScorer, SpliceSiteKind};
use crate::seqs::SequenceSource;
use crate::service::ensembl::{Consequence, ConsequenceAnnotator};
use crate::variant::Variant;

/// [`SequenceSource`] that serves ranges out of preloaded regions
#[derive(Debug, Clone, Default)]
pub struct MockSequenceSource {
    regions: Vec<(String, u64, String)>,
}

impl MockSequenceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `sequence` as the reference starting at `start`
    /// (1-based) on `chromosome`
    pub fn add_region(&mut self, chromosome: &str, start: u64, sequence: &str) {
        self.regions
            .push((chromosome.to_string(), start, sequence.to_string()));
    }
}

impl SequenceSource for MockSequenceSource {
    fn fetch(&self, chromosome: &str, start: u64, end: u64) -> Result<String, PriorsError> {
        for (chrom, region_start, sequence) in &self.regions {
            let region_end = region_start + sequence.len() as u64 - 1;
            if chrom == chromosome && start >= *region_start && end <= region_end {
                let offset = (start - region_start) as usize;
                let len = (end - start + 1) as usize;
                return Ok(sequence[offset..offset + len].to_string());
            }
        }
        Err(PriorsError::Http {
            url: format!("mock://{chromosome}:{start}-{end}"),
            msg: "no region registered".to_string(),
        })
    }
}

/// [`SpliceScorer`] that looks scores up in a fixed table
#[derive(Debug, Clone, Default)]
pub struct MockScorer {
    scores: HashMap<(String, SpliceSiteKind), f64>,
}

impl MockScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_score(&mut self, sequence: &str, site: SpliceSiteKind, score: f64) {
        self.scores.insert((sequence.to_string(), site), score);
    }
}

impl SpliceScorer for MockScorer {
    fn score(&self, sequence: &str, site: SpliceSiteKind) -> Result<f64, PriorsError> {
        self.scores
            .get(&(sequence.to_string(), site))
            .copied()
            .ok_or_else(|| PriorsError::Scorer {
                msg: format!("no score registered for {sequence}"),
            })
    }
}

/// [`ConsequenceAnnotator`] that answers from a position table
#[derive(Debug, Clone, Default)]
pub struct MockAnnotator {
    consequences: HashMap<u64, String>,
}

impl MockAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_consequence(&mut self, position: u64, term: &str) {
        self.consequences.insert(position, term.to_string());
    }
}

impl ConsequenceAnnotator for MockAnnotator {
    fn annotate(&self, variant: &Variant) -> Result<Consequence, PriorsError> {
        Ok(self
            .consequences
            .get(&variant.position)
            .map(|term| Consequence::Determined(term.clone()))
            .unwrap_or(Consequence::Undetermined))
    }
}
