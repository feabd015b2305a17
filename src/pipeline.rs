//! Per-variant pipeline and parallel batch runner
//!
//! Each variant's classification and scoring is independent and
//! side-effect-free given the shared read-only reference data, so the
//! batch fans out over a rayon pool. Results come back keyed to their
//! input index (collect preserves order), never by completion order.

use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, error, info};
use rayon::prelude::*;

use crate::classify::{classify_alleles, classify_location, VariantKind};
use crate::error::PriorsError;
use crate::record::VariantRecord;
use crate::reference::domains::BoundaryProfile;
use crate::reference::{Gene, ReferenceData};
use crate::regions::{acceptor_boundaries, donor_boundaries, region_containing};
use crate::scoring::{score_splice_site, SpliceScorer, SpliceSiteKind, ZScoreParams};
use crate::seqs::{reconstruct_window, SequenceSource};
use crate::variant::Variant;

/// How often to log batch progress, in variants
const PROGRESS_INTERVAL: usize = 100;

/// Counts for a completed batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Input rows processed
    pub total: usize,
    /// Rows for which a prior probability was computed
    pub scored: usize,
    /// Rows whose processing failed and was folded into sentinels
    pub failed: usize,
}

/// Output of a batch run: one record per input row, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub records: Vec<VariantRecord>,
    pub summary: BatchSummary,
}

/// The full per-variant pipeline with its injected collaborators
pub struct Pipeline<S, C> {
    reference: ReferenceData,
    zscores: ZScoreParams,
    profile: BoundaryProfile,
    sequences: S,
    scorer: C,
}

impl<S: SequenceSource + Sync, C: SpliceScorer + Sync> Pipeline<S, C> {
    pub fn new(
        reference: ReferenceData,
        zscores: ZScoreParams,
        profile: BoundaryProfile,
        sequences: S,
        scorer: C,
    ) -> Self {
        Self {
            reference,
            zscores,
            profile,
            sequences,
            scorer,
        }
    }

    /// Classify and, where applicable, score a single variant.
    ///
    /// Data-integrity errors are folded into the returned record (the
    /// allele shape falls back to `other`); only external-service
    /// failures propagate as `Err`.
    pub fn process(&self, variant: &Variant) -> Result<VariantRecord, PriorsError> {
        let kind = classify_alleles(&variant.ref_allele, &variant.alt_allele);

        let tx = match self.reference.transcripts.by_accession(&variant.accession) {
            Ok(tx) => tx,
            Err(err) => {
                debug!("{}: {}", variant.hgvs_cdna, err);
                return Ok(VariantRecord::unscored(variant));
            }
        };
        if Gene::from_symbol(&variant.gene_symbol) != Some(tx.gene) {
            let err = PriorsError::UnknownGene {
                gene: variant.gene_symbol.clone(),
            };
            debug!("{}: {}", variant.hgvs_cdna, err);
            return Ok(VariantRecord::unscored(variant));
        }

        let location = classify_location(
            variant.position,
            tx,
            &self.reference.domains,
            &self.reference.grey_zones,
            self.profile,
        );

        // Only single-nucleotide substitutions in splice regions carry a
        // scoring rule; everything else keeps the sentinel prior. An
        // identifier-less row is never scored.
        let site = match location {
            _ if variant.hgvs_cdna == crate::record::NOT_APPLICABLE => None,
            _ if kind != VariantKind::Substitution => None,
            loc if loc.is_splice_donor() => Some(SpliceSiteKind::Donor),
            loc if loc.is_splice_acceptor() => Some(SpliceSiteKind::Acceptor),
            _ => None,
        };

        let prior = match site {
            Some(site) => {
                let bounds_map = match site {
                    SpliceSiteKind::Donor => donor_boundaries(tx),
                    SpliceSiteKind::Acceptor => acceptor_boundaries(tx),
                };
                // The classifier already placed the variant in a region
                let window = match region_containing(&bounds_map, tx.strand, variant.position) {
                    Some(window) => window,
                    None => {
                        return Err(PriorsError::PositionOutsideWindow {
                            position: variant.position,
                            start: tx.tx_start,
                            end: tx.tx_end,
                        })
                    }
                };
                match self.score_window(variant, tx.strand, window, site) {
                    Ok(prior) => Some(prior),
                    Err(err) if err.is_data_integrity() => {
                        debug!("{}: {}", variant.hgvs_cdna, err);
                        return Ok(VariantRecord::assemble(
                            variant,
                            VariantKind::Other,
                            Some(location),
                            None,
                        ));
                    }
                    Err(err) => return Err(err),
                }
            }
            None => None,
        };

        Ok(VariantRecord::assemble(variant, kind, Some(location), prior))
    }

    fn score_window(
        &self,
        variant: &Variant,
        strand: crate::reference::Strand,
        window: crate::regions::RegionBounds,
        site: SpliceSiteKind,
    ) -> Result<crate::scoring::PriorResult, PriorsError> {
        // Ambiguity codes pass shape classification but have no splice
        // strength; the scorer only sees canonical bases
        for allele in [&variant.ref_allele, &variant.alt_allele] {
            if !allele.chars().all(|b| matches!(b, 'A' | 'C' | 'G' | 'T')) {
                return Err(PriorsError::MalformedAllele {
                    allele: allele.clone(),
                });
            }
        }
        let seqs = reconstruct_window(
            &self.sequences,
            &variant.ucsc_chromosome(),
            strand,
            window,
            variant.position,
            &variant.ref_allele,
            &variant.alt_allele,
        )?;
        score_splice_site(&self.scorer, &self.zscores, site, &seqs)
    }

    /// Process every variant in parallel.
    ///
    /// Returns one result per input, in input order; rayon's collect
    /// places each result by its input index regardless of which worker
    /// finished first.
    pub fn process_all(&self, variants: &[Variant]) -> Vec<Result<VariantRecord, PriorsError>> {
        let done = AtomicUsize::new(0);
        let total = variants.len();
        variants
            .par_iter()
            .map(|variant| {
                let result = self.process(variant);
                let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                if n % PROGRESS_INTERVAL == 0 {
                    info!("{n} of {total} variants processed");
                }
                result
            })
            .collect()
    }

    /// Process a batch and fold per-variant failures into sentinel rows.
    ///
    /// The batch always completes with one output record per input row;
    /// failures are logged with the variant identifier and recorded in
    /// the row's fields.
    pub fn process_batch(&self, variants: &[Variant]) -> BatchOutcome {
        let results = self.process_all(variants);
        let mut summary = BatchSummary {
            total: variants.len(),
            ..BatchSummary::default()
        };
        let records = results
            .into_iter()
            .zip(variants)
            .map(|(result, variant)| match result {
                Ok(record) => {
                    if record.prior.is_some() {
                        summary.scored += 1;
                    }
                    record
                }
                Err(err) => {
                    error!("{} ({}): {}", variant.hgvs_cdna, variant.position, err);
                    summary.failed += 1;
                    VariantRecord::unscored(variant)
                }
            })
            .collect();
        info!(
            "batch complete: {} variants, {} scored, {} failed",
            summary.total, summary.scored, summary.failed
        );
        BatchOutcome { records, summary }
    }
}
