//! Boundary calculator: exon, splice-donor, and splice-acceptor regions
//!
//! All region bounds are genomic coordinate pairs oriented along the coding
//! strand, so `start > end` on the minus strand. The splice-region widths
//! are fixed by the external scorer's input format: a donor region is the
//! last 3 exonic + first 6 intronic bases (9 nt), an acceptor region is the
//! 20 intronic bases before an exon + its first 3 bases (23 nt).
//!
//! Exon coordinates come from the transcript model in the UCSC genePred
//! convention (0-based starts, 1-based inclusive ends); the `+1`/`-1`
//! corrections below map those onto 1-based right-inclusive variant
//! positions. The correction always lands on the 5' side of a region
//! because the genePred start coordinate sits to the *left* of the first
//! real base.

use std::collections::BTreeMap;

use crate::reference::transcript::{Strand, TranscriptModel};

/// Inclusive genomic bounds of a named region, oriented along the strand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionBounds {
    pub start: u64,
    pub end: u64,
}

/// Region bounds keyed by published exon number
pub type BoundaryMap = BTreeMap<u32, RegionBounds>;

/// Strand-aware inclusive interval containment.
///
/// `start`/`end` are strand-oriented: on the plus strand `start <= end`,
/// on the minus strand the comparison direction flips.
///
/// ```
/// use splice_priors::regions::within_boundaries;
/// use splice_priors::reference::Strand;
///
/// assert!(within_boundaries(Strand::Plus, 15, 10, 20));
/// assert!(within_boundaries(Strand::Plus, 10, 10, 20));
/// assert!(!within_boundaries(Strand::Plus, 21, 10, 20));
/// assert!(within_boundaries(Strand::Minus, 15, 20, 10));
/// assert!(!within_boundaries(Strand::Minus, 21, 20, 10));
/// ```
pub fn within_boundaries(strand: Strand, pos: u64, start: u64, end: u64) -> bool {
    match strand {
        Strand::Plus => pos >= start && pos <= end,
        Strand::Minus => pos <= start && pos >= end,
    }
}

/// Exon boundaries for a transcript, keyed by published exon number.
///
/// Exon numbering increases 5' to 3' along the transcript, not along the
/// genome: on the minus strand, exon 1 takes its start from the genomically
/// last exon-end and its end from the matching exon-start.
pub fn exon_boundaries(tx: &TranscriptModel) -> BoundaryMap {
    let count = tx.exon_count();
    let mut map = BoundaryMap::new();
    for ordinal in 1..=count as u32 {
        let idx = (ordinal - 1) as usize;
        let (start, end) = match tx.strand {
            Strand::Plus => (tx.exon_starts[idx], tx.exon_ends[idx]),
            Strand::Minus => (
                tx.exon_ends[count - 1 - idx],
                tx.exon_starts[count - 1 - idx],
            ),
        };
        map.insert(tx.exon_number(ordinal), RegionBounds { start, end });
    }
    map
}

/// Splice-donor boundaries: one region per exon except the transcript's
/// last (no intron follows it).
pub fn donor_boundaries(tx: &TranscriptModel) -> BoundaryMap {
    let mut exons = exon_boundaries(tx);
    if let Some(&last) = exons.keys().next_back() {
        exons.remove(&last);
    }
    exons
        .into_iter()
        .map(|(number, exon)| {
            let bounds = match tx.strand {
                Strand::Plus => RegionBounds {
                    // -3 +1: the genePred coordinate sits left of the first
                    // base, which shifts the 5' side of the region
                    start: exon.end - 3 + 1,
                    end: exon.end + 6,
                },
                Strand::Minus => RegionBounds {
                    start: exon.end + 3,
                    end: exon.end - 6 + 1,
                },
            };
            (number, bounds)
        })
        .collect()
}

/// Splice-acceptor boundaries: one region per exon except exon 1 (no
/// intron precedes it).
pub fn acceptor_boundaries(tx: &TranscriptModel) -> BoundaryMap {
    let mut exons = exon_boundaries(tx);
    if let Some(&first) = exons.keys().next() {
        exons.remove(&first);
    }
    exons
        .into_iter()
        .map(|(number, exon)| {
            let bounds = match tx.strand {
                Strand::Plus => RegionBounds {
                    start: exon.start - 20 + 1,
                    end: exon.start + 3,
                },
                Strand::Minus => RegionBounds {
                    start: exon.start + 20,
                    end: exon.start - 3 + 1,
                },
            };
            (number, bounds)
        })
        .collect()
}

/// The bounds of the region in `map` containing `pos`, if any
pub fn region_containing(map: &BoundaryMap, strand: Strand, pos: u64) -> Option<RegionBounds> {
    map.values()
        .find(|bounds| within_boundaries(strand, pos, bounds.start, bounds.end))
        .copied()
}

/// Whether `pos` falls in any region of `map`
pub fn in_any_region(map: &BoundaryMap, strand: Strand, pos: u64) -> bool {
    region_containing(map, strand, pos).is_some()
}

/// Exon membership for a variant position.
///
/// On the plus strand the genePred exon start is the base before the first
/// exonic base, so a position exactly at `exonStart` is NOT exonic while a
/// position exactly at `exonEnd` IS. The minus-strand bounds already name
/// real bases on both sides, so containment is inclusive of both.
pub fn position_in_exon(exons: &BoundaryMap, strand: Strand, pos: u64) -> bool {
    match strand {
        Strand::Plus => exons
            .values()
            .any(|exon| pos > exon.start && pos <= exon.end),
        Strand::Minus => in_any_region(exons, strand, pos),
    }
}
