//! Sequence reconstruction over a genomic window
//!
//! Builds the reference and mutant sequences for a splice region: fetch
//! the plus-strand bases, verify the variant's stated reference allele
//! against the retrieved base, substitute the alternate allele, and
//! reverse-complement for minus-strand genes.

use std::collections::BTreeMap;

use crate::error::PriorsError;
use crate::reference::transcript::Strand;
use crate::regions::RegionBounds;

/// Source of plus-strand reference sequence for 1-based inclusive ranges
pub trait SequenceSource {
    /// Fetch the plus-strand sequence for `chromosome:start-end`
    /// (1-based, inclusive, `start <= end`).
    fn fetch(&self, chromosome: &str, start: u64, end: u64) -> Result<String, PriorsError>;
}

impl<S: SequenceSource + ?Sized> SequenceSource for &S {
    fn fetch(&self, chromosome: &str, start: u64, end: u64) -> Result<String, PriorsError> {
        (**self).fetch(chromosome, start, end)
    }
}

impl SequenceSource for Box<dyn SequenceSource + Send + Sync> {
    fn fetch(&self, chromosome: &str, start: u64, end: u64) -> Result<String, PriorsError> {
        (**self).fetch(chromosome, start, end)
    }
}

/// Reverse complement a DNA sequence
///
/// Reverses the sequence and complements each nucleotide (A<->T, G<->C,
/// case preserved). Non-ATGC characters pass through unchanged.
///
/// ```
/// use splice_priors::seqs::reverse_complement;
///
/// assert_eq!(reverse_complement("ATGC"), "GCAT");
/// assert_eq!(reverse_complement("ATGN"), "NCAT");
/// ```
pub fn reverse_complement(seq: &str) -> String {
    seq.chars()
        .rev()
        .map(|c| match c {
            'A' => 'T',
            'T' => 'A',
            'G' => 'C',
            'C' => 'G',
            'a' => 't',
            't' => 'a',
            'g' => 'c',
            'c' => 'g',
            _ => c,
        })
        .collect()
}

/// Reference and mutant sequences over one splice-region window, oriented
/// along the coding strand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefAltSequences {
    pub ref_seq: String,
    pub alt_seq: String,
}

/// Reconstruct the reference and mutant sequences for a window.
///
/// `window` is strand-oriented ([`RegionBounds`] from the boundary
/// calculator: `start > end` on the minus strand). The variant's stated
/// reference allele must match the retrieved base at `pos`; a mismatch is
/// a data-integrity error for that variant. The alternate allele replaces
/// the base at `pos` wholesale, so a multi-base alternate lengthens the
/// mutant sequence in place.
pub fn reconstruct_window<S: SequenceSource>(
    source: &S,
    chromosome: &str,
    strand: Strand,
    window: RegionBounds,
    pos: u64,
    ref_allele: &str,
    alt_allele: &str,
) -> Result<RefAltSequences, PriorsError> {
    let (region_start, region_end) = match strand {
        Strand::Plus => (window.start, window.end),
        Strand::Minus => (window.end, window.start),
    };

    let sequence = source.fetch(chromosome, region_start, region_end)?;
    let expected_len = (region_end - region_start + 1) as usize;
    if sequence.len() != expected_len {
        return Err(PriorsError::SequenceLength {
            chromosome: chromosome.to_string(),
            start: region_start,
            end: region_end,
            expected: expected_len,
            actual: sequence.len(),
        });
    }

    // Position -> base map in increasing genomic order
    let mut bases: BTreeMap<u64, String> = sequence
        .chars()
        .enumerate()
        .map(|(offset, base)| (region_start + offset as u64, base.to_string()))
        .collect();

    let retrieved = bases
        .get(&pos)
        .ok_or(PriorsError::PositionOutsideWindow {
            position: pos,
            start: region_start,
            end: region_end,
        })?
        .clone();
    if retrieved != ref_allele {
        return Err(PriorsError::ReferenceMismatch {
            chromosome: chromosome.to_string(),
            position: pos,
            expected: ref_allele.to_string(),
            found: retrieved,
        });
    }

    let ref_seq = assemble(&bases, strand);
    bases.insert(pos, alt_allele.to_string());
    let alt_seq = assemble(&bases, strand);

    Ok(RefAltSequences { ref_seq, alt_seq })
}

/// Concatenate bases in increasing genomic order, then flip to the coding
/// strand if needed
fn assemble(bases: &BTreeMap<u64, String>, strand: Strand) -> String {
    let plus: String = bases.values().map(String::as_str).collect();
    match strand {
        Strand::Plus => plus,
        Strand::Minus => reverse_complement(&plus),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedSource {
        regions: HashMap<String, (u64, String)>,
    }

    impl FixedSource {
        fn single(chromosome: &str, start: u64, seq: &str) -> Self {
            let mut regions = HashMap::new();
            regions.insert(chromosome.to_string(), (start, seq.to_string()));
            Self { regions }
        }
    }

    impl SequenceSource for FixedSource {
        fn fetch(&self, chromosome: &str, start: u64, end: u64) -> Result<String, PriorsError> {
            let (offset, seq) = self.regions.get(chromosome).expect("chromosome");
            let lo = (start - offset) as usize;
            let hi = (end - offset + 1) as usize;
            Ok(seq[lo..hi].to_string())
        }
    }

    #[test]
    fn test_round_trip_complement() {
        let seq = "ACGTGATTACA";
        assert_eq!(reverse_complement(&reverse_complement(seq)), seq);
    }

    #[test]
    fn test_plus_strand_substitution() {
        let source = FixedSource::single("chr13", 100, "CAGGTAAGT");
        let window = RegionBounds {
            start: 100,
            end: 108,
        };
        let seqs = reconstruct_window(
            &source,
            "chr13",
            Strand::Plus,
            window,
            103,
            "G",
            "A",
        )
        .unwrap();
        assert_eq!(seqs.ref_seq, "CAGGTAAGT");
        assert_eq!(seqs.alt_seq, "CAGATAAGT");
    }

    #[test]
    fn test_minus_strand_reconstruction() {
        // Plus-strand bases 200..208; the window arrives strand-oriented
        // with start > end
        let source = FixedSource::single("chr17", 200, "ACTTACCTG");
        let window = RegionBounds {
            start: 208,
            end: 200,
        };
        let seqs = reconstruct_window(
            &source,
            "chr17",
            Strand::Minus,
            window,
            204,
            "A",
            "G",
        )
        .unwrap();
        // Coding strand reads the reverse complement of the plus strand
        assert_eq!(seqs.ref_seq, "CAGGTAAGT");
        // Plus-strand A>G at 204 complements to T>C on the coding strand
        assert_eq!(seqs.alt_seq, "CAGGCAAGT");
    }

    #[test]
    fn test_reference_mismatch_is_integrity_error() {
        let source = FixedSource::single("chr13", 100, "CAGGTAAGT");
        let window = RegionBounds {
            start: 100,
            end: 108,
        };
        let err = reconstruct_window(
            &source,
            "chr13",
            Strand::Plus,
            window,
            103,
            "T",
            "A",
        )
        .unwrap_err();
        assert!(matches!(err, PriorsError::ReferenceMismatch { .. }));
        assert!(err.is_data_integrity());
    }

    #[test]
    fn test_insertion_lengthens_alt() {
        let source = FixedSource::single("chr13", 100, "CAGGTAAGT");
        let window = RegionBounds {
            start: 100,
            end: 108,
        };
        let seqs = reconstruct_window(
            &source,
            "chr13",
            Strand::Plus,
            window,
            103,
            "G",
            "GTT",
        )
        .unwrap();
        assert_eq!(seqs.ref_seq, "CAGGTAAGT");
        assert_eq!(seqs.alt_seq, "CAGGTTTAAGT");
    }

    #[test]
    fn test_short_fetch_is_length_error() {
        struct Truncated;
        impl SequenceSource for Truncated {
            fn fetch(&self, _: &str, _: u64, _: u64) -> Result<String, PriorsError> {
                Ok("ACGT".to_string())
            }
        }
        let window = RegionBounds {
            start: 100,
            end: 108,
        };
        let err = reconstruct_window(
            &Truncated,
            "chr13",
            Strand::Plus,
            window,
            103,
            "G",
            "A",
        )
        .unwrap_err();
        assert!(matches!(err, PriorsError::SequenceLength { .. }));
    }
}
