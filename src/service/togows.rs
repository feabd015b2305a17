//! Genomic sequence retrieval via the TogoWS UCSC proxy
//!
//! `GET {base}/{chromosome}:{start}-{end}` returns the plus-strand
//! reference sequence for the 1-based inclusive range, as FASTA or as
//! bare sequence text depending on the mirror. Both forms are handled.

use reqwest::blocking::Client;

use crate::error::PriorsError;
use crate::seqs::SequenceSource;

use super::retry::{get_with_retry, Sleeper, ThreadSleeper};

const DEFAULT_BASE_URL: &str = "http://togows.org/api/ucsc/hg38";

/// [`SequenceSource`] backed by the TogoWS REST API
pub struct TogowsSequenceSource<S: Sleeper = ThreadSleeper> {
    client: Client,
    base_url: String,
    sleeper: S,
}

impl TogowsSequenceSource {
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

impl Default for TogowsSequenceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sleeper> TogowsSequenceSource<S> {
    pub fn with_sleeper(base_url: &str, sleeper: S) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            sleeper,
        }
    }
}

/// Strip any FASTA header lines and whitespace from a response body
fn parse_sequence(body: &str) -> String {
    body.lines()
        .filter(|line| !line.starts_with('>'))
        .map(str::trim)
        .collect()
}

impl<S: Sleeper> SequenceSource for TogowsSequenceSource<S> {
    fn fetch(&self, chromosome: &str, start: u64, end: u64) -> Result<String, PriorsError> {
        let url = format!("{}/{}:{}-{}", self.base_url, chromosome, start, end);
        let response = get_with_retry(&self.client, &url, &self.sleeper)?;
        let body = response.text().map_err(|e| PriorsError::Http {
            url: url.clone(),
            msg: e.to_string(),
        })?;
        let seq = parse_sequence(&body).to_uppercase();
        let expected = (end - start + 1) as usize;
        if seq.len() != expected {
            return Err(PriorsError::SequenceLength {
                chromosome: chromosome.to_string(),
                start,
                end,
                expected,
                actual: seq.len(),
            });
        }
        Ok(seq)
    }
}
