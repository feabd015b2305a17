//! Clients for the external services the pipeline depends on
//!
//! All clients are blocking. Sequence retrieval and consequence
//! annotation go over HTTP with shared rate-limit handling; the
//! MaxEntScan scorer shells out to the published perl scripts.

pub mod ensembl;
pub mod maxentscan;
pub mod retry;
pub mod togows;

pub use ensembl::{Consequence, ConsequenceAnnotator, EnsemblVep};
pub use maxentscan::MaxEntScan;
pub use retry::{get_with_retry, Sleeper, ThreadSleeper};
pub use togows::TogowsSequenceSource;
