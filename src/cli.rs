//! Command-line entry point for batch prior-probability runs

use std::path::PathBuf;

use clap::Parser;
use log::info;

use crate::error::PriorsError;
use crate::pipeline::Pipeline;
use crate::reference::domains::BoundaryProfile;
use crate::reference::ReferenceData;
use crate::scoring::ZScoreParams;
use crate::service::{MaxEntScan, TogowsSequenceSource};
use crate::tsv::{read_variants_from_path, write_records_to_path};

/// Classify BRCA1/BRCA2 variants and compute splice-site prior
/// probabilities
#[derive(Parser, Debug)]
#[command(name = "splice-priors", version, about)]
pub struct Args {
    /// Tab-separated input with Gene_Symbol, Chr, Pos, Ref, Alt,
    /// Reference_Sequence and HGVS_cDNA columns
    #[arg(short, long)]
    pub input: PathBuf,

    /// Where to write the tab-separated output table
    #[arg(short, long)]
    pub output: PathBuf,

    /// Clinically important domain set to classify against
    #[arg(short, long, default_value_t = BoundaryProfile::Enigma)]
    pub boundaries: BoundaryProfile,

    /// Worker threads for the batch (0 lets the pool decide)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Directory holding the MaxEntScan score5.pl and score3.pl scripts
    #[arg(short, long, default_value = ".")]
    pub maxentscan_dir: PathBuf,
}

pub fn run(args: &Args) -> Result<(), PriorsError> {
    if args.jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.jobs)
            .build_global()
            .map_err(|e| PriorsError::Io { msg: e.to_string() })?;
    }

    let variants = read_variants_from_path(&args.input)?;
    info!(
        "read {} variants from {}",
        variants.len(),
        args.input.display()
    );

    let pipeline = Pipeline::new(
        ReferenceData::canonical(),
        ZScoreParams::maxentscan_brca(),
        args.boundaries,
        TogowsSequenceSource::new(),
        MaxEntScan::new(&args.maxentscan_dir),
    );
    let outcome = pipeline.process_batch(&variants);

    write_records_to_path(&args.output, &outcome.records)?;
    info!(
        "wrote {} records to {} ({} scored, {} failed)",
        outcome.records.len(),
        args.output.display(),
        outcome.summary.scored,
        outcome.summary.failed
    );
    Ok(())
}
