//! MaxEntScan splice-site scoring via the published perl scripts
//!
//! `score5.pl` expects 9 nt donor sequences and `score3.pl` expects
//! 23 nt acceptor sequences, one per line in a file passed as the sole
//! argument. Each output line is the input sequence followed by its
//! maximum-entropy score; the score is the last whitespace-separated
//! token.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use tempfile::NamedTempFile;

use crate::error::PriorsError;
use crate::scoring::{SpliceScorer, SpliceSiteKind};

/// [`SpliceScorer`] that shells out to the MaxEntScan perl scripts.
///
/// The scripts read their model tables from paths relative to the
/// current directory, so the child process runs with `script_dir` as
/// its working directory.
pub struct MaxEntScan {
    script_dir: PathBuf,
}

impl MaxEntScan {
    pub fn new(script_dir: impl Into<PathBuf>) -> Self {
        Self {
            script_dir: script_dir.into(),
        }
    }

    fn script_name(site: SpliceSiteKind) -> &'static str {
        match site {
            SpliceSiteKind::Donor => "score5.pl",
            SpliceSiteKind::Acceptor => "score3.pl",
        }
    }

    fn expected_length(site: SpliceSiteKind) -> usize {
        match site {
            SpliceSiteKind::Donor => 9,
            SpliceSiteKind::Acceptor => 23,
        }
    }

    fn temp_input(sequence: &str) -> Result<NamedTempFile, PriorsError> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{sequence}")?;
        file.flush()?;
        Ok(file)
    }
}

/// Pull the score out of the first non-empty output line
fn parse_score(stdout: &str) -> Option<f64> {
    stdout
        .lines()
        .find(|line| !line.trim().is_empty())?
        .split_whitespace()
        .last()?
        .parse()
        .ok()
}

impl SpliceScorer for MaxEntScan {
    fn score(&self, sequence: &str, site: SpliceSiteKind) -> Result<f64, PriorsError> {
        let expected = Self::expected_length(site);
        if sequence.len() != expected {
            return Err(PriorsError::Scorer {
                msg: format!(
                    "{} requires {} nt input, got {} ({sequence})",
                    Self::script_name(site),
                    expected,
                    sequence.len()
                ),
            });
        }
        let input = Self::temp_input(sequence)?;
        let output = Command::new("perl")
            .arg(Self::script_name(site))
            .arg(input.path())
            .current_dir(&self.script_dir)
            .output()
            .map_err(|e| PriorsError::Scorer {
                msg: format!("failed to run {}: {e}", Self::script_name(site)),
            })?;
        if !output.status.success() {
            return Err(PriorsError::Scorer {
                msg: format!(
                    "{} exited with {}: {}",
                    Self::script_name(site),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_score(&stdout).ok_or_else(|| PriorsError::Scorer {
            msg: format!(
                "unparseable {} output: {:?}",
                Self::script_name(site),
                stdout.trim()
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_takes_last_token() {
        assert_eq!(parse_score("CAGGTAAGT\t10.08\n"), Some(10.08));
        assert_eq!(parse_score("CAGGTAAGT MAXENT: -3.50\n"), Some(-3.5));
    }

    #[test]
    fn test_parse_score_skips_blank_lines() {
        assert_eq!(parse_score("\n\nCAGGTAAGT\t4.20\n"), Some(4.2));
    }

    #[test]
    fn test_parse_score_rejects_garbage() {
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("no score here\n"), None);
    }

    #[test]
    fn test_wrong_length_rejected_before_invocation() {
        let scorer = MaxEntScan::new("/nonexistent");
        let err = scorer.score("CAGGT", SpliceSiteKind::Donor).unwrap_err();
        assert!(matches!(err, PriorsError::Scorer { .. }));
        let err = scorer
            .score("CAGGTAAGT", SpliceSiteKind::Acceptor)
            .unwrap_err();
        assert!(err.to_string().contains("23 nt"));
    }
}
