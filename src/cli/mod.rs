//! CLI implementation using clap.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::core::{Error, Result};
use crate::report::ReportType;

/// Tally - code size metrics and copy-paste detection for explicit file sets.
///
/// Takes an already-resolved list of source files; no directory scanning.
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source files to analyze
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// File suffixes to keep, comma separated (default: keep all)
    #[arg(short, long, value_delimiter = ',')]
    pub suffixes: Vec<String>,

    /// Count functions matching the test-naming convention separately
    #[arg(long)]
    pub count_tests: bool,

    /// Report type: cli, txt, xml, csv, json or pmd
    #[arg(short = 't', long)]
    pub report_type: Option<String>,

    /// Report output file or directory (required for pmd; stream output when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip duplicate-fragment detection
    #[arg(long)]
    pub no_duplicates: bool,

    /// Minimum line span for a reported duplicate fragment
    #[arg(long)]
    pub min_lines: Option<usize>,

    /// Token window length for duplicate detection
    #[arg(long)]
    pub min_tokens: Option<usize>,
}

impl Cli {
    /// Fold command-line overrides into a loaded configuration.
    ///
    /// An unrecognized report type fails here, at configuration time.
    pub fn apply_to(&self, config: &mut Config) -> Result<()> {
        if !self.suffixes.is_empty() {
            config.suffixes = self.suffixes.clone();
        }
        if self.count_tests {
            config.count_tests = true;
        }
        if let Some(kind) = &self.report_type {
            config.report.kind = kind.parse::<ReportType>().map_err(Error::config)?;
        }
        if let Some(output) = &self.output {
            config.report.output = Some(output.clone());
        }
        if self.no_duplicates {
            config.duplicates.enabled = false;
        }
        if let Some(min_lines) = self.min_lines {
            config.duplicates.min_lines = min_lines;
        }
        if let Some(min_tokens) = self.min_tokens {
            config.duplicates.min_tokens = min_tokens;
        }
        Ok(())
    }

    /// Suffix-filter and de-duplicate the supplied paths, preserving order.
    pub fn resolved_files(&self, config: &Config) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        self.files
            .iter()
            .filter(|path| {
                if config.suffixes.is_empty() {
                    return true;
                }
                path.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| config.suffixes.iter().any(|s| s == ext))
            })
            .filter(|path| seen.insert((*path).clone()))
            .cloned()
            .collect()
    }
}
