//! Configuration loading and validation.
//!
//! One immutable [`Config`] is assembled from defaults, an optional TOML
//! file and `TALLY_`-prefixed environment variables, then validated
//! atomically before the pipeline starts. No analysis runs and nothing is
//! written when validation fails.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::report::ReportType;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File suffixes to keep; empty accepts every supplied path. The filter
    /// is applied by the caller layer over an already-resolved file list.
    pub suffixes: Vec<String>,
    /// Count functions matching the test-naming convention separately.
    pub count_tests: bool,
    /// Report selection and sink.
    pub report: ReportConfig,
    /// Duplicate-fragment detection thresholds.
    pub duplicates: DuplicatesConfig,
}

/// Report variant and output sink.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Formatter variant.
    pub kind: ReportType,
    /// Output file; stream output when absent. Required for `pmd`.
    pub output: Option<PathBuf>,
}

/// Duplicate detection configuration.
///
/// The defaults match phpcpd's documented thresholds: a fragment must span
/// at least 5 lines and 70 tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicatesConfig {
    /// Run duplicate detection at all.
    pub enabled: bool,
    /// Minimum line span for a reported fragment.
    pub min_lines: usize,
    /// Token window length for the rolling hash.
    pub min_tokens: usize,
}

impl Default for DuplicatesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_lines: 5,
            min_tokens: 70,
        }
    }
}

impl Config {
    /// Load configuration from an explicit file path.
    ///
    /// Errors if the file does not exist. Env vars with `TALLY_` prefix
    /// override file values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file_exact(path))
            .merge(Env::prefixed("TALLY_").split("__"))
            .extract()
            .map_err(|e| Error::config(e.to_string()))?;
        Ok(config)
    }

    /// Load configuration from a directory, looking for `tally.toml`.
    ///
    /// A missing file is silently skipped (defaults are used). Env vars
    /// with `TALLY_` prefix override file/default values.
    pub fn load_default(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(dir.join("tally.toml")))
            .merge(Env::prefixed("TALLY_").split("__"))
            .extract()
            .map_err(|e| Error::config(e.to_string()))?;
        Ok(config)
    }

    /// Validate the assembled configuration before any file is read.
    pub fn validate(&self) -> Result<()> {
        if self.report.kind == ReportType::Pmd && self.report.output.is_none() {
            return Err(Error::config(
                "pmd report type can only write to a file, set an output path",
            ));
        }
        if self.duplicates.enabled {
            if self.duplicates.min_tokens == 0 {
                return Err(Error::config("duplicates.min_tokens must be at least 1"));
            }
            if self.duplicates.min_lines == 0 {
                return Err(Error::config("duplicates.min_lines must be at least 1"));
            }
        }
        Ok(())
    }
}
