//! Tally - code size metrics and copy-paste detection.
//!
//! Tally measures an explicit set of source files (total, comment and
//! logical lines, class and function counts, optional test-method counts),
//! detects duplicated token fragments across the set, and renders the
//! aggregated result through one of several report formatters.
//!
//! File discovery is the caller's job: the library takes an already-resolved,
//! de-duplicated list of paths and never scans directories.
//!
//! # Example
//!
//! ```no_run
//! use tally::analyzers::run_analysis;
//! use tally::config::Config;
//!
//! let config = Config::default();
//! let paths = vec!["src/a.php".into(), "src/b.php".into()];
//! let result = run_analysis(&paths, &config).unwrap();
//! println!(
//!     "{} logical lines, {} duplicate fragments",
//!     result.metrics.totals.logical_lines,
//!     result.duplicates.len()
//! );
//! ```

pub mod analyzers;
pub mod cli;
pub mod config;
pub mod core;
pub mod report;

pub use crate::core::{AnalysisResult, Error, Result};
