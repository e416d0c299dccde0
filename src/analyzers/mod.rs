//! Analyzers and the analysis pipeline.

pub mod duplicates;
pub mod metrics;
pub mod tokens;

use std::path::PathBuf;

use crate::config::Config;
use crate::core::{aggregate, AnalysisResult, Result, SourceFile, Warning};

pub use duplicates::DuplicateDetector;
pub use metrics::{MetricsAnalysis, MetricsAnalyzer};

/// Trait implemented by all analyzers.
pub trait Analyzer {
    /// The result type produced by this analyzer.
    type Output;

    /// Unique identifier for this analyzer.
    fn name(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// Run analysis over the loaded sources.
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Self::Output>;
}

/// Context shared by all analyzers during analysis.
pub struct AnalysisContext<'a> {
    /// Loaded sources, in input order.
    pub sources: &'a [SourceFile],
    /// Configuration.
    pub config: &'a Config,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(sources: &'a [SourceFile], config: &'a Config) -> Self {
        Self { sources, config }
    }
}

/// Load the supplied paths, skipping unreadable files with a warning.
///
/// A single unreadable file never aborts the run; it is recorded and the
/// remaining files are analyzed normally.
pub fn load_sources(paths: &[PathBuf]) -> (Vec<SourceFile>, Vec<Warning>) {
    let mut sources = Vec::with_capacity(paths.len());
    let mut warnings = Vec::new();
    for path in paths {
        match SourceFile::load(path) {
            Ok(file) => sources.push(file),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "skipping unreadable file");
                warnings.push(Warning::new(path.clone(), format!("unreadable: {err}")));
            }
        }
    }
    (sources, warnings)
}

/// Run the full pipeline over a resolved file list: load, measure, detect
/// duplicates (when enabled) and aggregate into one result object.
pub fn run_analysis(paths: &[PathBuf], config: &Config) -> Result<AnalysisResult> {
    let (sources, mut warnings) = load_sources(paths);
    let ctx = AnalysisContext::new(&sources, config);

    let metrics = MetricsAnalyzer::new(config.count_tests).analyze(&ctx)?;
    warnings.extend(metrics.warnings);

    let duplicates = if config.duplicates.enabled {
        DuplicateDetector::from_config(&config.duplicates).analyze(&ctx)?
    } else {
        Vec::new()
    };

    Ok(aggregate(metrics.files, duplicates, warnings))
}
