//! Aggregated analysis result shared by every formatter.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::metrics::{FileMetrics, ProjectMetrics};

/// One location of a duplicated token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentOccurrence {
    /// File the fragment appears in.
    pub file: String,
    /// 1-based first line of the fragment.
    pub start_line: usize,
    /// 1-based last line of the fragment.
    pub end_line: usize,
}

/// A maximal token sequence appearing identically in two or more locations.
///
/// Occurrences are ordered by detection position; there are always at least
/// two, and within one file they never overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateFragment {
    pub occurrences: Vec<FragmentOccurrence>,
    /// Line span of the fragment at its first occurrence.
    pub lines: usize,
    /// Number of significant tokens in the shared sequence.
    pub tokens: usize,
}

impl DuplicateFragment {
    /// The occurrence used for ordering and reporting headers.
    pub fn first(&self) -> &FragmentOccurrence {
        &self.occurrences[0]
    }
}

/// A recorded per-file problem that did not abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub path: String,
    pub message: String,
}

impl Warning {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into().display().to_string(),
            message: message.into(),
        }
    }
}

/// The one result object a run produces.
///
/// Owns the project metrics, the detected duplicate fragments (detection
/// order) and the per-file warnings collected along the way. Formatters
/// receive it by shared reference and never mutate it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub metrics: ProjectMetrics,
    pub duplicates: Vec<DuplicateFragment>,
    pub warnings: Vec<Warning>,
}

impl AnalysisResult {
    /// Total number of duplicated source lines across all fragments.
    pub fn duplicated_lines(&self) -> usize {
        self.duplicates
            .iter()
            .map(|f| f.lines * f.occurrences.len())
            .sum()
    }

    /// Share of duplicated lines in the project, in percent.
    pub fn duplication_ratio(&self) -> f64 {
        let total = self.metrics.totals.total_lines;
        if total == 0 {
            return 0.0;
        }
        self.duplicated_lines() as f64 * 100.0 / total as f64
    }
}

/// Combine per-file metrics, duplicate fragments and warnings into one result.
///
/// Pure combination, no I/O. Project totals are recomputed from the supplied
/// per-file data rather than trusted from the caller.
pub fn aggregate(
    files: Vec<FileMetrics>,
    duplicates: Vec<DuplicateFragment>,
    warnings: Vec<Warning>,
) -> AnalysisResult {
    AnalysisResult {
        metrics: ProjectMetrics::from_files(files),
        duplicates,
        warnings,
    }
}
