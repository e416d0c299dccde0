//! Per-file and project-level size metrics.

use serde::{Deserialize, Serialize};

/// Size and structure counts for one source file.
///
/// Immutable once computed by the metrics analyzer. `total_lines` is always
/// greater than or equal to `logical_lines`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetrics {
    /// Path the file was supplied under.
    pub path: String,
    /// Total number of lines (LOC).
    pub total_lines: usize,
    /// Lines consisting only of comment content (CLOC).
    pub comment_lines: usize,
    /// Lines that are not comment-only (NCLOC = LOC - CLOC).
    pub non_comment_lines: usize,
    /// Blank lines.
    pub blank_lines: usize,
    /// Lines carrying at least one code token (LLOC).
    pub logical_lines: usize,
    /// Class-like declarations (class, interface, trait).
    pub classes: usize,
    /// Named function and method declarations.
    pub functions: usize,
    /// Functions matching the test-naming convention. Only populated when
    /// test counting is enabled.
    pub test_functions: usize,
}

impl FileMetrics {
    /// All-zero metrics for a file, used for empty inputs.
    pub fn empty(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            total_lines: 0,
            comment_lines: 0,
            non_comment_lines: 0,
            blank_lines: 0,
            logical_lines: 0,
            classes: 0,
            functions: 0,
            test_functions: 0,
        }
    }
}

/// Summed counts across every analyzed file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileTotals {
    pub files: usize,
    pub total_lines: usize,
    pub comment_lines: usize,
    pub non_comment_lines: usize,
    pub blank_lines: usize,
    pub logical_lines: usize,
    pub classes: usize,
    pub functions: usize,
    pub test_functions: usize,
    /// Mean logical lines per file, 0.0 for an empty file set.
    pub avg_logical_lines: f64,
}

/// Aggregated metrics for the whole file set.
///
/// Owns one [`FileMetrics`] per input path, in input order. Totals are
/// recomputed from the per-file data at construction time and never mutated
/// afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectMetrics {
    pub files: Vec<FileMetrics>,
    pub totals: FileTotals,
}

impl ProjectMetrics {
    /// Build project metrics from per-file results, recomputing every total.
    pub fn from_files(files: Vec<FileMetrics>) -> Self {
        let mut totals = FileTotals {
            files: files.len(),
            ..FileTotals::default()
        };
        for m in &files {
            totals.total_lines += m.total_lines;
            totals.comment_lines += m.comment_lines;
            totals.non_comment_lines += m.non_comment_lines;
            totals.blank_lines += m.blank_lines;
            totals.logical_lines += m.logical_lines;
            totals.classes += m.classes;
            totals.functions += m.functions;
            totals.test_functions += m.test_functions;
        }
        if !files.is_empty() {
            totals.avg_logical_lines = totals.logical_lines as f64 / files.len() as f64;
        }
        Self { files, totals }
    }

    /// Look up metrics by path.
    pub fn get(&self, path: &str) -> Option<&FileMetrics> {
        self.files.iter().find(|m| m.path == path)
    }
}
