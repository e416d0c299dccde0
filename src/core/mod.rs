//! Core types shared across analyzers and formatters.

mod error;
mod metrics;
mod result;
mod source_file;

pub use error::{Error, Result};
pub use metrics::{FileMetrics, FileTotals, ProjectMetrics};
pub use result::{aggregate, AnalysisResult, DuplicateFragment, FragmentOccurrence, Warning};
pub use source_file::SourceFile;
