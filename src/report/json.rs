//! JSON formatter: full result dump via serde.

use std::io::Write;

use super::Formatter;
use crate::core::{AnalysisResult, Result};

/// Serializes the complete [`AnalysisResult`]; parsing the output back
/// reproduces the per-file counts exactly.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn render(&self, result: &AnalysisResult, out: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, result)?;
        writeln!(out)?;
        Ok(())
    }
}
