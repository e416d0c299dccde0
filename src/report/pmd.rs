//! PMD-CPD XML formatter.
//!
//! Renders only the duplicate fragments, in the schema PMD's copy-paste
//! detector emits. The schema has no inline representation, so the sink
//! must be a file; [`super::write_report`] and configuration validation
//! both enforce that.

use std::io::Write;

use super::{xml_escape, Formatter};
use crate::core::{AnalysisResult, Result};

pub struct PmdFormatter;

impl Formatter for PmdFormatter {
    fn render(&self, result: &AnalysisResult, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(out, "<pmd-cpd>")?;
        for fragment in &result.duplicates {
            writeln!(
                out,
                "  <duplication lines=\"{}\" tokens=\"{}\">",
                fragment.lines, fragment.tokens
            )?;
            for occ in &fragment.occurrences {
                writeln!(
                    out,
                    "    <file path=\"{}\" line=\"{}\" endline=\"{}\"/>",
                    xml_escape(&occ.file),
                    occ.start_line,
                    occ.end_line
                )?;
            }
            writeln!(out, "  </duplication>")?;
        }
        writeln!(out, "</pmd-cpd>")?;
        Ok(())
    }
}
