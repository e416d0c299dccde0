//! Structured XML formatter: full metrics dump plus duplications.

use std::io::Write;

use super::{xml_escape, Formatter};
use crate::core::{AnalysisResult, FileMetrics, Result};

/// Machine-readable XML rendering of the whole result.
pub struct XmlFormatter;

fn file_attrs(m: &FileMetrics) -> String {
    format!(
        "loc=\"{}\" cloc=\"{}\" ncloc=\"{}\" blank=\"{}\" lloc=\"{}\" \
         classes=\"{}\" functions=\"{}\" testFunctions=\"{}\"",
        m.total_lines,
        m.comment_lines,
        m.non_comment_lines,
        m.blank_lines,
        m.logical_lines,
        m.classes,
        m.functions,
        m.test_functions
    )
}

impl Formatter for XmlFormatter {
    fn render(&self, result: &AnalysisResult, out: &mut dyn Write) -> Result<()> {
        let totals = &result.metrics.totals;

        writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(out, "<metrics files=\"{}\">", totals.files)?;
        writeln!(
            out,
            "  <totals loc=\"{}\" cloc=\"{}\" ncloc=\"{}\" blank=\"{}\" lloc=\"{}\" \
             classes=\"{}\" functions=\"{}\" testFunctions=\"{}\" avgLloc=\"{:.2}\"/>",
            totals.total_lines,
            totals.comment_lines,
            totals.non_comment_lines,
            totals.blank_lines,
            totals.logical_lines,
            totals.classes,
            totals.functions,
            totals.test_functions,
            totals.avg_logical_lines
        )?;

        for file in &result.metrics.files {
            writeln!(
                out,
                "  <file name=\"{}\" {}/>",
                xml_escape(&file.path),
                file_attrs(file)
            )?;
        }

        writeln!(
            out,
            "  <duplications fragments=\"{}\" duplicatedLines=\"{}\">",
            result.duplicates.len(),
            result.duplicated_lines()
        )?;
        for fragment in &result.duplicates {
            writeln!(
                out,
                "    <duplication lines=\"{}\" tokens=\"{}\">",
                fragment.lines, fragment.tokens
            )?;
            for occ in &fragment.occurrences {
                writeln!(
                    out,
                    "      <file path=\"{}\" startLine=\"{}\" endLine=\"{}\"/>",
                    xml_escape(&occ.file),
                    occ.start_line,
                    occ.end_line
                )?;
            }
            writeln!(out, "    </duplication>")?;
        }
        writeln!(out, "  </duplications>")?;

        if !result.warnings.is_empty() {
            writeln!(out, "  <warnings>")?;
            for warning in &result.warnings {
                writeln!(
                    out,
                    "    <warning path=\"{}\" message=\"{}\"/>",
                    xml_escape(&warning.path),
                    xml_escape(&warning.message)
                )?;
            }
            writeln!(out, "  </warnings>")?;
        }

        writeln!(out, "</metrics>")?;
        Ok(())
    }
}
