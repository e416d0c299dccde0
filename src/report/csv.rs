//! CSV formatter: one record per file plus a totals record.

use std::io::Write;

use super::Formatter;
use crate::core::{AnalysisResult, Result};

/// Per-file CSV dump of the project metrics.
pub struct CsvFormatter;

const HEADER: &str = "path,loc,cloc,ncloc,blank,lloc,classes,functions,test_functions";

fn quote(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

impl Formatter for CsvFormatter {
    fn render(&self, result: &AnalysisResult, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{HEADER}")?;
        for m in &result.metrics.files {
            writeln!(
                out,
                "{},{},{},{},{},{},{},{},{}",
                quote(&m.path),
                m.total_lines,
                m.comment_lines,
                m.non_comment_lines,
                m.blank_lines,
                m.logical_lines,
                m.classes,
                m.functions,
                m.test_functions
            )?;
        }
        let t = &result.metrics.totals;
        writeln!(
            out,
            "TOTAL,{},{},{},{},{},{},{},{}",
            t.total_lines,
            t.comment_lines,
            t.non_comment_lines,
            t.blank_lines,
            t.logical_lines,
            t.classes,
            t.functions,
            t.test_functions
        )?;
        Ok(())
    }
}
