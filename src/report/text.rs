//! Plain-text summary formatter (cli and txt variants).

use std::io::Write;

use super::Formatter;
use crate::core::{AnalysisResult, Result};

/// Aligned human-readable summary, one section per concern.
pub struct TextFormatter;

const LABEL_WIDTH: usize = 36;

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

fn row(out: &mut dyn Write, label: &str, value: usize) -> std::io::Result<()> {
    writeln!(out, "  {label:<LABEL_WIDTH$}{value:>8}")
}

fn row_pct(out: &mut dyn Write, label: &str, value: usize, whole: usize) -> std::io::Result<()> {
    writeln!(
        out,
        "  {label:<LABEL_WIDTH$}{value:>8} ({:.2}%)",
        percent(value, whole)
    )
}

impl Formatter for TextFormatter {
    fn render(&self, result: &AnalysisResult, out: &mut dyn Write) -> Result<()> {
        let totals = &result.metrics.totals;

        writeln!(out, "Files analyzed: {}", totals.files)?;
        writeln!(out)?;

        writeln!(out, "Size")?;
        row(out, "Lines of Code (LOC)", totals.total_lines)?;
        row_pct(
            out,
            "Comment Lines of Code (CLOC)",
            totals.comment_lines,
            totals.total_lines,
        )?;
        row_pct(
            out,
            "Non-Comment Lines of Code (NCLOC)",
            totals.non_comment_lines,
            totals.total_lines,
        )?;
        row_pct(
            out,
            "Logical Lines of Code (LLOC)",
            totals.logical_lines,
            totals.total_lines,
        )?;
        row(out, "Blank Lines", totals.blank_lines)?;
        writeln!(
            out,
            "  {:<LABEL_WIDTH$}{:>8.2}",
            "Average LLOC per File", totals.avg_logical_lines
        )?;
        writeln!(out)?;

        writeln!(out, "Structure")?;
        row(out, "Classes", totals.classes)?;
        row(out, "Functions", totals.functions)?;
        row(out, "Test Functions", totals.test_functions)?;
        writeln!(out)?;

        writeln!(out, "Duplication")?;
        row(out, "Fragments", result.duplicates.len())?;
        row_pct(
            out,
            "Duplicated Lines",
            result.duplicated_lines(),
            totals.total_lines,
        )?;
        for fragment in &result.duplicates {
            let occ: Vec<String> = fragment
                .occurrences
                .iter()
                .map(|o| format!("{}:{}-{}", o.file, o.start_line, o.end_line))
                .collect();
            writeln!(
                out,
                "  {} ({} lines, {} tokens)",
                occ.join(" <-> "),
                fragment.lines,
                fragment.tokens
            )?;
        }

        if !result.warnings.is_empty() {
            writeln!(out)?;
            writeln!(out, "Warnings")?;
            for warning in &result.warnings {
                writeln!(out, "  {}: {}", warning.path, warning.message)?;
            }
        }

        Ok(())
    }
}
