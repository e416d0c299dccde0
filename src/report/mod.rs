//! Report formatters for analysis results.
//!
//! A closed set of formatter variants selected by [`ReportType`]; unknown
//! type names fail at configuration time, before any analysis runs.

mod csv;
mod json;
mod pmd;
mod text;
mod xml;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{AnalysisResult, Error, Result};

pub use csv::CsvFormatter;
pub use json::JsonFormatter;
pub use pmd::PmdFormatter;
pub use text::TextFormatter;
pub use xml::XmlFormatter;

/// Report variant selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    /// Human-readable summary on the output stream.
    #[default]
    Cli,
    /// Same summary, conventionally written to a file.
    Txt,
    /// Structured XML dump of metrics and duplications.
    Xml,
    /// One CSV record per file plus totals.
    Csv,
    /// Full result as JSON.
    Json,
    /// PMD-CPD XML, duplications only. Requires a file sink.
    Pmd,
}

impl ReportType {
    /// Conventional file extension for this variant.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportType::Cli | ReportType::Txt => "txt",
            ReportType::Xml | ReportType::Pmd => "xml",
            ReportType::Csv => "csv",
            ReportType::Json => "json",
        }
    }
}

impl std::str::FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cli" => Ok(Self::Cli),
            "txt" => Ok(Self::Txt),
            "xml" => Ok(Self::Xml),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pmd" => Ok(Self::Pmd),
            _ => Err(format!(
                "unrecognized report type: {s}. Use cli, txt, xml, csv, json or pmd"
            )),
        }
    }
}

/// Strategy object rendering an aggregated result to an output sink.
pub trait Formatter {
    fn render(&self, result: &AnalysisResult, out: &mut dyn Write) -> Result<()>;
}

/// Select the formatter implementation for a report type.
pub fn formatter_for(kind: ReportType) -> Box<dyn Formatter> {
    match kind {
        ReportType::Cli | ReportType::Txt => Box::new(TextFormatter),
        ReportType::Xml => Box::new(XmlFormatter),
        ReportType::Csv => Box::new(CsvFormatter),
        ReportType::Json => Box::new(JsonFormatter),
        ReportType::Pmd => Box::new(PmdFormatter),
    }
}

/// Render a result to the selected sink, flushing on every exit path.
///
/// A directory sink gets a default file name, `tally-report` plus the
/// type's conventional extension. Sink write failures are fatal. The pmd
/// variant has no inline stream representation and refuses to run without
/// a file sink; configuration validation normally rejects that combination
/// before analysis starts.
pub fn write_report(kind: ReportType, output: Option<&Path>, result: &AnalysisResult) -> Result<()> {
    let formatter = formatter_for(kind);
    match output {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(format!("tally-report.{}", kind.extension()))
            } else {
                path.to_path_buf()
            };
            let file = File::create(&path)?;
            let mut writer = BufWriter::new(file);
            formatter.render(result, &mut writer)?;
            writer.flush()?;
        }
        None => {
            if kind == ReportType::Pmd {
                return Err(Error::config(
                    "pmd report type can only write to a file, set an output path",
                ));
            }
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            formatter.render(result, &mut lock)?;
            lock.flush()?;
        }
    }
    Ok(())
}

/// Escape XML attribute and text content.
pub(crate) fn xml_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
