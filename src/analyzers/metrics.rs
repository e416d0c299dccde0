//! Size and structure metrics per file.

use rayon::prelude::*;

use super::tokens::{tokenize, LineClass, Token, TokenKind};
use super::{AnalysisContext, Analyzer};
use crate::core::{FileMetrics, Result, SourceFile, Warning};

const CLASS_KEYWORDS: &[&str] = &["class", "interface", "trait"];
const FUNCTION_KEYWORDS: &[&str] = &["function", "fn", "def", "func"];

/// Metrics analyzer: line classification plus a structural scan for
/// class and function declarations.
#[derive(Debug, Default)]
pub struct MetricsAnalyzer {
    count_tests: bool,
}

/// Per-file metrics plus the warnings collected while producing them.
#[derive(Debug, Default)]
pub struct MetricsAnalysis {
    pub files: Vec<FileMetrics>,
    pub warnings: Vec<Warning>,
}

impl MetricsAnalyzer {
    pub fn new(count_tests: bool) -> Self {
        Self { count_tests }
    }

    /// Analyze a single loaded source file.
    pub fn analyze_file(&self, file: &SourceFile) -> (FileMetrics, Vec<Warning>) {
        let source = file.content_str();
        let scanned = tokenize(&source);

        let mut metrics = FileMetrics::empty(file.path_str());
        metrics.total_lines = scanned.line_classes.len();
        for class in &scanned.line_classes {
            match class {
                LineClass::Blank => metrics.blank_lines += 1,
                LineClass::Comment => metrics.comment_lines += 1,
                LineClass::Code => metrics.logical_lines += 1,
            }
        }
        metrics.non_comment_lines = metrics.total_lines - metrics.comment_lines;

        self.scan_structure(&scanned.tokens, &mut metrics);

        let warnings = scanned
            .diagnostics
            .into_iter()
            .map(|message| Warning::new(&file.path, message))
            .collect();
        (metrics, warnings)
    }

    /// Walk the token stream counting class and function declarations.
    ///
    /// A declaration is a keyword token immediately followed by an identifier,
    /// so anonymous functions and keyword-named variables are not counted.
    fn scan_structure(&self, tokens: &[Token], metrics: &mut FileMetrics) {
        let mut pending_comment: Option<&str> = None;
        let mut iter = tokens.iter().peekable();

        while let Some(token) = iter.next() {
            match token.kind {
                TokenKind::Comment => {
                    pending_comment = Some(&token.text);
                    continue;
                }
                // A statement boundary detaches the comment from whatever
                // follows; only modifier-style identifiers may sit between
                // an annotation and its declaration.
                TokenKind::Punct if matches!(token.text.as_str(), ";" | "{" | "}") => {
                    pending_comment = None;
                    continue;
                }
                TokenKind::Ident => {}
                _ => continue,
            }
            let keyword = token.text.as_str();
            let name = match iter.peek() {
                Some(t) if t.kind == TokenKind::Ident => t.text.as_str(),
                _ => continue,
            };

            if CLASS_KEYWORDS.contains(&keyword) {
                metrics.classes += 1;
            } else if FUNCTION_KEYWORDS.contains(&keyword) {
                metrics.functions += 1;
                if self.count_tests && is_test_function(name, pending_comment) {
                    metrics.test_functions += 1;
                }
                // A doc comment annotates at most one declaration.
                pending_comment = None;
            }
        }
    }
}

/// Test convention: name starts with `test` (case-insensitive) or the
/// preceding comment carries a `@test` annotation.
fn is_test_function(name: &str, doc: Option<&str>) -> bool {
    let starts_with_test = name
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("test"));
    starts_with_test || doc.is_some_and(|d| d.contains("@test"))
}

impl Analyzer for MetricsAnalyzer {
    type Output = MetricsAnalysis;

    fn name(&self) -> &'static str {
        "metrics"
    }

    fn description(&self) -> &'static str {
        "Count lines, logical lines, comments, classes and functions"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Self::Output> {
        // Per-file work is independent; order-preserving collect keeps the
        // output identical to a sequential run.
        let results: Vec<(FileMetrics, Vec<Warning>)> = ctx
            .sources
            .par_iter()
            .map(|file| self.analyze_file(file))
            .collect();

        let mut out = MetricsAnalysis::default();
        for (metrics, warnings) in results {
            out.files.push(metrics);
            out.warnings.extend(warnings);
        }
        Ok(out)
    }
}
