//! Duplicate token-fragment detection.
//!
//! Windows of `min_tokens` significant tokens are hashed with a polynomial
//! rolling hash over per-token xxh3 values. The first occurrence of each
//! window hash is remembered; a later equal hash is verified token-by-token
//! (hash collisions never produce a report) and then extended to the maximal
//! contiguous match, so overlapping windows collapse into one fragment.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use rayon::prelude::*;
use xxhash_rust::xxh3::xxh3_64;

use super::tokens::{tokenize, Token, TokenKind};
use super::{AnalysisContext, Analyzer};
use crate::config::DuplicatesConfig;
use crate::core::{DuplicateFragment, FragmentOccurrence, Result, SourceFile};

/// Rolling hash base.
const BASE: u64 = 1_000_003;

/// A significant token: comments are excluded from the duplicate stream.
#[derive(Debug, Clone)]
struct SigToken {
    hash: u64,
    text: String,
    line: usize,
}

/// Duplicate detector with phpcpd-style thresholds.
#[derive(Debug)]
pub struct DuplicateDetector {
    min_lines: usize,
    min_tokens: usize,
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        let defaults = DuplicatesConfig::default();
        Self::new(defaults.min_lines, defaults.min_tokens)
    }
}

impl DuplicateDetector {
    pub fn new(min_lines: usize, min_tokens: usize) -> Self {
        Self {
            min_lines: min_lines.max(1),
            min_tokens: min_tokens.max(1),
        }
    }

    pub fn from_config(config: &DuplicatesConfig) -> Self {
        Self::new(config.min_lines, config.min_tokens)
    }

    /// Detect duplicated fragments across the loaded sources.
    ///
    /// Files are scanned in input order with ascending token positions, and
    /// the output is sorted by (first occurrence path, start line, end line),
    /// so repeated runs over unchanged input yield identical sequences.
    pub fn detect(&self, sources: &[SourceFile]) -> Vec<DuplicateFragment> {
        let streams: Vec<(String, Vec<SigToken>)> = sources
            .par_iter()
            .map(|file| (file.path_str(), significant_tokens(file)))
            .collect();

        let w = self.min_tokens;
        let mut first_seen: HashMap<u64, (usize, usize)> = HashMap::new();
        let mut fragments = Vec::new();

        for (fi, (_, tokens)) in streams.iter().enumerate() {
            if tokens.len() < w {
                continue;
            }
            let hashes = window_hashes(tokens, w);
            let mut i = 0;
            while i + w <= tokens.len() {
                match first_seen.entry(hashes[i]) {
                    Entry::Vacant(slot) => {
                        slot.insert((fi, i));
                        i += 1;
                    }
                    Entry::Occupied(slot) => {
                        let (f0, i0) = *slot.get();
                        let origin = &streams[f0].1;
                        let same_file = f0 == fi;
                        // Same-file matches must not overlap their origin.
                        let disjoint = !same_file || i0 + w <= i;
                        if disjoint && windows_equal(origin, i0, tokens, i, w) {
                            let len = extend_match(origin, i0, tokens, i, w, same_file);
                            if let Some(fragment) = self.fragment(
                                &streams[f0].0,
                                origin,
                                i0,
                                &streams[fi].0,
                                tokens,
                                i,
                                len,
                            ) {
                                fragments.push(fragment);
                            }
                            // Resume past the match: overlapping shorter
                            // matches merge into the longest one.
                            i += len;
                        } else {
                            i += 1;
                        }
                    }
                }
            }
        }

        fragments.sort_by(|a, b| {
            let ka = (&a.first().file, a.first().start_line, a.first().end_line);
            let kb = (&b.first().file, b.first().start_line, b.first().end_line);
            ka.cmp(&kb)
        });
        fragments
    }

    #[allow(clippy::too_many_arguments)]
    fn fragment(
        &self,
        origin_path: &str,
        origin: &[SigToken],
        i0: usize,
        path: &str,
        tokens: &[SigToken],
        i: usize,
        len: usize,
    ) -> Option<DuplicateFragment> {
        let first = FragmentOccurrence {
            file: origin_path.to_string(),
            start_line: origin[i0].line,
            end_line: origin[i0 + len - 1].line,
        };
        let lines = first.end_line - first.start_line + 1;
        if lines < self.min_lines {
            return None;
        }
        let second = FragmentOccurrence {
            file: path.to_string(),
            start_line: tokens[i].line,
            end_line: tokens[i + len - 1].line,
        };
        Some(DuplicateFragment {
            occurrences: vec![first, second],
            lines,
            tokens: len,
        })
    }
}

fn significant_tokens(file: &SourceFile) -> Vec<SigToken> {
    let source = file.content_str();
    tokenize(&source)
        .tokens
        .into_iter()
        .filter(|t| t.kind != TokenKind::Comment)
        .map(|t| SigToken {
            hash: token_hash(&t),
            line: t.line,
            text: t.text,
        })
        .collect()
}

fn token_hash(token: &Token) -> u64 {
    let tag: u8 = match token.kind {
        TokenKind::Ident => 0,
        TokenKind::Number => 1,
        TokenKind::Str => 2,
        TokenKind::Punct => 3,
        TokenKind::Comment => 4,
    };
    let mut bytes = Vec::with_capacity(token.text.len() + 1);
    bytes.push(tag);
    bytes.extend_from_slice(token.text.as_bytes());
    xxh3_64(&bytes)
}

/// Polynomial rolling hashes of every window of `w` tokens.
fn window_hashes(tokens: &[SigToken], w: usize) -> Vec<u64> {
    let mut top = 1u64;
    for _ in 0..w - 1 {
        top = top.wrapping_mul(BASE);
    }

    let mut hashes = Vec::with_capacity(tokens.len() - w + 1);
    let mut h = 0u64;
    for t in &tokens[..w] {
        h = h.wrapping_mul(BASE).wrapping_add(t.hash);
    }
    hashes.push(h);
    for i in w..tokens.len() {
        h = h
            .wrapping_sub(tokens[i - w].hash.wrapping_mul(top))
            .wrapping_mul(BASE)
            .wrapping_add(tokens[i].hash);
        hashes.push(h);
    }
    hashes
}

fn tokens_equal(a: &SigToken, b: &SigToken) -> bool {
    a.hash == b.hash && a.text == b.text
}

fn windows_equal(origin: &[SigToken], i0: usize, tokens: &[SigToken], i: usize, w: usize) -> bool {
    (0..w).all(|k| tokens_equal(&origin[i0 + k], &tokens[i + k]))
}

/// Extend a verified window match token-by-token to its maximal length.
fn extend_match(
    origin: &[SigToken],
    i0: usize,
    tokens: &[SigToken],
    i: usize,
    w: usize,
    same_file: bool,
) -> usize {
    let mut len = w;
    loop {
        let a = i0 + len;
        let b = i + len;
        if a >= origin.len() || b >= tokens.len() {
            break;
        }
        if same_file && a >= i {
            break;
        }
        if !tokens_equal(&origin[a], &tokens[b]) {
            break;
        }
        len += 1;
    }
    len
}

impl Analyzer for DuplicateDetector {
    type Output = Vec<DuplicateFragment>;

    fn name(&self) -> &'static str {
        "duplicates"
    }

    fn description(&self) -> &'static str {
        "Find duplicated token fragments across the file set"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Self::Output> {
        Ok(self.detect(ctx.sources))
    }
}
