//! Best-effort progression parsing, layered on the strict parser.
//!
//! The core automaton stops at the first error. For editor-style use this
//! module splits a progression at its `-` separators and runs the unchanged
//! single-chord parser on each segment, so one bad chord does not hide the
//! others. `-` is a single byte and never part of another token, which makes
//! the byte-level split exact.

use std::sync::Arc;

use super::error::ParseError;
use super::lexer::{self, Lexer};
use super::parser::Parser;
use super::token::Span;
use super::tree::Tree;
use super::Grammar;

/// One `-`-delimited piece of the input and its parse result.
///
/// Trees and errors carry offsets into the whole input, not the segment.
#[derive(Debug, Clone)]
pub struct Segment {
    pub span: Span,
    pub result: Result<Tree, ParseError>,
}

#[derive(Debug, Clone, Default)]
pub struct LenientParse {
    pub segments: Vec<Segment>,
}

impl LenientParse {
    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.segments.iter().filter_map(|s| s.result.as_ref().ok())
    }

    pub fn errors(&self) -> impl Iterator<Item = &ParseError> {
        self.segments.iter().filter_map(|s| s.result.as_ref().err())
    }

    /// True when every segment parsed.
    pub fn is_clean(&self) -> bool {
        self.errors().next().is_none()
    }
}

/// Parse every `-`-separated segment of `input` as a single chord. All
/// resulting trees share one copy of `input`.
pub fn parse_lenient(input: &str) -> LenientParse {
    let bytes = input.as_bytes();
    let source: Arc<str> = Arc::from(input);
    let mut segments = Vec::new();
    let mut start = 0;

    loop {
        let end = bytes[start..]
            .iter()
            .position(|&b| b == b'-')
            .map_or(bytes.len(), |i| start + i);

        let lexer = Lexer::with_range(bytes, start..end, Grammar::Chord);
        segments.push(Segment {
            span: trimmed(bytes, start, end),
            result: Parser::new(lexer).with_source(Arc::clone(&source)).parse(),
        });

        if end == bytes.len() {
            break;
        }
        start = end + 1;
    }

    LenientParse { segments }
}

fn trimmed(bytes: &[u8], mut start: usize, mut end: usize) -> Span {
    while start < end && lexer::is_skip(bytes[start]) {
        start += 1;
    }
    while end > start && lexer::is_skip(bytes[end - 1]) {
        end -= 1;
    }
    Span::new(start, end)
}
