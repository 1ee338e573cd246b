//! Lexer for chord notation.
//!
//! A hand-built DFA over input bytes with longest-match semantics. The
//! parser pulls tokens one at a time through [`Lexer::next_token`].

use super::error::ParseError;
use super::token::{Span, Token, TokenKind};
use super::Grammar;

/// Scanner state. `Minor` is the only state that both accepts and can
/// continue (`m` may grow into `maj7`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Start,
    Minor,
    MinorA,
    MinorAj,
    UpperM,
    D,
    Di,
    A,
    Au,
    S,
    Su,
    Sus,
    Accept(TokenKind),
}

impl LexState {
    fn step(self, byte: u8, grammar: Grammar) -> Option<LexState> {
        use LexState::*;
        let next = match (self, byte) {
            (Start, b'A'..=b'G') => Accept(TokenKind::Note),
            (Start, b'#') => Accept(TokenKind::Sharp),
            (Start, b'b') => Accept(TokenKind::Flat),
            (Start, b'm') => Minor,
            (Start, b'M') => UpperM,
            (Start, b'7') => Accept(TokenKind::Seven),
            (Start, b'd') => D,
            (Start, b'a') => A,
            (Start, b'+') => Accept(TokenKind::Plus),
            (Start, b's') => S,
            (Start, b'/') => Accept(TokenKind::Slash),
            (Start, b'-') if grammar == Grammar::Progression => Accept(TokenKind::Dash),

            (Minor, b'a') => MinorA,
            (MinorA, b'j') => MinorAj,
            (MinorAj, b'7') => Accept(TokenKind::Maj7),
            (UpperM, b'7') => Accept(TokenKind::M7),
            (D, b'i') => Di,
            (Di, b'm') => Accept(TokenKind::Dim),
            (A, b'u') => Au,
            (Au, b'g') => Accept(TokenKind::Aug),
            (S, b'u') => Su,
            (Su, b's') => Sus,
            (Sus, b'4') => Accept(TokenKind::Sus4),
            (Sus, b'2') => Accept(TokenKind::Sus2),
            _ => return None,
        };
        Some(next)
    }

    fn accepts(self) -> Option<TokenKind> {
        match self {
            LexState::Minor => Some(TokenKind::Minor),
            LexState::Accept(kind) => Some(kind),
            _ => None,
        }
    }
}

pub(super) fn is_skip(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

pub struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    end: usize,
    grammar: Grammar,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a [u8], grammar: Grammar) -> Self {
        Self {
            source,
            pos: 0,
            end: source.len(),
            grammar,
            done: false,
        }
    }

    /// Lex only `range` of `source`. Spans stay relative to the whole input.
    pub fn with_range(source: &'a [u8], range: std::ops::Range<usize>, grammar: Grammar) -> Self {
        let end = range.end.min(source.len());
        Self {
            source,
            pos: range.start.min(end),
            end,
            grammar,
            done: false,
        }
    }

    pub fn from_text(source: &'a str, grammar: Grammar) -> Self {
        Self::new(source.as_bytes(), grammar)
    }

    pub fn source(&self) -> &'a [u8] {
        self.source
    }

    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    /// Produce the next token. After `End` has been returned once, every
    /// further call returns `End` again.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        while self.pos < self.end && is_skip(self.source[self.pos]) {
            self.pos += 1;
        }

        if self.pos >= self.end {
            self.done = true;
            return Ok(Token {
                kind: TokenKind::End,
                span: Span::empty(self.end),
            });
        }

        let start = self.pos;
        let mut state = LexState::Start;
        let mut cursor = start;
        let mut last_accept: Option<(TokenKind, usize)> = None;

        while cursor < self.end {
            match state.step(self.source[cursor], self.grammar) {
                Some(next) => {
                    state = next;
                    cursor += 1;
                    if let Some(kind) = state.accepts() {
                        last_accept = Some((kind, cursor));
                    }
                }
                None => break,
            }
        }

        match last_accept {
            Some((kind, end)) => {
                self.pos = end;
                Ok(Token {
                    kind,
                    span: Span::new(start, end),
                })
            }
            None => {
                let end = self.failed_end(start, cursor);
                Err(ParseError::Lexical {
                    span: Span::new(start, end),
                    found: String::from_utf8_lossy(&self.source[start..end]).into_owned(),
                })
            }
        }
    }

    /// Collect every token up to and including `End`.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            tokens.push(token);
            if token.kind == TokenKind::End {
                break;
            }
        }
        Ok(tokens)
    }

    /// End of a failed token attempt: what was scanned plus the byte that
    /// stopped the DFA (whole UTF-8 sequence, whitespace excluded).
    fn failed_end(&self, start: usize, stop: usize) -> usize {
        let mut end = stop;
        if end < self.end && (end == start || !is_skip(self.source[end])) {
            end += 1;
            while end < self.end && (0x80..0xC0).contains(&self.source[end]) {
                end += 1;
            }
        }
        end
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, ParseError>;

    /// Yields tokens up to and including `End`, or a single lexical error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}
