//! Token types for the chord lexer.

use serde::Serialize;

/// Half-open byte range into the parsed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// The exact bytes this token matched, as text.
    ///
    /// Every token the lexer accepts is ASCII, so this only returns an empty
    /// string when `source` is not the input the token came from.
    pub fn text<'s>(&self, source: &'s [u8]) -> &'s str {
        source
            .get(self.span.start..self.span.end)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .unwrap_or("")
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    // Pitch
    Note, // A-G
    Sharp,
    Flat,

    // Quality markers
    Minor, // m
    Maj7,  // maj7
    M7,    // M7
    Seven, // 7
    Dim,
    Aug,
    Plus, // +
    Sus4,
    Sus2,

    // Separators
    Slash,
    Dash,

    // Special
    End,
}

impl TokenKind {
    /// Every quality marker, in declaration order.
    pub const QUALITIES: [TokenKind; 9] = [
        TokenKind::Minor,
        TokenKind::Maj7,
        TokenKind::M7,
        TokenKind::Seven,
        TokenKind::Dim,
        TokenKind::Aug,
        TokenKind::Plus,
        TokenKind::Sus4,
        TokenKind::Sus2,
    ];

    /// Display text: the literal for fixed tokens, a name for the rest.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Note => "note",
            TokenKind::Sharp => "#",
            TokenKind::Flat => "b",
            TokenKind::Minor => "m",
            TokenKind::Maj7 => "maj7",
            TokenKind::M7 => "M7",
            TokenKind::Seven => "7",
            TokenKind::Dim => "dim",
            TokenKind::Aug => "aug",
            TokenKind::Plus => "+",
            TokenKind::Sus4 => "sus4",
            TokenKind::Sus2 => "sus2",
            TokenKind::Slash => "/",
            TokenKind::Dash => "-",
            TokenKind::End => "end",
        }
    }

    pub fn is_quality(self) -> bool {
        Self::QUALITIES.contains(&self)
    }

    /// Only note letters carry a name in the tree; punctuation is anonymous.
    pub fn is_named(self) -> bool {
        matches!(self, TokenKind::Note)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Note | TokenKind::End => f.write_str(self.as_str()),
            _ => write!(f, "'{}'", self.as_str()),
        }
    }
}
