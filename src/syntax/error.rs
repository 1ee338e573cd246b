//! Error types for the chord parser.

use thiserror::Error;

use super::token::{Span, TokenKind};

/// A failed parse. Both lexical and syntax errors are terminal: no tree is
/// produced and nothing is recovered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An input byte starts no valid token and is not whitespace.
    #[error("[{}] lexical error: unrecognized input '{found}'", .span.start)]
    Lexical { span: Span, found: String },

    /// A well-formed token arrived in a state with no action for it.
    #[error("[{}] syntax error: unexpected {found}{}", .span.start, expected_suffix(.expected))]
    Syntax {
        span: Span,
        state: usize,
        found: TokenKind,
        text: String,
        expected: Vec<TokenKind>,
    },

    /// Input rejected before lexing because it exceeds the configured limit.
    #[error("input too long ({len} bytes, max {max})")]
    InputTooLong { len: usize, max: usize },
}

impl ParseError {
    /// Lexical error whose text is exactly the offending input bytes.
    pub fn lexical(offset: usize, found: impl Into<String>) -> Self {
        let found = found.into();
        Self::Lexical {
            span: Span::new(offset, offset + found.len()),
            found,
        }
    }

    /// Byte offset the error is anchored at.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Lexical { span, .. } => span.start,
            ParseError::Syntax { span, .. } => span.start,
            ParseError::InputTooLong { max, .. } => *max,
        }
    }

    /// Byte range of the offending input.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lexical { span, .. } => *span,
            ParseError::Syntax { span, .. } => *span,
            ParseError::InputTooLong { len, max } => Span::new(*max, *len),
        }
    }

    /// Token kinds that would have been accepted, when known.
    pub fn expected(&self) -> &[TokenKind] {
        match self {
            ParseError::Syntax { expected, .. } => expected,
            _ => &[],
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::Lexical { .. })
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, ParseError::Syntax { .. })
    }
}

fn expected_suffix(expected: &[TokenKind]) -> String {
    if expected.is_empty() {
        return String::new();
    }
    let names: Vec<String> = expected.iter().map(|k| k.to_string()).collect();
    format!(", expected one of: {}", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexical_display() {
        let err = ParseError::lexical(0, "H");
        assert_eq!(err.to_string(), "[0] lexical error: unrecognized input 'H'");
        assert_eq!(err.span(), Span::new(0, 1));
    }

    #[test]
    fn syntax_display_lists_expected() {
        let err = ParseError::Syntax {
            span: Span::new(3, 4),
            state: 7,
            found: TokenKind::Seven,
            text: "7".to_string(),
            expected: vec![TokenKind::End, TokenKind::Slash],
        };
        assert_eq!(
            err.to_string(),
            "[3] syntax error: unexpected '7', expected one of: end, '/'"
        );
        assert_eq!(err.offset(), 3);
        assert!(err.is_syntax());
    }
}
