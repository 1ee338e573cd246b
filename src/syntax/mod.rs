//! Chord notation front end: lexer → table-driven parser → syntax tree.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod recovery;
pub mod table;
pub mod token;
pub mod tree;

pub use ast::{Body, Chord, ChordProgression, ChordQuality, SourceFile};
pub use error::ParseError;
pub use token::{Span, Token, TokenKind};
pub use tree::{Field, Node, SyntaxKind, Tree};

use serde::{Deserialize, Serialize};

use lexer::Lexer;
use parser::Parser;

/// Which language the lexer and parser accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Grammar {
    /// A single chord; `-` is not a token.
    Chord,
    /// A single chord or a dash-separated progression.
    #[default]
    Progression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub grammar: Grammar,
    /// Reject inputs longer than this many bytes before lexing.
    pub max_len: Option<usize>,
}

/// Reusable parser entry point. Holds only options, so one instance can be
/// shared across threads; every call builds its own lexer and stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChordParser {
    options: ParseOptions,
}

impl ChordParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn grammar(mut self, grammar: Grammar) -> Self {
        self.options.grammar = grammar;
        self
    }

    pub fn max_len(mut self, max_len: usize) -> Self {
        self.options.max_len = Some(max_len);
        self
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    pub fn parse(&self, input: &str) -> Result<Tree, ParseError> {
        self.parse_bytes(input.as_bytes())
    }

    /// Parse raw bytes. Anything outside the ASCII token set, including
    /// invalid UTF-8, fails lexically.
    pub fn parse_bytes(&self, input: &[u8]) -> Result<Tree, ParseError> {
        self.check_len(input)?;
        Parser::new(Lexer::new(input, self.options.grammar)).parse()
    }

    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, ParseError> {
        self.check_len(input.as_bytes())?;
        Lexer::from_text(input, self.options.grammar).tokenize()
    }

    fn check_len(&self, input: &[u8]) -> Result<(), ParseError> {
        match self.options.max_len {
            Some(max) if input.len() > max => Err(ParseError::InputTooLong {
                len: input.len(),
                max,
            }),
            _ => Ok(()),
        }
    }
}

/// Parse a chord or a chord progression.
pub fn parse(input: &str) -> Result<Tree, ParseError> {
    ChordParser::new().parse(input)
}

/// Parse exactly one chord; `-` is a lexical error.
pub fn parse_chord(input: &str) -> Result<Tree, ParseError> {
    ChordParser::new().grammar(Grammar::Chord).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_chord_grammar_rejects_progressions() {
        assert!(parse_chord("Am").is_ok());
        let err = parse_chord("C - G").unwrap_err();
        assert!(err.is_lexical());
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn progression_grammar_accepts_single_chords() {
        let tree = parse("Dsus2").unwrap();
        assert_eq!(
            tree.root_node().child(0).unwrap().kind(),
            SyntaxKind::Chord
        );
    }

    #[test]
    fn max_len_is_enforced_before_lexing() {
        let parser = ChordParser::new().max_len(4);
        assert!(parser.parse("C-G").is_ok());
        let err = parser.parse("C - G").unwrap_err();
        assert_eq!(err, ParseError::InputTooLong { len: 5, max: 4 });
    }

    #[test]
    fn invalid_utf8_is_lexical() {
        let err = ChordParser::new().parse_bytes(b"C/\xc3").unwrap_err();
        assert!(err.is_lexical());
        assert_eq!(err.offset(), 2);
        assert_eq!(err.span(), Span::new(2, 3));
    }

    #[test]
    fn lexical_span_stays_inside_raw_input() {
        let err = ChordParser::new().parse_bytes(b"C\xff").unwrap_err();
        assert_eq!(err.span(), Span::new(1, 2));
        match err {
            ParseError::Lexical { found, .. } => assert_eq!(found, "\u{fffd}"),
            other => panic!("expected lexical error, got {other:?}"),
        }
    }

    #[test]
    fn tokenize_respects_grammar() {
        let kinds: Vec<TokenKind> = ChordParser::new()
            .tokenize("C-G")
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Note,
                TokenKind::Dash,
                TokenKind::Note,
                TokenKind::End
            ]
        );
        assert!(ChordParser::new()
            .grammar(Grammar::Chord)
            .tokenize("C-G")
            .is_err());
    }

    #[test]
    fn grammar_deserializes_lowercase() {
        let grammar: Grammar = serde_yaml::from_str("chord").unwrap();
        assert_eq!(grammar, Grammar::Chord);
    }
}
