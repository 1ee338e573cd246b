//! Human-readable rendering of parse failures via miette.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::syntax::{ParseError, TokenKind};

#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(chordtree::parse))]
pub struct ParseDiagnostic {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("{label}")]
    span: SourceSpan,
    label: String,
    #[help]
    help: Option<String>,
}

impl ParseDiagnostic {
    pub fn new(name: impl AsRef<str>, input: &str, error: &ParseError) -> Self {
        let span = error.span();
        Self {
            message: error.to_string(),
            src: NamedSource::new(name, input.to_string()),
            span: SourceSpan::from(span.start..span.end),
            label: label_for(error),
            help: help_for(error),
        }
    }
}

fn label_for(error: &ParseError) -> String {
    match error {
        ParseError::Lexical { .. } => "not a chord token".to_string(),
        ParseError::Syntax {
            found: TokenKind::End,
            ..
        } => "input ends here".to_string(),
        ParseError::Syntax { found, .. } => format!("unexpected {found}"),
        ParseError::InputTooLong { .. } => "over the length limit".to_string(),
    }
}

fn help_for(error: &ParseError) -> Option<String> {
    match error {
        ParseError::Lexical { .. } => Some(
            "chords are a note A-G, optional # or b, one of m maj7 M7 7 dim aug + sus4 sus2, \
             and an optional /bass"
                .to_string(),
        ),
        ParseError::Syntax { expected, .. } if !expected.is_empty() => {
            let names: Vec<String> = expected.iter().map(|k| k.to_string()).collect();
            Some(format!("expected one of: {}", names.join(", ")))
        }
        ParseError::Syntax { .. } => None,
        ParseError::InputTooLong { .. } => {
            Some("raise max_len in the config file or pass --max-len".to_string())
        }
    }
}
