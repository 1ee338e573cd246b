//! Formatting parse results for the command line.

use serde::Serialize;

use crate::config::OutputFormat;
use crate::syntax::ast::{ChordSummary, SourceFile};
use crate::syntax::recovery::LenientParse;
use crate::syntax::{ParseError, Token, TokenKind, Tree};

#[derive(Serialize)]
struct JsonOutput<'a> {
    input: &'a str,
    chords: Vec<ChordSummary>,
    tree: &'a Tree,
}

/// Render a successful parse in any format. `Tokens` lists the tree's
/// leaves; use [`render_tokens`] to show the tokens of input that may not
/// parse.
pub fn render_tree(tree: &Tree, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Sexp => Ok(tree.to_sexp()),
        OutputFormat::Tokens => Ok(render_tokens(tree.source(), &tree.tokens())),
        OutputFormat::Json => {
            let chords: Vec<ChordSummary> = SourceFile::new(tree)
                .map(|file| file.chords().into_iter().map(ChordSummary::from).collect())
                .unwrap_or_default();
            serde_json::to_string_pretty(&JsonOutput {
                input: tree.source(),
                chords,
                tree,
            })
        }
    }
}

/// One line per token: `kind start..end text`.
pub fn render_tokens(input: &str, tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| {
            let name = match t.kind {
                TokenKind::Note | TokenKind::End => t.kind.as_str().to_string(),
                _ => format!("{:?}", t.kind).to_lowercase(),
            };
            format!(
                "{name} {}..{} {:?}",
                t.span.start,
                t.span.end,
                t.text(input.as_bytes())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One entry per segment of a lenient parse: the rendered tree, or the
/// segment's parse error.
pub fn render_lenient(
    result: &LenientParse,
    format: OutputFormat,
) -> Result<Vec<Result<String, ParseError>>, serde_json::Error> {
    result
        .segments
        .iter()
        .map(|segment| match &segment.result {
            Ok(tree) => render_tree(tree, format).map(Ok),
            Err(err) => Ok(Err(err.clone())),
        })
        .collect()
}
