//! Syntax tree produced by the parser, and the query interface over it.
//!
//! Every node owns its children; the tree is built in one pass and never
//! mutated afterward. Re-parsing builds a fresh tree.

use std::sync::Arc;

use serde::{Serialize, Serializer};

use super::token::{Span, Token, TokenKind};

/// Node kind: one of the grammar's non-terminals, or a leaf token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    SourceFile,
    ChordProgression,
    Chord,
    Root,
    Accidental,
    Quality,
    Bass,
    Token(TokenKind),
}

impl SyntaxKind {
    pub fn name(self) -> &'static str {
        match self {
            SyntaxKind::SourceFile => "source_file",
            SyntaxKind::ChordProgression => "chord_progression",
            SyntaxKind::Chord => "chord",
            SyntaxKind::Root => "root",
            SyntaxKind::Accidental => "accidental",
            SyntaxKind::Quality => "quality",
            SyntaxKind::Bass => "bass",
            SyntaxKind::Token(kind) => kind.as_str(),
        }
    }

    pub fn is_named(self) -> bool {
        match self {
            SyntaxKind::Token(kind) => kind.is_named(),
            _ => true,
        }
    }
}

impl Serialize for SyntaxKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Named slot a child occupies in its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Root,
    Note,
    Accidental,
    Quality,
    Bass,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Root => "root",
            Field::Note => "note",
            Field::Accidental => "accidental",
            Field::Quality => "quality",
            Field::Bass => "bass",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        match name {
            "root" => Some(Field::Root),
            "note" => Some(Field::Note),
            "accidental" => Some(Field::Accidental),
            "quality" => Some(Field::Quality),
            "bass" => Some(Field::Bass),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    kind: SyntaxKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<Field>,
    #[serde(flatten)]
    span: Span,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
}

impl Node {
    pub(crate) fn leaf(token: Token) -> Self {
        Self {
            kind: SyntaxKind::Token(token.kind),
            field: None,
            span: token.span,
            children: Vec::new(),
        }
    }

    /// Build an interior node. `children` must be non-empty.
    pub(crate) fn branch(kind: SyntaxKind, children: Vec<Node>) -> Self {
        let span = children
            .iter()
            .map(|c| c.span)
            .reduce(Span::cover)
            .unwrap_or_default();
        Self {
            kind,
            field: None,
            span,
            children,
        }
    }

    pub(crate) fn with_field(mut self, field: Option<Field>) -> Self {
        self.field = field;
        self
    }

    pub(crate) fn into_children(self) -> Vec<Node> {
        self.children
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// The field this node fills in its parent, if any.
    pub fn field(&self) -> Option<Field> {
        self.field
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn is_named(&self) -> bool {
        self.kind.is_named()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// All children in source order, anonymous tokens included.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn named_children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(|c| c.is_named())
    }

    pub fn child_by_field(&self, field: Field) -> Option<&Node> {
        self.children.iter().find(|c| c.field == Some(field))
    }

    pub fn child_by_field_name(&self, name: &str) -> Option<&Node> {
        self.child_by_field(Field::from_name(name)?)
    }

    /// Children of the given kind, in source order.
    pub fn children_of_kind(&self, kind: SyntaxKind) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// Source text covered by this node.
    pub fn utf8_text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.start..self.span.end).unwrap_or("")
    }

    fn write_sexp(&self, out: &mut String) {
        out.push('(');
        out.push_str(self.kind.name());
        for child in self.named_children() {
            out.push(' ');
            if let Some(field) = child.field {
                out.push_str(field.name());
                out.push_str(": ");
            }
            child.write_sexp(out);
        }
        out.push(')');
    }
}

/// A completed parse: the input text and the root `source_file` node.
///
/// The source is shared, so trees cut from one input (see
/// [`super::recovery`]) hold a single copy of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tree {
    source: Arc<str>,
    root: Node,
}

impl Tree {
    pub(crate) fn new(source: Arc<str>, root: Node) -> Self {
        Self { source, root }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root_node(&self) -> &Node {
        &self.root
    }

    pub fn text(&self, node: &Node) -> &str {
        node.utf8_text(&self.source)
    }

    /// S-expression of the named nodes, with field labels.
    ///
    /// `"Am/G"` renders as
    /// `(source_file (chord root: (root note: (note)) quality: (quality) bass: (bass root: (root note: (note)))))`.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        self.root.write_sexp(&mut out);
        out
    }

    /// Leaf tokens in source order, closed by an `End` token at the end of
    /// the last one.
    pub fn tokens(&self) -> Vec<Token> {
        let mut tokens: Vec<Token> = self
            .walk()
            .filter_map(|node| match node.kind {
                SyntaxKind::Token(kind) => Some(Token {
                    kind,
                    span: node.span,
                }),
                _ => None,
            })
            .collect();
        tokens.push(Token {
            kind: TokenKind::End,
            span: Span::empty(self.root.span.end),
        });
        tokens
    }

    /// Depth-first, pre-order walk over every node.
    pub fn walk(&self) -> impl Iterator<Item = &Node> {
        let mut stack = vec![&self.root];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: TokenKind, start: usize, end: usize) -> Node {
        Node::leaf(Token {
            kind,
            span: Span::new(start, end),
        })
    }

    fn sample() -> Tree {
        // "F#" as a bare chord
        let accidental =
            Node::branch(SyntaxKind::Accidental, vec![leaf(TokenKind::Sharp, 1, 2)]);
        let root = Node::branch(
            SyntaxKind::Root,
            vec![
                leaf(TokenKind::Note, 0, 1).with_field(Some(Field::Note)),
                accidental.with_field(Some(Field::Accidental)),
            ],
        );
        let chord = Node::branch(SyntaxKind::Chord, vec![root.with_field(Some(Field::Root))]);
        Tree::new(
            Arc::from("F#"),
            Node::branch(SyntaxKind::SourceFile, vec![chord]),
        )
    }

    #[test]
    fn branch_span_covers_children() {
        let tree = sample();
        assert_eq!(tree.root_node().span(), Span::new(0, 2));
    }

    #[test]
    fn field_lookup_by_name() {
        let tree = sample();
        let chord = tree.root_node().child(0).unwrap();
        let root = chord.child_by_field_name("root").unwrap();
        assert_eq!(tree.text(root), "F#");
        let accidental = root.child_by_field(Field::Accidental).unwrap();
        assert_eq!(tree.text(accidental), "#");
        assert!(chord.child_by_field_name("quality").is_none());
        assert!(chord.child_by_field_name("nonsense").is_none());
    }

    #[test]
    fn sexp_skips_anonymous_tokens() {
        assert_eq!(
            sample().to_sexp(),
            "(source_file (chord root: (root note: (note) accidental: (accidental))))"
        );
    }

    #[test]
    fn walk_is_preorder() {
        let tree = sample();
        let kinds: Vec<&str> = tree.walk().map(|n| n.kind().name()).collect();
        assert_eq!(
            kinds,
            vec!["source_file", "chord", "root", "note", "accidental", "#"]
        );
    }

    #[test]
    fn serializes_kind_names() {
        let tree = sample();
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["root"]["kind"], "source_file");
        assert_eq!(json["root"]["children"][0]["kind"], "chord");
        assert_eq!(json["root"]["children"][0]["children"][0]["field"], "root");
        assert_eq!(json["root"]["end"], 2);
    }
}
