//! Typed views over the syntax tree.
//!
//! Each view borrows a [`Node`] and the source text it was parsed from.
//! Optional parts of a chord come back as `Option`, never as empty values.

use std::fmt;

use serde::Serialize;

use super::token::{Span, TokenKind};
use super::tree::{Field, Node, SyntaxKind, Tree};

/// One of the seven note letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NoteName {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl NoteName {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NoteName::A => 'A',
            NoteName::B => 'B',
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
        }
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccidentalKind {
    Sharp,
    Flat,
}

impl AccidentalKind {
    pub fn symbol(self) -> &'static str {
        match self {
            AccidentalKind::Sharp => "#",
            AccidentalKind::Flat => "b",
        }
    }
}

/// The literal quality marker written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityKind {
    Minor,
    Maj7,
    M7,
    Seven,
    Dim,
    Aug,
    Plus,
    Sus4,
    Sus2,
}

impl QualityKind {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let quality = match kind {
            TokenKind::Minor => QualityKind::Minor,
            TokenKind::Maj7 => QualityKind::Maj7,
            TokenKind::M7 => QualityKind::M7,
            TokenKind::Seven => QualityKind::Seven,
            TokenKind::Dim => QualityKind::Dim,
            TokenKind::Aug => QualityKind::Aug,
            TokenKind::Plus => QualityKind::Plus,
            TokenKind::Sus4 => QualityKind::Sus4,
            TokenKind::Sus2 => QualityKind::Sus2,
            _ => return None,
        };
        Some(quality)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualityKind::Minor => "m",
            QualityKind::Maj7 => "maj7",
            QualityKind::M7 => "M7",
            QualityKind::Seven => "7",
            QualityKind::Dim => "dim",
            QualityKind::Aug => "aug",
            QualityKind::Plus => "+",
            QualityKind::Sus4 => "sus4",
            QualityKind::Sus2 => "sus2",
        }
    }

    /// Spelling-independent classification: `maj7`/`M7` and `aug`/`+` are
    /// alternate spellings of the same quality.
    pub fn classify(self) -> ChordQuality {
        match self {
            QualityKind::Minor => ChordQuality::Minor,
            QualityKind::Maj7 | QualityKind::M7 => ChordQuality::Major7,
            QualityKind::Seven => ChordQuality::Dominant7,
            QualityKind::Dim => ChordQuality::Diminished,
            QualityKind::Aug | QualityKind::Plus => ChordQuality::Augmented,
            QualityKind::Sus4 => ChordQuality::Sus4,
            QualityKind::Sus2 => ChordQuality::Sus2,
        }
    }
}

/// Chord quality with spelling variants merged. A chord with no quality
/// marker is `Major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    Major,
    Minor,
    Major7,
    Dominant7,
    Diminished,
    Augmented,
    Sus4,
    Sus2,
}

/// Top-level body of a source file.
#[derive(Debug, Clone, Copy)]
pub enum Body<'t> {
    Chord(Chord<'t>),
    Progression(ChordProgression<'t>),
}

#[derive(Debug, Clone, Copy)]
pub struct SourceFile<'t> {
    node: &'t Node,
    source: &'t str,
}

impl<'t> SourceFile<'t> {
    pub fn new(tree: &'t Tree) -> Option<Self> {
        Self::cast(tree.root_node(), tree.source())
    }

    pub fn cast(node: &'t Node, source: &'t str) -> Option<Self> {
        (node.kind() == SyntaxKind::SourceFile).then_some(Self { node, source })
    }

    pub fn body(&self) -> Option<Body<'t>> {
        let child = self.node.named_children().next()?;
        match child.kind() {
            SyntaxKind::Chord => Chord::cast(child, self.source).map(Body::Chord),
            SyntaxKind::ChordProgression => {
                ChordProgression::cast(child, self.source).map(Body::Progression)
            }
            _ => None,
        }
    }

    /// Every chord in source order; a single chord yields one element.
    pub fn chords(&self) -> Vec<Chord<'t>> {
        match self.body() {
            Some(Body::Chord(chord)) => vec![chord],
            Some(Body::Progression(progression)) => progression.chords().collect(),
            None => Vec::new(),
        }
    }

    pub fn span(&self) -> Span {
        self.node.span()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChordProgression<'t> {
    node: &'t Node,
    source: &'t str,
}

impl<'t> ChordProgression<'t> {
    pub fn cast(node: &'t Node, source: &'t str) -> Option<Self> {
        (node.kind() == SyntaxKind::ChordProgression).then_some(Self { node, source })
    }

    pub fn chords(&self) -> impl Iterator<Item = Chord<'t>> + 't {
        let source = self.source;
        self.node
            .children()
            .iter()
            .filter_map(move |c| Chord::cast(c, source))
    }

    pub fn len(&self) -> usize {
        self.chords().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn separator_count(&self) -> usize {
        self.node
            .children_of_kind(SyntaxKind::Token(TokenKind::Dash))
            .count()
    }

    pub fn span(&self) -> Span {
        self.node.span()
    }

    pub fn text(&self) -> &'t str {
        self.node.utf8_text(self.source)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Chord<'t> {
    node: &'t Node,
    source: &'t str,
    root: Root<'t>,
}

impl<'t> Chord<'t> {
    pub fn cast(node: &'t Node, source: &'t str) -> Option<Self> {
        if node.kind() != SyntaxKind::Chord {
            return None;
        }
        let root = Root::cast(node.child_by_field(Field::Root)?, source)?;
        Some(Self { node, source, root })
    }

    pub fn root(&self) -> Root<'t> {
        self.root
    }

    pub fn quality(&self) -> Option<Quality<'t>> {
        Quality::cast(self.node.child_by_field(Field::Quality)?, self.source)
    }

    pub fn bass(&self) -> Option<Bass<'t>> {
        Bass::cast(self.node.child_by_field(Field::Bass)?, self.source)
    }

    /// Classified quality, `Major` when no marker is present.
    pub fn chord_quality(&self) -> ChordQuality {
        self.quality()
            .map_or(ChordQuality::Major, |q| q.kind().classify())
    }

    pub fn span(&self) -> Span {
        self.node.span()
    }

    pub fn text(&self) -> &'t str {
        self.node.utf8_text(self.source)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Root<'t> {
    node: &'t Node,
    source: &'t str,
    note: NoteName,
}

impl<'t> Root<'t> {
    pub fn cast(node: &'t Node, source: &'t str) -> Option<Self> {
        if node.kind() != SyntaxKind::Root {
            return None;
        }
        let letter = node.child_by_field(Field::Note)?.utf8_text(source);
        let note = NoteName::from_char(letter.chars().next()?)?;
        Some(Self { node, source, note })
    }

    pub fn note(&self) -> NoteName {
        self.note
    }

    pub fn accidental(&self) -> Option<Accidental<'t>> {
        Accidental::cast(self.node.child_by_field(Field::Accidental)?)
    }

    pub fn span(&self) -> Span {
        self.node.span()
    }

    pub fn text(&self) -> &'t str {
        self.node.utf8_text(self.source)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Accidental<'t> {
    node: &'t Node,
    kind: AccidentalKind,
}

impl<'t> Accidental<'t> {
    pub fn cast(node: &'t Node) -> Option<Self> {
        if node.kind() != SyntaxKind::Accidental {
            return None;
        }
        let kind = match node.child(0)?.kind() {
            SyntaxKind::Token(TokenKind::Sharp) => AccidentalKind::Sharp,
            SyntaxKind::Token(TokenKind::Flat) => AccidentalKind::Flat,
            _ => return None,
        };
        Some(Self { node, kind })
    }

    pub fn kind(&self) -> AccidentalKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.node.span()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Quality<'t> {
    node: &'t Node,
    source: &'t str,
    kind: QualityKind,
}

impl<'t> Quality<'t> {
    pub fn cast(node: &'t Node, source: &'t str) -> Option<Self> {
        if node.kind() != SyntaxKind::Quality {
            return None;
        }
        let kind = match node.child(0)?.kind() {
            SyntaxKind::Token(token) => QualityKind::from_token(token)?,
            _ => return None,
        };
        Some(Self { node, source, kind })
    }

    pub fn kind(&self) -> QualityKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.node.span()
    }

    pub fn text(&self) -> &'t str {
        self.node.utf8_text(self.source)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Bass<'t> {
    node: &'t Node,
    root: Root<'t>,
}

impl<'t> Bass<'t> {
    pub fn cast(node: &'t Node, source: &'t str) -> Option<Self> {
        if node.kind() != SyntaxKind::Bass {
            return None;
        }
        let root = Root::cast(node.child_by_field(Field::Root)?, source)?;
        Some(Self { node, root })
    }

    pub fn root(&self) -> Root<'t> {
        self.root
    }

    pub fn span(&self) -> Span {
        self.node.span()
    }
}

/// Owned, serializable summary of one chord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordSummary {
    pub text: String,
    pub root: NoteName,
    pub accidental: Option<AccidentalKind>,
    pub quality: Option<QualityKind>,
    pub bass: Option<(NoteName, Option<AccidentalKind>)>,
    pub span: Span,
}

impl From<Chord<'_>> for ChordSummary {
    fn from(chord: Chord<'_>) -> Self {
        let root = chord.root();
        Self {
            text: chord.text().to_string(),
            root: root.note(),
            accidental: root.accidental().map(|a| a.kind()),
            quality: chord.quality().map(|q| q.kind()),
            bass: chord.bass().map(|b| {
                let r = b.root();
                (r.note(), r.accidental().map(|a| a.kind()))
            }),
            span: chord.span(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    #[test]
    fn single_chord_fields() {
        let tree = parse("F#m/C#").unwrap();
        let file = SourceFile::new(&tree).unwrap();
        let Some(Body::Chord(chord)) = file.body() else {
            panic!("expected a single chord");
        };
        assert_eq!(chord.root().note(), NoteName::F);
        assert_eq!(
            chord.root().accidental().map(|a| a.kind()),
            Some(AccidentalKind::Sharp)
        );
        assert_eq!(chord.quality().map(|q| q.kind()), Some(QualityKind::Minor));
        let bass = chord.bass().unwrap();
        assert_eq!(bass.root().note(), NoteName::C);
        assert_eq!(bass.root().text(), "C#");
        assert_eq!(chord.chord_quality(), ChordQuality::Minor);
    }

    #[test]
    fn absent_parts_are_none() {
        let tree = parse("E").unwrap();
        let chord = SourceFile::new(&tree).unwrap().chords()[0];
        assert!(chord.root().accidental().is_none());
        assert!(chord.quality().is_none());
        assert!(chord.bass().is_none());
        assert_eq!(chord.chord_quality(), ChordQuality::Major);
    }

    #[test]
    fn spelling_variants_classify_together() {
        assert_eq!(QualityKind::Maj7.classify(), QualityKind::M7.classify());
        assert_eq!(QualityKind::Aug.classify(), QualityKind::Plus.classify());
        assert_ne!(QualityKind::Seven.classify(), QualityKind::Maj7.classify());
    }

    #[test]
    fn progression_chords_in_order() {
        let tree = parse("C - Am - F - G").unwrap();
        let file = SourceFile::new(&tree).unwrap();
        let Some(Body::Progression(progression)) = file.body() else {
            panic!("expected a progression");
        };
        assert_eq!(progression.len(), 4);
        assert_eq!(progression.separator_count(), 3);
        let names: Vec<&str> = progression.chords().map(|c| c.text()).collect();
        assert_eq!(names, vec!["C", "Am", "F", "G"]);
    }

    #[test]
    fn cast_rejects_wrong_kind() {
        let tree = parse("C").unwrap();
        assert!(Chord::cast(tree.root_node(), tree.source()).is_none());
        assert!(ChordProgression::cast(tree.root_node(), tree.source()).is_none());
    }

    #[test]
    fn summary_from_chord() {
        let tree = parse("Ebsus4/Bb").unwrap();
        let chord = SourceFile::new(&tree).unwrap().chords()[0];
        let summary = ChordSummary::from(chord);
        assert_eq!(summary.text, "Ebsus4/Bb");
        assert_eq!(summary.root, NoteName::E);
        assert_eq!(summary.accidental, Some(AccidentalKind::Flat));
        assert_eq!(summary.quality, Some(QualityKind::Sus4));
        assert_eq!(
            summary.bass,
            Some((NoteName::B, Some(AccidentalKind::Flat)))
        );
    }
}
