//! LALR(1) parse tables for the chord grammar.
//!
//! ```text
//!  0  source_file       := chord
//!  1  source_file       := chord_progression
//!  2  chord_progression := chord '-' chord
//!  3  chord_progression := chord_progression '-' chord
//!  4  chord             := root
//!  5  chord             := root quality
//!  6  chord             := root bass
//!  7  chord             := root quality bass
//!  8  root              := note
//!  9  root              := note accidental
//! 10  accidental        := '#'
//! 11  accidental        := 'b'
//! 12  quality           := 'm' | 'maj7' | 'M7' | '7' | 'dim' | 'aug' | '+' | 'sus4' | 'sus2'
//! 13  bass              := '/' root
//! ```
//!
//! All quality markers behave identically in every state, so they share one
//! terminal column. The tables are static data and safe to share
//! between any number of concurrent parses.

use super::token::TokenKind;
use super::tree::{Field, SyntaxKind};

pub type StateId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(StateId),
    Reduce(usize),
    Accept,
    Error,
}

/// Right-hand side of a production: one optional field label per symbol.
#[derive(Debug)]
pub struct Production {
    pub lhs: SyntaxKind,
    pub fields: &'static [Option<Field>],
    /// Splice the children of a leading node of the same kind into the
    /// result instead of nesting it (left-recursive repetition).
    pub flatten: bool,
}

impl Production {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

pub const STATE_COUNT: usize = 19;
pub const TERMINAL_COUNT: usize = 7;
pub const NONTERMINAL_COUNT: usize = 7;

const COL_END: usize = 0;
const COL_NOTE: usize = 1;
const COL_SHARP: usize = 2;
const COL_FLAT: usize = 3;
const COL_QUALITY: usize = 4;
const COL_SLASH: usize = 5;
const COL_DASH: usize = 6;

const NONE: Option<Field> = None;

pub static PRODUCTIONS: [Production; 14] = [
    Production {
        lhs: SyntaxKind::SourceFile,
        fields: &[NONE],
        flatten: false,
    },
    Production {
        lhs: SyntaxKind::SourceFile,
        fields: &[NONE],
        flatten: false,
    },
    Production {
        lhs: SyntaxKind::ChordProgression,
        fields: &[NONE, NONE, NONE],
        flatten: false,
    },
    Production {
        lhs: SyntaxKind::ChordProgression,
        fields: &[NONE, NONE, NONE],
        flatten: true,
    },
    Production {
        lhs: SyntaxKind::Chord,
        fields: &[Some(Field::Root)],
        flatten: false,
    },
    Production {
        lhs: SyntaxKind::Chord,
        fields: &[Some(Field::Root), Some(Field::Quality)],
        flatten: false,
    },
    Production {
        lhs: SyntaxKind::Chord,
        fields: &[Some(Field::Root), Some(Field::Bass)],
        flatten: false,
    },
    Production {
        lhs: SyntaxKind::Chord,
        fields: &[Some(Field::Root), Some(Field::Quality), Some(Field::Bass)],
        flatten: false,
    },
    Production {
        lhs: SyntaxKind::Root,
        fields: &[Some(Field::Note)],
        flatten: false,
    },
    Production {
        lhs: SyntaxKind::Root,
        fields: &[Some(Field::Note), Some(Field::Accidental)],
        flatten: false,
    },
    Production {
        lhs: SyntaxKind::Accidental,
        fields: &[NONE],
        flatten: false,
    },
    Production {
        lhs: SyntaxKind::Accidental,
        fields: &[NONE],
        flatten: false,
    },
    Production {
        lhs: SyntaxKind::Quality,
        fields: &[NONE],
        flatten: false,
    },
    Production {
        lhs: SyntaxKind::Bass,
        fields: &[NONE, Some(Field::Root)],
        flatten: false,
    },
];

use Action::{Accept as A, Error as E, Reduce as R, Shift as S};

#[rustfmt::skip]
static ACTION: [[Action; TERMINAL_COUNT]; STATE_COUNT] = [
    //  end    note   '#'    'b'    qual   '/'    '-'
    [E,     S(11), E,     E,     E,     E,     E    ], //  0  start
    [A,     E,     E,     E,     E,     E,     E    ], //  1  source_file .
    [R(0),  E,     E,     E,     E,     E,     S(5) ], //  2  chord .
    [R(1),  E,     E,     E,     E,     E,     S(6) ], //  3  chord_progression .
    [R(4),  E,     E,     E,     S(7),  S(8),  R(4) ], //  4  root .
    [E,     S(11), E,     E,     E,     E,     E    ], //  5  chord '-' . chord
    [E,     S(11), E,     E,     E,     E,     E    ], //  6  chord_progression '-' . chord
    [R(12), E,     E,     E,     E,     R(12), R(12)], //  7  quality-marker .
    [E,     S(11), E,     E,     E,     E,     E    ], //  8  '/' . root
    [R(5),  E,     E,     E,     E,     S(8),  R(5) ], //  9  root quality .
    [R(6),  E,     E,     E,     E,     E,     R(6) ], // 10  root bass .
    [R(8),  E,     S(12), S(13), R(8),  R(8),  R(8) ], // 11  note .
    [R(10), E,     E,     E,     R(10), R(10), R(10)], // 12  '#' .
    [R(11), E,     E,     E,     R(11), R(11), R(11)], // 13  'b' .
    [R(9),  E,     E,     E,     R(9),  R(9),  R(9) ], // 14  note accidental .
    [R(2),  E,     E,     E,     E,     E,     R(2) ], // 15  chord '-' chord .
    [R(3),  E,     E,     E,     E,     E,     R(3) ], // 16  chord_progression '-' chord .
    [R(13), E,     E,     E,     E,     E,     R(13)], // 17  '/' root .
    [R(7),  E,     E,     E,     E,     E,     R(7) ], // 18  root quality bass .
];

const X: Option<StateId> = None;

#[rustfmt::skip]
static GOTO: [[Option<StateId>; NONTERMINAL_COUNT]; STATE_COUNT] = [
    //  source_file  progression  chord     root      accidental  quality   bass
    [Some(1),     Some(3),     Some(2),  Some(4),  X,          X,        X       ], //  0
    [X,           X,           X,        X,        X,          X,        X       ], //  1
    [X,           X,           X,        X,        X,          X,        X       ], //  2
    [X,           X,           X,        X,        X,          X,        X       ], //  3
    [X,           X,           X,        X,        X,          Some(9),  Some(10)], //  4
    [X,           X,           Some(15), Some(4),  X,          X,        X       ], //  5
    [X,           X,           Some(16), Some(4),  X,          X,        X       ], //  6
    [X,           X,           X,        X,        X,          X,        X       ], //  7
    [X,           X,           X,        Some(17), X,          X,        X       ], //  8
    [X,           X,           X,        X,        X,          X,        Some(18)], //  9
    [X,           X,           X,        X,        X,          X,        X       ], // 10
    [X,           X,           X,        X,        Some(14),   X,        X       ], // 11
    [X,           X,           X,        X,        X,          X,        X       ], // 12
    [X,           X,           X,        X,        X,          X,        X       ], // 13
    [X,           X,           X,        X,        X,          X,        X       ], // 14
    [X,           X,           X,        X,        X,          X,        X       ], // 15
    [X,           X,           X,        X,        X,          X,        X       ], // 16
    [X,           X,           X,        X,        X,          X,        X       ], // 17
    [X,           X,           X,        X,        X,          X,        X       ], // 18
];

pub const START_STATE: StateId = 0;

fn terminal_column(kind: TokenKind) -> usize {
    match kind {
        TokenKind::End => COL_END,
        TokenKind::Note => COL_NOTE,
        TokenKind::Sharp => COL_SHARP,
        TokenKind::Flat => COL_FLAT,
        TokenKind::Slash => COL_SLASH,
        TokenKind::Dash => COL_DASH,
        _ => COL_QUALITY,
    }
}

fn column_kinds(column: usize) -> &'static [TokenKind] {
    match column {
        COL_END => &[TokenKind::End],
        COL_NOTE => &[TokenKind::Note],
        COL_SHARP => &[TokenKind::Sharp],
        COL_FLAT => &[TokenKind::Flat],
        COL_QUALITY => &TokenKind::QUALITIES,
        COL_SLASH => &[TokenKind::Slash],
        _ => &[TokenKind::Dash],
    }
}

fn nonterminal_column(kind: SyntaxKind) -> Option<usize> {
    match kind {
        SyntaxKind::SourceFile => Some(0),
        SyntaxKind::ChordProgression => Some(1),
        SyntaxKind::Chord => Some(2),
        SyntaxKind::Root => Some(3),
        SyntaxKind::Accidental => Some(4),
        SyntaxKind::Quality => Some(5),
        SyntaxKind::Bass => Some(6),
        SyntaxKind::Token(_) => None,
    }
}

pub fn action(state: StateId, lookahead: TokenKind) -> Action {
    ACTION
        .get(state)
        .map_or(Action::Error, |row| row[terminal_column(lookahead)])
}

pub fn goto(state: StateId, lhs: SyntaxKind) -> Option<StateId> {
    let column = nonterminal_column(lhs)?;
    GOTO.get(state).and_then(|row| row[column])
}

/// Every token kind with a non-error action in `state`.
pub fn expected_tokens(state: StateId) -> Vec<TokenKind> {
    let Some(row) = ACTION.get(state) else {
        return Vec::new();
    };
    row.iter()
        .enumerate()
        .filter(|(_, action)| **action != Action::Error)
        .flat_map(|(column, _)| column_kinds(column).iter().copied())
        .collect()
}
