//! Chordtree: lexer and table-driven parser for chord symbols and
//! dash-separated chord progressions.

pub mod config;
pub mod diagnostic;
pub mod output;
pub mod syntax;
