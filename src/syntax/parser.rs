//! Table-driven shift/reduce parser for chord notation.
//!
//! Pulls tokens from the [`Lexer`] one at a time and drives the LALR(1)
//! automaton in [`super::table`] until it accepts or hits an error entry.
//! There is no error recovery: the first error ends the parse.

use std::sync::Arc;

use super::error::ParseError;
use super::lexer::Lexer;
use super::table::{self, Action, StateId, PRODUCTIONS, START_STATE};
use super::token::{Token, TokenKind};
use super::tree::{Node, Tree};

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    states: Vec<StateId>,
    nodes: Vec<Node>,
    source: Option<Arc<str>>,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            states: vec![START_STATE],
            nodes: Vec::new(),
            source: None,
        }
    }

    /// Attach the already-decoded input text, shared with any tree this
    /// parser produces. `source` must hold the same bytes the lexer scans.
    pub fn with_source(mut self, source: Arc<str>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn parse(mut self) -> Result<Tree, ParseError> {
        let mut lookahead = self.lexer.next_token()?;

        loop {
            let state = self.state();
            match table::action(state, lookahead.kind) {
                Action::Shift(next) => {
                    self.nodes.push(Node::leaf(lookahead));
                    self.states.push(next);
                    lookahead = self.lexer.next_token()?;
                }
                Action::Reduce(production) => self.reduce(production),
                Action::Accept => return Ok(self.accept()),
                Action::Error => return Err(self.syntax_error(state, lookahead)),
            }
        }
    }

    fn state(&self) -> StateId {
        self.states.last().copied().unwrap_or(START_STATE)
    }

    fn reduce(&mut self, production: usize) {
        let production = &PRODUCTIONS[production];
        let split = self.nodes.len() - production.len();
        let popped = self.nodes.split_off(split);
        self.states.truncate(self.states.len() - production.len());

        let mut children = Vec::with_capacity(popped.len());
        for (index, (child, field)) in popped.into_iter().zip(production.fields).enumerate() {
            if production.flatten && index == 0 && child.kind() == production.lhs {
                children.extend(child.into_children());
            } else {
                children.push(child.with_field(*field));
            }
        }
        let node = Node::branch(production.lhs, children);

        let from = self.state();
        let next = table::goto(from, production.lhs)
            .unwrap_or_else(|| unreachable!("no goto from state {from} on {:?}", production.lhs));
        self.nodes.push(node);
        self.states.push(next);
    }

    fn accept(mut self) -> Tree {
        let root = self
            .nodes
            .pop()
            .unwrap_or_else(|| unreachable!("accepted with an empty stack"));
        let source = match self.source.take() {
            Some(source) => source,
            // Accepted input is ASCII plus whitespace, so this never replaces.
            None => Arc::from(&*String::from_utf8_lossy(self.lexer.source())),
        };
        Tree::new(source, root)
    }

    fn syntax_error(&self, state: StateId, token: Token) -> ParseError {
        let text = match token.kind {
            TokenKind::End => String::new(),
            _ => token.text(self.lexer.source()).to_string(),
        };
        ParseError::Syntax {
            span: token.span,
            state,
            found: token.kind,
            text,
            expected: table::expected_tokens(state),
        }
    }
}
