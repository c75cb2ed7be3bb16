use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::ErrorType;
use crate::symbol::{concatenate, split_concatenated, Symbol};

// Printed in place of the input symbol of a transition that reads nothing.
pub const EPSILON: &str = "ε";

// One edge of the automaton: in `from_state` with `stack_top` on the stack and
// `input_symbol` (or nothing) next, pop the top, push `push` and move to
// `to_state`. The first element of `push` ends up on top.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    from_state: Symbol,
    input_symbol: Option<Symbol>,
    stack_top: Symbol,
    to_state: Symbol,
    push: Vec<Symbol>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum TransitionParseError {
    MissingArrow,
    MissingParentheses,
    // Expected three fields on the left and two on the right
    FieldCount,
    // The push sequence is not a concatenation of known symbols
    UnknownSymbols(String),
}

impl ErrorType for TransitionParseError {}

impl Display for TransitionParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionParseError::MissingArrow => write!(f, "Expected `->` between the two halves of a transition"),
            TransitionParseError::MissingParentheses => write!(f, "Transition halves must be parenthesised"),
            TransitionParseError::FieldCount => write!(f, "Expected `(state, input, top) -> (state, push)`"),
            TransitionParseError::UnknownSymbols(text) => write!(f, "Could not split `{}` into known symbols", text),
        }
    }
}

fn strip_parentheses(text: &str) -> Result<&str, TransitionParseError> {
    text.trim()
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .ok_or(TransitionParseError::MissingParentheses)
}

impl Transition {
    pub fn new(
        from_state: Symbol,
        input_symbol: Option<Symbol>,
        stack_top: Symbol,
        to_state: Symbol,
        push: Vec<Symbol>
    ) -> Self {
        Transition {
            from_state,
            input_symbol,
            stack_top,
            to_state,
            push,
        }
    }

    pub fn from_state(&self) -> &Symbol {
        &self.from_state
    }

    pub fn input_symbol(&self) -> Option<&Symbol> {
        self.input_symbol.as_ref()
    }

    pub fn stack_top(&self) -> &Symbol {
        &self.stack_top
    }

    pub fn to_state(&self) -> &Symbol {
        &self.to_state
    }

    pub fn push(&self) -> &[Symbol] {
        &self.push
    }

    // True iff this transition fires from exactly this state, input and top.
    pub fn matches(&self, state: &Symbol, input_symbol: Option<&Symbol>, stack_top: &Symbol) -> bool {
        self.from_state == *state
            && self.input_symbol.as_ref() == input_symbol
            && self.stack_top == *stack_top
    }

    // Reads a transition back from its rendering. The push sequence is split
    // with `vocabulary`, since rendering concatenates it without delimiters.
    pub fn parse_line(line: &str, vocabulary: &[Symbol]) -> Result<Transition, TransitionParseError> {
        let (left, right) = line.split_once(" -> ").ok_or(TransitionParseError::MissingArrow)?;
        let left = strip_parentheses(left)?;
        let right = strip_parentheses(right)?;

        let (from_state, input_symbol, stack_top) = left.split(", ")
            .collect_tuple()
            .ok_or(TransitionParseError::FieldCount)?;
        let (to_state, push) = right.split_once(", ").ok_or(TransitionParseError::FieldCount)?;

        let push = split_concatenated(push, vocabulary)
            .ok_or_else(|| TransitionParseError::UnknownSymbols(push.to_string()))?;
        let input_symbol = (input_symbol != EPSILON).then(|| Symbol::from(input_symbol));

        Ok(Transition {
            from_state: Symbol::from(from_state),
            input_symbol,
            stack_top: Symbol::from(stack_top),
            to_state: Symbol::from(to_state),
            push,
        })
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let input = self.input_symbol.as_ref().map_or(EPSILON, Symbol::as_str);
        write!(
            f,
            "({}, {}, {}) -> ({}, {})",
            self.from_state,
            input,
            self.stack_top,
            self.to_state,
            concatenate(&self.push)
        )
    }
}
