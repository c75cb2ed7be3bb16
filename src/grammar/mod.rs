/*
    This module is for storing context-free grammars and turning them into
    pushdown automata
*/

mod construction;
mod rule;
mod verifier;

use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::ErrorType;
use crate::symbol::Symbol;

pub use construction::{Options, BOTTOM_MARKER, FINAL_STATE, INITIALIZER_STATE, SIMULATION_STATE};
pub use rule::GrammarRule;

#[derive(Debug, PartialEq, Clone)]
pub enum GrammarErrorType {
    // A symbol appears more than once across both vocabularies
    DuplicateSymbol(Symbol),
    // A symbol collides with the bottom-of-stack marker or the epsilon marker
    ReservedSymbol(Symbol),
    // A symbol is empty or contains whitespace or punctuation used when printing
    MalformedSymbol(Symbol),
    // Concatenated symbols could be read back in more than one way
    AmbiguousVocabulary,
    // The start symbol is not a stack-side symbol
    UndefinedStart(Symbol),
    // A rule rewrites a symbol that is not a stack-side symbol
    UndefinedHead(Symbol),
    // A rule body uses a symbol from neither vocabulary
    UndefinedSymbol(Symbol),
}

impl ErrorType for GrammarErrorType {}

impl Display for GrammarErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarErrorType::DuplicateSymbol(symbol) => write!(f, "Symbol `{}` is declared more than once", symbol),
            GrammarErrorType::ReservedSymbol(symbol) => write!(f, "Symbol `{}` is reserved by the automaton", symbol),
            GrammarErrorType::MalformedSymbol(symbol) => write!(f, "Symbol `{}` is empty or contains whitespace or punctuation", symbol),
            GrammarErrorType::AmbiguousVocabulary => write!(f, "Some concatenation of symbols can be split in more than one way"),
            GrammarErrorType::UndefinedStart(symbol) => write!(f, "Start symbol `{}` is not declared in Vh", symbol),
            GrammarErrorType::UndefinedHead(symbol) => write!(f, "Rule head `{}` is not declared in Vh", symbol),
            GrammarErrorType::UndefinedSymbol(symbol) => write!(f, "Could not find declaration for `{}`", symbol),
        }
    }
}

pub type GrammarErrors = Vec<GrammarErrorType>;

// A context-free grammar whose vocabularies keep the naming used by its
// rendering: `nonterminals` prints as `Vt` and becomes the automaton's input
// alphabet, `terminals` prints as `Vh` and becomes its stack alphabet. Rule
// heads and the start symbol therefore live in `terminals`.
#[derive(Debug, PartialEq, Clone)]
pub struct ContextFreeGrammar {
    nonterminals: Vec<Symbol>,
    terminals: Vec<Symbol>,
    start_symbol: Symbol,
    rules: Vec<GrammarRule>,
}

impl ContextFreeGrammar {
    // Builds a grammar, reporting every validation problem at once.
    pub fn new<S: Into<Symbol>, T: Into<Symbol>>(
        nonterminals: impl IntoIterator<Item = S>,
        terminals: impl IntoIterator<Item = T>,
        start_symbol: impl Into<Symbol>,
        rules: Vec<GrammarRule>
    ) -> Result<Self, GrammarErrors> {
        let nonterminals = nonterminals.into_iter().map(Into::into).collect_vec();
        let terminals = terminals.into_iter().map(Into::into).collect_vec();
        let start_symbol = start_symbol.into();

        verifier::verify_grammar(&nonterminals, &terminals, &start_symbol, &rules)?;

        log::debug!(
            "grammar with {} + {} symbols and {} rules",
            nonterminals.len(),
            terminals.len(),
            rules.len()
        );

        Ok(ContextFreeGrammar {
            nonterminals,
            terminals,
            start_symbol,
            rules
        })
    }

    pub fn nonterminals(&self) -> &[Symbol] {
        &self.nonterminals
    }

    pub fn terminals(&self) -> &[Symbol] {
        &self.terminals
    }

    pub fn start_symbol(&self) -> &Symbol {
        &self.start_symbol
    }

    pub fn rules(&self) -> &[GrammarRule] {
        &self.rules
    }

    // Every rule rewriting `head`, in declaration order
    pub fn rules_for<'a>(&'a self, head: &'a Symbol) -> impl Iterator<Item = &'a GrammarRule> + 'a {
        self.rules.iter().filter(move |rule| rule.matches(head))
    }

    pub fn vocabulary(&self) -> Vec<Symbol> {
        self.nonterminals.iter().chain(&self.terminals).cloned().collect()
    }
}

impl Display for ContextFreeGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Vt = {{ {} }}", self.nonterminals.iter().join(", "))?;
        writeln!(f, "Vh = {{ {} }}", self.terminals.iter().join(", "))?;
        writeln!(f)?;
        writeln!(f, "start: {}", self.start_symbol)?;
        writeln!(f)?;
        writeln!(f, "P:")?;
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}
