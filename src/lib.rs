pub mod automaton;
pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod parser;
pub mod symbol;

pub use automaton::{PushdownAutomaton, Transition};
pub use grammar::{ContextFreeGrammar, GrammarRule};
pub use symbol::Symbol;
