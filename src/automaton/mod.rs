/*
    This module holds pushdown automata and the runtime state of one run
*/

mod transition;

use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::ErrorType;
use crate::symbol::{concatenate, Symbol};

pub use transition::{Transition, TransitionParseError, EPSILON};

#[derive(Debug, PartialEq, Clone)]
pub enum PdaErrorType {
    // The symbol is not part of the input alphabet
    InvalidSymbol(Symbol),
    // A transition needed a stack top but the stack was empty
    StackUnderflow,
    // Nothing fires from the current configuration
    NoApplicableTransition,
}

impl ErrorType for PdaErrorType {}

impl Display for PdaErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PdaErrorType::InvalidSymbol(symbol) => write!(f, "Input symbol `{}` does not exist in the input alphabet", symbol),
            PdaErrorType::StackUnderflow => write!(f, "The stack is empty"),
            PdaErrorType::NoApplicableTransition => write!(f, "No transition applies to the current configuration"),
        }
    }
}

pub type Result<T> = std::result::Result<T, PdaErrorType>;

// An instantaneous description without the remaining input. The stack is
// stored bottom first, so its last element is the top.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Configuration {
    pub state: Symbol,
    pub stack: Vec<Symbol>,
}

impl Configuration {
    pub fn top(&self) -> Option<&Symbol> {
        self.stack.last()
    }

    // Pops the top and pushes the transition's sequence, first element on top
    fn apply(&self, transition: &Transition) -> Configuration {
        let mut stack = self.stack.clone();
        stack.pop();
        stack.extend(transition.push().iter().rev().cloned());
        Configuration {
            state: transition.to_state().clone(),
            stack,
        }
    }
}

impl Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let top_first = self.stack.iter().rev().cloned().collect_vec();
        write!(f, "({}, {})", self.state, concatenate(&top_first))
    }
}

#[derive(Clone, Debug)]
pub struct PushdownAutomaton {
    states: Vec<Symbol>,
    input_alphabet: Vec<Symbol>,
    stack_alphabet: Vec<Symbol>,
    transitions: Vec<Transition>,
    start_state: Symbol,
    initial_stack_symbol: Symbol,
    accepting_states: Vec<Symbol>,
    end_with_empty_stack: bool,

    current_stack: Vec<Symbol>,
    current_state: Symbol,
}

impl PushdownAutomaton {
    pub fn new(
        states: Vec<Symbol>,
        input_alphabet: Vec<Symbol>,
        stack_alphabet: Vec<Symbol>,
        transitions: Vec<Transition>,
        start_state: Symbol,
        initial_stack_symbol: Symbol,
        accepting_states: Vec<Symbol>
    ) -> Self {
        PushdownAutomaton {
            current_stack: vec![initial_stack_symbol.clone()],
            current_state: start_state.clone(),
            states,
            input_alphabet,
            stack_alphabet,
            transitions,
            start_state,
            initial_stack_symbol,
            accepting_states,
            end_with_empty_stack: false,
        }
    }

    // Accept on an empty stack as well as in an accepting state.
    pub fn with_empty_stack_acceptance(mut self) -> Self {
        self.end_with_empty_stack = true;
        self
    }

    pub fn states(&self) -> &[Symbol] {
        &self.states
    }

    pub fn input_alphabet(&self) -> &[Symbol] {
        &self.input_alphabet
    }

    pub fn stack_alphabet(&self) -> &[Symbol] {
        &self.stack_alphabet
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn start_state(&self) -> &Symbol {
        &self.start_state
    }

    pub fn initial_stack_symbol(&self) -> &Symbol {
        &self.initial_stack_symbol
    }

    pub fn accepting_states(&self) -> &[Symbol] {
        &self.accepting_states
    }

    pub fn ends_with_empty_stack(&self) -> bool {
        self.end_with_empty_stack
    }

    pub fn current_state(&self) -> &Symbol {
        &self.current_state
    }

    pub fn current_stack(&self) -> &[Symbol] {
        &self.current_stack
    }

    pub fn configuration(&self) -> Configuration {
        Configuration {
            state: self.current_state.clone(),
            stack: self.current_stack.clone(),
        }
    }

    // Puts the run back at the start state with only the initial stack symbol.
    pub fn reset(&mut self) {
        self.current_stack = vec![self.initial_stack_symbol.clone()];
        self.current_state = self.start_state.clone();
    }

    // Moves the run to `configuration`, usually one picked from `successors`
    pub fn set_configuration(&mut self, configuration: Configuration) {
        self.current_state = configuration.state;
        self.current_stack = configuration.stack;
    }

    // Fires one of this automaton's transitions from the current configuration.
    // Its state and stack top must match; which input it reads is up to the
    // caller.
    pub fn apply(&mut self, transition: &Transition) -> Result<()> {
        let current = self.configuration();
        let top = current.top().ok_or(PdaErrorType::StackUnderflow)?;

        if !self.transitions.contains(transition)
            || !transition.matches(&current.state, transition.input_symbol(), top)
        {
            return Err(PdaErrorType::NoApplicableTransition);
        }

        log::trace!("{} fires from {}", transition, current);
        self.set_configuration(current.apply(transition));
        Ok(())
    }

    fn check_input(&self, input_symbol: &Symbol) -> Result<()> {
        if self.input_alphabet.contains(input_symbol) {
            Ok(())
        } else {
            Err(PdaErrorType::InvalidSymbol(input_symbol.clone()))
        }
    }

    // Validates `input_symbol` against the input alphabet. The run itself is
    // left untouched; use `successors` to explore where it could go.
    pub fn step(&mut self, input_symbol: &Symbol) -> Result<()> {
        self.check_input(input_symbol)?;
        log::trace!("step on {} from {}", input_symbol, self.configuration());
        Ok(())
    }

    // Every transition that fires from the current configuration on
    // `input_symbol`, or on no input when it is `None`. There can be several.
    pub fn applicable_transitions(&self, input_symbol: Option<&Symbol>) -> Result<Vec<&Transition>> {
        if let Some(symbol) = input_symbol {
            self.check_input(symbol)?;
        }
        let top = self.current_stack.last().ok_or(PdaErrorType::StackUnderflow)?;

        Ok(self.transitions.iter()
            .filter(|transition| transition.matches(&self.current_state, input_symbol, top))
            .collect())
    }

    // The configurations one applicable transition away, in transition order.
    pub fn successors(&self, input_symbol: Option<&Symbol>) -> Result<Vec<Configuration>> {
        let applicable = self.applicable_transitions(input_symbol)?;
        if applicable.is_empty() {
            return Err(PdaErrorType::NoApplicableTransition);
        }

        let current = self.configuration();
        Ok(applicable.into_iter().map(|transition| current.apply(transition)).collect())
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting_states.contains(&self.current_state)
            || (self.end_with_empty_stack && self.current_stack.is_empty())
    }
}

impl Display for PushdownAutomaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "A = {{ {} }}", self.states.iter().join(", "))?;
        writeln!(f, "X = {{ {} }}", self.input_alphabet.iter().join(", "))?;
        writeln!(f, "Y = {{ {} }}", self.stack_alphabet.iter().join(", "))?;
        writeln!(f)?;
        writeln!(f, "f:")?;
        for transition in &self.transitions {
            writeln!(f, "{}", transition)?;
        }
        writeln!(f)?;
        writeln!(f, "start: {}", self.start_state)?;
        writeln!(f, "stack: {}", self.initial_stack_symbol)?;
        writeln!(f, "accepting: {{ {} }}", self.accepting_states.iter().join(", "))
    }
}
