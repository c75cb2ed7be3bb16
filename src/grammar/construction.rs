use super::ContextFreeGrammar;
use crate::automaton::{PushdownAutomaton, Transition};
use crate::symbol::Symbol;

pub const BOTTOM_MARKER: &str = "Z0";

pub const INITIALIZER_STATE: &str = "a0";
pub const SIMULATION_STATE: &str = "a1";
pub const FINAL_STATE: &str = "a*";

#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    // Start in the initializer state instead of at the grammar's start
    // symbol. Off by default, which keeps the bootstrap transitions
    // unreachable from the declared start state.
    pub start_at_initializer: bool,
}

impl ContextFreeGrammar {
    // Builds the automaton that simulates leftmost derivations, with the
    // grammar's start symbol as the start state.
    pub fn build_pushdown_automaton(&self) -> PushdownAutomaton {
        self.build_pushdown_automaton_with(Options::default())
    }

    pub fn build_pushdown_automaton_with(&self, options: Options) -> PushdownAutomaton {
        let bottom = Symbol::from(BOTTOM_MARKER);
        let initializer = Symbol::from(INITIALIZER_STATE);
        let simulation = Symbol::from(SIMULATION_STATE);
        let accept = Symbol::from(FINAL_STATE);

        let states = vec![initializer.clone(), simulation.clone(), accept.clone()];

        let input_alphabet = self.nonterminals.clone();
        let stack_alphabet = self.terminals.iter()
            .cloned()
            .chain(std::iter::once(bottom.clone()))
            .collect();

        let mut transitions = Vec::with_capacity(self.rules.len() + 2);
        transitions.push(Transition::new(
            initializer.clone(),
            None,
            bottom.clone(),
            simulation.clone(),
            vec![self.start_symbol.clone(), bottom.clone()]
        ));
        transitions.push(Transition::new(
            simulation.clone(),
            None,
            bottom.clone(),
            accept.clone(),
            vec![bottom.clone()]
        ));

        // The rule head is the stack top, its first body symbol the input
        for rule in &self.rules {
            let (first, rest) = match rule.body().split_first() {
                Some((first, rest)) => (Some(first.clone()), rest.to_vec()),
                None => (None, Vec::new()),
            };
            let transition = Transition::new(simulation.clone(), first, rule.head().clone(), simulation.clone(), rest);
            log::trace!("{} gives {}", rule, transition);
            transitions.push(transition);
        }

        let start_state = if options.start_at_initializer {
            initializer
        } else {
            self.start_symbol.clone()
        };

        log::debug!("built automaton with {} transitions from {} rules", transitions.len(), self.rules.len());

        PushdownAutomaton::new(
            states,
            input_alphabet,
            stack_alphabet,
            transitions,
            start_state,
            bottom,
            vec![accept]
        )
    }
}
