/*
    This module generates random leftmost derivations
*/

use std::fmt::Display;

use itertools::Itertools;
use rand::prelude::*;

use crate::error_handling::*;
use crate::grammar::{ContextFreeGrammar, GrammarRule};
use crate::symbol::{concatenate, Symbol};

#[derive(Debug, PartialEq)]
pub enum GenerateErrorType {
    // The derivation did not finish within the allowed number of rewrites
    StepLimitExceeded(usize),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::StepLimitExceeded(limit) => write!(f, "Derivation did not finish within {} rewrites", limit),
        }
    }
}

pub type GenResult<T> = Result<T, GenerateErrorType>;

// The sentential forms of one leftmost derivation together with the rules
// that produced them. `forms[i + 1]` is `forms[i]` with `rules[i]` applied to
// its leftmost rewritable symbol.
#[derive(Debug, PartialEq, Clone)]
pub struct Derivation {
    pub forms: Vec<Vec<Symbol>>,
    pub rules: Vec<GrammarRule>,
}

impl Derivation {
    pub fn sentence(&self) -> &[Symbol] {
        self.forms.last().map(Vec::as_slice).unwrap_or_default()
    }
}

impl Display for Derivation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.forms.iter().map(|form| concatenate(form)).join(" => "))
    }
}

// Index of the leftmost symbol that some rule rewrites
fn leftmost_rewritable(grammar: &ContextFreeGrammar, form: &[Symbol]) -> Option<usize> {
    form.iter().position(|symbol| grammar.rules_for(symbol).next().is_some())
}

pub fn derive(grammar: &ContextFreeGrammar, rng: &mut impl Rng, max_steps: usize) -> GenResult<Derivation> {
    let mut form = vec![grammar.start_symbol().clone()];
    let mut derivation = Derivation {
        forms: vec![form.clone()],
        rules: Vec::new(),
    };

    while let Some(index) = leftmost_rewritable(grammar, &form) {
        if derivation.rules.len() == max_steps {
            log::warn!("giving up on derivation after {} rewrites", max_steps);
            return Err(GenerateErrorType::StepLimitExceeded(max_steps));
        }

        let head = form[index].clone();
        let candidates = grammar.rules_for(&head).collect_vec();
        let Some(&rule) = candidates.choose(&mut *rng) else {
            break;
        };

        form.splice(index..=index, rule.body().iter().cloned());
        derivation.forms.push(form.clone());
        derivation.rules.push(rule.clone());
    }

    log::debug!("derived {} in {} rewrites", concatenate(&form), derivation.rules.len());
    Ok(derivation)
}
