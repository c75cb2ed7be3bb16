use std::collections::HashSet;

use super::construction::BOTTOM_MARKER;
use super::{GrammarErrorType, GrammarErrors, GrammarRule};
use crate::automaton::EPSILON;
use crate::symbol::{is_uniquely_decodable, Symbol};

// Characters the grammar file and transition renderings use as punctuation
const RESERVED_CHARACTERS: &[char] = &['=', ',', ':', '{', '}', '-', ';', '(', ')'];

fn get_duplicate_symbols(nonterminals: &[Symbol], terminals: &[Symbol]) -> GrammarErrors {
    let mut seen = HashSet::new();
    nonterminals.iter()
        .chain(terminals)
        .filter(|symbol| !seen.insert(*symbol))
        .map(|symbol| GrammarErrorType::DuplicateSymbol(symbol.clone()))
        .collect()
}

fn get_reserved_symbols(nonterminals: &[Symbol], terminals: &[Symbol]) -> GrammarErrors {
    nonterminals.iter()
        .chain(terminals)
        .filter(|symbol| symbol.as_str() == BOTTOM_MARKER || symbol.as_str() == EPSILON)
        .map(|symbol| GrammarErrorType::ReservedSymbol(symbol.clone()))
        .collect()
}

fn is_malformed(symbol: &Symbol) -> bool {
    let text = symbol.as_str();
    text.is_empty() || text.chars().any(|c| c.is_whitespace() || RESERVED_CHARACTERS.contains(&c))
}

fn get_malformed_symbols(nonterminals: &[Symbol], terminals: &[Symbol]) -> GrammarErrors {
    nonterminals.iter()
        .chain(terminals)
        .filter(|symbol| is_malformed(symbol))
        .map(|symbol| GrammarErrorType::MalformedSymbol(symbol.clone()))
        .collect()
}

fn get_rule_errors(rule: &GrammarRule, nonterminals: &[Symbol], terminals: &[Symbol]) -> GrammarErrors {
    let head_error = (!terminals.contains(rule.head()))
        .then(|| GrammarErrorType::UndefinedHead(rule.head().clone()));

    // Body symbols may come from either vocabulary
    let body_errors = rule.body().iter()
        .filter(|symbol| !nonterminals.contains(symbol) && !terminals.contains(symbol))
        .map(|symbol| GrammarErrorType::UndefinedSymbol(symbol.clone()));

    head_error.into_iter().chain(body_errors).collect()
}

// Rule heads and the start symbol are checked against `terminals` because
// the construction puts them on the stack, and the stack alphabet is built
// from that set.
pub fn verify_grammar(
    nonterminals: &[Symbol],
    terminals: &[Symbol],
    start_symbol: &Symbol,
    rules: &[GrammarRule]
) -> Result<(), GrammarErrors> {
    let mut errors = Vec::new();

    errors.extend(get_duplicate_symbols(nonterminals, terminals));
    errors.extend(get_reserved_symbols(nonterminals, terminals));
    errors.extend(get_malformed_symbols(nonterminals, terminals));

    // Bodies and push sequences print concatenated, the marker included
    let printed = nonterminals.iter()
        .chain(terminals)
        .cloned()
        .chain(std::iter::once(Symbol::from(BOTTOM_MARKER)))
        .collect::<Vec<_>>();
    if !is_uniquely_decodable(&printed) {
        errors.push(GrammarErrorType::AmbiguousVocabulary);
    }

    if !terminals.contains(start_symbol) {
        errors.push(GrammarErrorType::UndefinedStart(start_symbol.clone()));
    }

    errors.extend(rules.iter().flat_map(|rule| get_rule_errors(rule, nonterminals, terminals)));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(texts: &[&str]) -> Vec<Symbol> {
        texts.iter().map(|&t| Symbol::from(t)).collect()
    }

    #[test]
    fn verify_valid_grammar() {
        let rules = vec![
            GrammarRule::new("S", ["a", "S", "b"]),
            GrammarRule::new("S", Vec::<&str>::new())
        ];
        assert_eq!(verify_grammar(&symbols(&["a", "b"]), &symbols(&["S"]), &Symbol::from("S"), &rules), Ok(()));
    }

    #[test]
    fn verify_reports_every_problem() {
        let rules = vec![
            GrammarRule::new("x", ["x"]),
            GrammarRule::new("S", ["w"])
        ];
        let errors = verify_grammar(
            &symbols(&["x", "Z0"]),
            &symbols(&["S", "x"]),
            &Symbol::from("T"),
            &rules
        ).unwrap_err();

        assert_eq!(errors, vec![
            GrammarErrorType::DuplicateSymbol(Symbol::from("x")),
            GrammarErrorType::ReservedSymbol(Symbol::from("Z0")),
            GrammarErrorType::UndefinedStart(Symbol::from("T")),
            GrammarErrorType::UndefinedSymbol(Symbol::from("w"))
        ]);
    }

    #[test]
    fn verify_rejects_ambiguous_concatenation() {
        let rules = vec![GrammarRule::new("S", ["x", "A", "B"])];
        assert_eq!(
            verify_grammar(&symbols(&["x"]), &symbols(&["S", "A", "B", "AB"]), &Symbol::from("S"), &rules),
            Err(vec![GrammarErrorType::AmbiguousVocabulary])
        );

        // Clashes with the marker count too, since it is printed alongside
        assert_eq!(
            verify_grammar(&symbols(&["0"]), &symbols(&["S", "Z"]), &Symbol::from("S"), &[]),
            Err(vec![GrammarErrorType::AmbiguousVocabulary])
        );
    }

    #[test]
    fn verify_rejects_epsilon_symbol() {
        let rules = vec![GrammarRule::new("S", ["ε", "S"])];
        assert_eq!(
            verify_grammar(&symbols(&["ε"]), &symbols(&["S"]), &Symbol::from("S"), &rules),
            Err(vec![GrammarErrorType::ReservedSymbol(Symbol::from("ε"))])
        );
    }

    #[test]
    fn verify_rejects_malformed_symbols() {
        let lines = vec!["", "a b", "a, b", "x->y", "(a)", ";a", "tab\t"];

        for line in lines {
            let symbol = Symbol::from(line);
            let result = verify_grammar(&[symbol.clone()], &symbols(&["S"]), &Symbol::from("S"), &[]);
            assert!(
                result.is_err_and(|errors| errors.contains(&GrammarErrorType::MalformedSymbol(symbol))),
                "{:?} was accepted",
                line
            );
        }
    }

    #[test]
    fn verify_head_must_be_stack_symbol() {
        let rules = vec![GrammarRule::new("a", ["S"])];
        assert_eq!(
            verify_grammar(&symbols(&["a"]), &symbols(&["S"]), &Symbol::from("S"), &rules),
            Err(vec![GrammarErrorType::UndefinedHead(Symbol::from("a"))])
        );
    }
}
