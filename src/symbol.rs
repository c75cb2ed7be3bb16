/*
    The atomic token shared by grammars and automata
*/

use std::cmp::Reverse;
use std::collections::HashSet;
use std::fmt::Display;

use itertools::Itertools;

// Symbols carry no structure beyond their text. Automaton states are symbols
// too, since a grammar's start symbol can end up as a start state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(text: impl Into<String>) -> Self {
        Symbol(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(text: &str) -> Self {
        Symbol(text.to_string())
    }
}

impl From<String> for Symbol {
    fn from(text: String) -> Self {
        Symbol(text)
    }
}

impl From<&Symbol> for Symbol {
    fn from(symbol: &Symbol) -> Self {
        symbol.clone()
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// Renders a sequence the way rules and transitions print it: no delimiter
pub fn concatenate(symbols: &[Symbol]) -> String {
    symbols.iter().join("")
}

// Splits concatenated symbol text back into symbols from `vocabulary`.
// Longer symbols are tried first at every position, backtracking when the
// remainder cannot be split, so a decomposition is found whenever one exists.
// Returns `None` if the text cannot be covered by vocabulary symbols.
pub fn split_concatenated(text: &str, vocabulary: &[Symbol]) -> Option<Vec<Symbol>> {
    if text.is_empty() {
        return Some(Vec::new());
    }

    vocabulary.iter()
        .filter(|symbol| !symbol.as_str().is_empty() && text.starts_with(symbol.as_str()))
        .sorted_by_key(|symbol| Reverse(symbol.as_str().len()))
        .find_map(|symbol| {
            let rest = split_concatenated(&text[symbol.as_str().len()..], vocabulary)?;
            Some(std::iter::once(symbol.clone()).chain(rest).collect())
        })
}

// True when every concatenation of `vocabulary` symbols splits back in only
// one way, which is what makes `split_concatenated` exact.
// This is the Sardinas-Patterson test: follow the suffixes left dangling when
// one symbol sequence is a prefix of another, and the vocabulary is ambiguous
// iff some dangling suffix is itself a symbol.
pub fn is_uniquely_decodable(vocabulary: &[Symbol]) -> bool {
    let code = vocabulary.iter().map(Symbol::as_str).unique().collect_vec();
    if code.contains(&"") {
        return false;
    }

    // Suffixes left over when one symbol is a proper prefix of another
    let mut dangling: HashSet<&str> = code.iter()
        .cartesian_product(&code)
        .filter(|(a, b)| a.len() < b.len() && b.starts_with(**a))
        .map(|(a, b)| &b[a.len()..])
        .collect();
    let mut seen = HashSet::new();

    loop {
        if dangling.contains("") {
            return false;
        }
        dangling.retain(|suffix| !seen.contains(suffix));
        if dangling.is_empty() {
            return true;
        }
        seen.extend(dangling.iter().copied());

        dangling = dangling.iter()
            .cartesian_product(&code)
            .filter_map(|(&suffix, &symbol)| {
                if symbol.starts_with(suffix) {
                    Some(&symbol[suffix.len()..])
                } else if suffix.starts_with(symbol) {
                    Some(&suffix[symbol.len()..])
                } else {
                    None
                }
            })
            .collect();
    }
}
