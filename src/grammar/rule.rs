use std::fmt::Display;

use crate::symbol::{concatenate, Symbol};

// One production: `head` rewrites to `body`. An empty body is an epsilon
// production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarRule {
    head: Symbol,
    body: Vec<Symbol>,
}

impl GrammarRule {
    pub fn new<S: Into<Symbol>>(head: impl Into<Symbol>, body: impl IntoIterator<Item = S>) -> Self {
        GrammarRule {
            head: head.into(),
            body: body.into_iter().map(Into::into).collect(),
        }
    }

    pub fn head(&self) -> &Symbol {
        &self.head
    }

    pub fn body(&self) -> &[Symbol] {
        &self.body
    }

    pub fn is_epsilon(&self) -> bool {
        self.body.is_empty()
    }

    // True iff this rule rewrites `head`.
    pub fn matches(&self, head: &Symbol) -> bool {
        self.head == *head
    }
}

impl Display for GrammarRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.head, concatenate(&self.body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_matches_only_its_head() {
        let rule = GrammarRule::new("A", ["x", "A", "B", "C"]);
        assert!(rule.matches(&Symbol::from("A")));
        assert!(!rule.matches(&Symbol::from("B")));
        assert!(!rule.matches(&Symbol::from("x")));
    }

    #[test]
    fn rule_rendering() {
        assert_eq!(GrammarRule::new("q", ["x", "A"]).to_string(), "q -> xA");
        assert_eq!(GrammarRule::new("A", ["x", "A", "B", "C"]).to_string(), "A -> xABC");
        assert_eq!(GrammarRule::new("S", Vec::<Symbol>::new()).to_string(), "S -> ");
    }

    #[test]
    fn empty_body_is_epsilon() {
        assert!(GrammarRule::new("S", Vec::<&str>::new()).is_epsilon());
        assert!(!GrammarRule::new("B", ["y"]).is_epsilon());
    }
}
