//! This module defines the `TransitionTable`, the immutable mapping from (state, symbol)
//! to an action, with per-state wildcard fallback, and the builder used to construct it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{Action, Match};

/// The rules defined for one state: exact symbol matches plus an optional
/// wildcard that covers every symbol not otherwise listed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct StateRules {
    exact: HashMap<char, Action>,
    wildcard: Option<Action>,
}

/// An immutable mapping from state label and tape symbol to an [`Action`].
///
/// Constructed once through [`TableBuilder`] and never mutated afterwards,
/// so it can be shared read-only (e.g. behind an `Arc`) across any number
/// of machines, including across threads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionTable {
    rules: HashMap<String, StateRules>,
}

impl TransitionTable {
    /// Returns a builder for constructing a table rule by rule.
    pub fn builder() -> TableBuilder {
        TableBuilder::default()
    }

    /// Looks up the action for `(state, symbol)`.
    ///
    /// An exact symbol match takes priority; if absent but the state has a
    /// wildcard rule, the wildcard action is returned. `None` means the
    /// table defines no rule for this pair, which the machine interprets
    /// as an implicit transition to its reject state.
    pub fn get(&self, state: &str, symbol: char) -> Option<&Action> {
        let rules = self.rules.get(state)?;
        rules.exact.get(&symbol).or(rules.wildcard.as_ref())
    }

    /// Checks whether `state` is defined in the table.
    pub fn contains(&self, state: &str) -> bool {
        self.rules.contains_key(state)
    }

    /// Checks whether `state` is defined and has no outgoing rules.
    pub fn is_terminal(&self, state: &str) -> bool {
        self.rules
            .get(state)
            .map(|rules| rules.exact.is_empty() && rules.wildcard.is_none())
            .unwrap_or(false)
    }

    /// Iterates over all state labels defined in the table.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Returns the number of states defined in the table.
    pub fn state_count(&self) -> usize {
        self.rules.len()
    }

    /// Iterates over all outgoing actions of `state`, exact rules first.
    pub(crate) fn actions(&self, state: &str) -> impl Iterator<Item = &Action> {
        self.rules
            .get(state)
            .into_iter()
            .flat_map(|rules| rules.exact.values().chain(rules.wildcard.iter()))
    }
}

/// Builds a [`TransitionTable`].
#[derive(Debug, Default)]
pub struct TableBuilder {
    rules: HashMap<String, StateRules>,
}

impl TableBuilder {
    /// Adds a rule: in `state`, on a symbol matching `read`, perform `action`.
    ///
    /// A later rule for the same `(state, read)` pair replaces the earlier
    /// one, keeping the table deterministic.
    pub fn rule(mut self, state: &str, read: Match, action: Action) -> Self {
        let rules = self.rules.entry(state.to_string()).or_default();
        match read {
            Match::Symbol(symbol) => {
                rules.exact.insert(symbol, action);
            }
            Match::AnyOther => {
                rules.wildcard = Some(action);
            }
        }
        self
    }

    /// Declares `state` with no outgoing rules, making it terminal.
    pub fn terminal(mut self, state: &str) -> Self {
        self.rules.entry(state.to_string()).or_default();
        self
    }

    /// Finalizes the table.
    pub fn build(self) -> TransitionTable {
        TransitionTable { rules: self.rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Write};

    fn right(next_state: &str) -> Action {
        Action::new(Write::Preserve, Direction::Right, next_state)
    }

    #[test]
    fn test_basic_transition_lookup() {
        let table = TransitionTable::builder()
            .rule(
                "q0",
                Match::Symbol('a'),
                Action::new(Write::Symbol('b'), Direction::Right, "q1"),
            )
            .build();

        let action = table.get("q0", 'a').unwrap();
        assert_eq!(action.write, Write::Symbol('b'));
        assert_eq!(action.direction, Direction::Right);
        assert_eq!(action.next_state, "q1");
    }

    #[test]
    fn test_missing_state_returns_none() {
        let table = TransitionTable::builder().build();

        assert!(table.get("q0", 'a').is_none());
        assert!(!table.contains("q0"));
    }

    #[test]
    fn test_missing_symbol_returns_none() {
        let table = TransitionTable::builder()
            .rule("q0", Match::Symbol('a'), right("q1"))
            .build();

        assert!(table.get("q0", 'z').is_none());
    }

    #[test]
    fn test_wildcard_fallback() {
        let table = TransitionTable::builder()
            .rule(
                "q0",
                Match::AnyOther,
                Action::new(Write::Symbol('x'), Direction::Stay, "q1"),
            )
            .build();

        let action = table.get("q0", 'z').unwrap();
        assert_eq!(action.write, Write::Symbol('x'));
        assert_eq!(action.next_state, "q1");
    }

    #[test]
    fn test_exact_match_beats_wildcard() {
        let table = TransitionTable::builder()
            .rule("q0", Match::Symbol('a'), right("exact"))
            .rule("q0", Match::AnyOther, right("fallback"))
            .build();

        assert_eq!(table.get("q0", 'a').unwrap().next_state, "exact");
        assert_eq!(table.get("q0", 'b').unwrap().next_state, "fallback");
    }

    #[test]
    fn test_terminal_states() {
        let table = TransitionTable::builder()
            .rule("q0", Match::Symbol('a'), right("accept"))
            .terminal("accept")
            .build();

        assert!(table.contains("accept"));
        assert!(table.is_terminal("accept"));
        assert!(!table.is_terminal("q0"));
        // Undefined states are not terminal, they are simply absent.
        assert!(!table.is_terminal("q9"));
    }

    #[test]
    fn test_later_rule_replaces_earlier() {
        let table = TransitionTable::builder()
            .rule("q0", Match::Symbol('a'), right("first"))
            .rule("q0", Match::Symbol('a'), right("second"))
            .build();

        assert_eq!(table.get("q0", 'a').unwrap().next_state, "second");
    }

    #[test]
    fn test_table_serialization_round_trip() {
        let table = TransitionTable::builder()
            .rule("q0", Match::Symbol('a'), right("q1"))
            .rule("q0", Match::AnyOther, right("reject"))
            .terminal("reject")
            .build();

        let json = serde_json::to_string(&table).unwrap();
        let deserialized: TransitionTable = serde_json::from_str(&json).unwrap();

        assert_eq!(table, deserialized);
    }
}
