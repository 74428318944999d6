//! This module generates the transition table of the mark-and-compare palindrome
//! recognizer and wires it into a ready-to-run machine.
//!
//! The algorithm marks the leftmost unmarked symbol, seeks the right edge,
//! checks the rightmost unmarked symbol against it, and rewinds, repeating
//! until the tape is consumed. One seek/check state pair exists per alphabet
//! symbol, so the state space is a function of the configured alphabet and
//! the rules are generated by looping over it, never hand-enumerated.

use std::collections::HashSet;
use std::sync::Arc;

use crate::machine::Machine;
use crate::table::TransitionTable;
use crate::types::{Action, Direction, Match, Write, DEFAULT_BLANK_SYMBOL};

/// The sentinel written over a cell once it has been compared. Distinct from
/// the blank symbol and required to be absent from the alphabet.
pub const MARK_SYMBOL: char = 'X';

/// The designated start state.
pub const START_STATE: &str = "scan";
/// The designated accepting terminal state.
pub const ACCEPT_STATE: &str = "accept";
/// The designated rejecting terminal state.
pub const REJECT_STATE: &str = "reject";

/// The alphabet the stock recognizer is built over.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

fn seek_state(symbol: char) -> String {
    format!("seek_{}", symbol)
}

fn check_state(symbol: char) -> String {
    format!("check_{}", symbol)
}

/// Generates the palindrome transition table for `alphabet`.
///
/// The table is defined over the alphabet symbols, [`MARK_SYMBOL`], and
/// [`DEFAULT_BLANK_SYMBOL`]. Construction is pure: the same alphabet always
/// yields the same table, and the result carries no hidden shared state.
///
/// # Panics
///
/// Panics if the alphabet contains the blank symbol, the mark sentinel, or
/// duplicate symbols. A malformed alphabet is a programming error in the
/// caller, not a property of any input word.
pub fn table(alphabet: &str) -> TransitionTable {
    let mut seen = HashSet::new();
    for symbol in alphabet.chars() {
        assert!(
            symbol != DEFAULT_BLANK_SYMBOL,
            "alphabet must not contain the blank symbol {:?}",
            DEFAULT_BLANK_SYMBOL
        );
        assert!(
            symbol != MARK_SYMBOL,
            "alphabet must not contain the mark sentinel {:?}",
            MARK_SYMBOL
        );
        assert!(
            seen.insert(symbol),
            "alphabet contains duplicate symbol {:?}",
            symbol
        );
    }

    let blank = DEFAULT_BLANK_SYMBOL;
    let mut builder = TransitionTable::builder()
        // Outer loop: walk right over already-compared cells; a blank here
        // means every cell is consumed and the word is a palindrome.
        .rule(
            START_STATE,
            Match::Symbol(MARK_SYMBOL),
            Action::new(Write::Preserve, Direction::Right, START_STATE),
        )
        .rule(
            START_STATE,
            Match::Symbol(blank),
            Action::new(Write::Preserve, Direction::Stay, ACCEPT_STATE),
        )
        // Return pass: run left to the edge, then step back onto the tape.
        .rule(
            "rewind",
            Match::Symbol(blank),
            Action::new(Write::Preserve, Direction::Right, START_STATE),
        )
        .rule(
            "rewind",
            Match::AnyOther,
            Action::new(Write::Preserve, Direction::Left, "rewind"),
        )
        .terminal(ACCEPT_STATE)
        .terminal(REJECT_STATE);

    for symbol in alphabet.chars() {
        let seek = seek_state(symbol);
        let check = check_state(symbol);

        // Mark the opening symbol of the pair and remember it in the state label.
        builder = builder.rule(
            START_STATE,
            Match::Symbol(symbol),
            Action::new(Write::Symbol(MARK_SYMBOL), Direction::Right, &seek),
        );

        // Seek: skip everything until the right edge.
        builder = builder
            .rule(
                &seek,
                Match::Symbol(blank),
                Action::new(Write::Preserve, Direction::Left, &check),
            )
            .rule(
                &seek,
                Match::AnyOther,
                Action::new(Write::Preserve, Direction::Right, &seek),
            );

        // Check: the rightmost unmarked symbol must equal the remembered one.
        // Hitting blank first means an odd-length middle was consumed.
        builder = builder
            .rule(
                &check,
                Match::Symbol(symbol),
                Action::new(Write::Symbol(MARK_SYMBOL), Direction::Left, "rewind"),
            )
            .rule(
                &check,
                Match::Symbol(MARK_SYMBOL),
                Action::new(Write::Preserve, Direction::Left, &check),
            )
            .rule(
                &check,
                Match::Symbol(blank),
                Action::new(Write::Preserve, Direction::Stay, ACCEPT_STATE),
            )
            .rule(
                &check,
                Match::AnyOther,
                Action::new(Write::Preserve, Direction::Stay, REJECT_STATE),
            );
    }

    builder.build()
}

/// Constructs a machine wired with the palindrome table for `alphabet` and
/// the designated state labels. Each call owns a fresh tape; the table is
/// freshly generated and privately shared.
pub fn recognizer(alphabet: &str) -> Machine {
    Machine::new(
        Arc::new(table(alphabet)),
        START_STATE,
        ACCEPT_STATE,
        REJECT_STATE,
        DEFAULT_BLANK_SYMBOL,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;

    fn verdict(word: &str) -> bool {
        let mut machine = recognizer(DEFAULT_ALPHABET);
        machine.load(word);
        machine.run()
    }

    #[test]
    fn test_table_structure() {
        let table = table("ab");

        assert!(table.contains(START_STATE));
        assert!(table.is_terminal(ACCEPT_STATE));
        assert!(table.is_terminal(REJECT_STATE));
        // scan + rewind + accept + reject + one seek/check pair per symbol.
        assert_eq!(table.state_count(), 4 + 2 * 2);
    }

    #[test]
    fn test_table_passes_analysis() {
        let table = table(DEFAULT_ALPHABET);
        assert!(analyze(&table, START_STATE, ACCEPT_STATE, REJECT_STATE).is_ok());
    }

    #[test]
    fn test_concrete_verdicts() {
        assert!(verdict(""));
        assert!(verdict("a"));
        assert!(verdict("aba"));
        assert!(verdict("abba"));
        assert!(!verdict("ab"));
        assert!(!verdict("abca"));
    }

    #[test]
    fn test_verdict_matches_reversal() {
        let words = [
            "racecar", "level", "noon", "palindrome", "abcdcba", "abccba", "ax", "xyzzyx",
            "aabaa", "aabbaa", "abab",
        ];

        for word in words {
            let reversed: String = word.chars().rev().collect();
            assert_eq!(
                verdict(word),
                word == reversed,
                "wrong verdict for {:?}",
                word
            );
        }
    }

    #[test]
    fn test_long_words_decide_within_default_budget() {
        let half = "abcde".repeat(50);
        let palindrome: String = half
            .chars()
            .chain(half.chars().rev())
            .collect();
        assert_eq!(palindrome.chars().count(), 500);

        let mut machine = recognizer(DEFAULT_ALPHABET);
        machine.load(&palindrome);
        assert!(machine.run());
        assert!(machine.step_count() < machine.step_budget());

        let mut almost: String = palindrome.clone();
        almost.replace_range(0..1, "b");
        machine.load(&almost);
        assert!(!machine.run());
        assert!(machine.step_count() < machine.step_budget());
    }

    #[test]
    fn test_even_length_accepts_via_scan_blank() {
        // After the last pair is marked, rewind returns to the left edge and
        // scan walks the fully marked tape onto the right-edge blank.
        let mut machine = recognizer("ab");
        machine.load("abba");

        let mut last_applied_from = String::new();
        while !machine.is_halted() {
            if let crate::types::ActionRecord::Applied { from, to, .. } = machine.step() {
                if to == ACCEPT_STATE {
                    last_applied_from = from;
                }
            }
        }

        assert_eq!(machine.state(), ACCEPT_STATE);
        assert_eq!(last_applied_from, START_STATE);
    }

    #[test]
    fn test_odd_length_accepts_via_check_blank() {
        // The middle symbol is marked as a pair opener; its check pass finds
        // no unmarked partner and accepts on the left-edge blank.
        let mut machine = recognizer("ab");
        machine.load("aba");

        let mut last_applied_from = String::new();
        while !machine.is_halted() {
            if let crate::types::ActionRecord::Applied { from, to, .. } = machine.step() {
                if to == ACCEPT_STATE {
                    last_applied_from = from;
                }
            }
        }

        assert_eq!(machine.state(), ACCEPT_STATE);
        assert_eq!(last_applied_from, check_state('b'));
    }

    #[test]
    fn test_symbol_outside_alphabet_rejects() {
        // '9' has no scan rule, so the machine falls into the implicit reject.
        assert!(!verdict("a9a"));
    }

    #[test]
    #[should_panic(expected = "mark sentinel")]
    fn test_alphabet_containing_mark_panics() {
        table("aX");
    }

    #[test]
    #[should_panic(expected = "duplicate symbol")]
    fn test_alphabet_with_duplicates_panics() {
        table("aba");
    }
}
