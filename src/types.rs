//! This module defines the core data structures and types used throughout the palindrome
//! recognizer, including transition actions, step records, machine snapshots, and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The default blank symbol used on the tape.
pub const DEFAULT_BLANK_SYMBOL: char = '⊔';
/// The default maximum number of counted steps before a run is forced to reject.
///
/// Large enough that the O(n²) mark-and-compare sweep decides any word of
/// length ≤ 500 over the default alphabet.
pub const DEFAULT_STEP_BUDGET: usize = 1_000_000;

/// Represents the possible directions a tape head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

/// The match criterion of a transition rule: which symbol under the head it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Match {
    /// Matches exactly this symbol.
    Symbol(char),
    /// Matches any symbol not otherwise listed for the state.
    AnyOther,
}

/// The write half of a transition rule: what ends up in the cell under the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Write {
    /// Store this symbol.
    Symbol(char),
    /// Leave the symbol that was read unchanged.
    Preserve,
}

/// The action half of a transition rule: what to write, where to move, and
/// which state to adopt next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The symbol to write to the cell under the head.
    pub write: Write,
    /// The direction to move the head after writing.
    pub direction: Direction,
    /// The next state the machine transitions to.
    pub next_state: String,
}

impl Action {
    /// Creates a new `Action`.
    pub fn new(write: Write, direction: Direction, next_state: &str) -> Self {
        Self {
            write,
            direction,
            next_state: next_state.to_string(),
        }
    }
}

/// The structured outcome of a single `step()` call.
///
/// Records are data, not text; any human-readable rendering belongs to a
/// presentation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionRecord {
    /// The machine was already halted; nothing happened.
    Halted {
        /// The terminal state the machine rests in.
        state: String,
    },
    /// The step budget was spent before this step; the machine was forced
    /// into the reject state. The step counter is left untouched.
    BudgetExhausted {
        /// The state the run was abandoned in.
        state: String,
        /// The number of steps taken when the budget ran out.
        steps: usize,
    },
    /// No rule matched the current state and symbol; the machine moved to
    /// the reject state. Counts as one step.
    NoRule {
        /// The state the machine was in when the lookup failed.
        state: String,
        /// The symbol that was read from the tape.
        read: char,
    },
    /// A rule was applied. Counts as one step.
    Applied {
        /// The state the machine was in before the step.
        from: String,
        /// The symbol read from under the head.
        read: char,
        /// The symbol physically on the tape afterwards. Equal to `read`
        /// when the rule's write was `Write::Preserve`.
        written: char,
        /// The direction the head moved.
        direction: Direction,
        /// The state the machine adopted.
        to: String,
    },
}

/// A point-in-time view of a machine, for presentation or persistence collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The full tape contents, left edge first.
    pub tape: Vec<char>,
    /// The head position.
    pub head: usize,
    /// The current state label.
    pub state: String,
}

/// Errors found when validating a transition table against its designated labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The start state has no rules defined in the table.
    #[error("Start state '{0}' is not defined in the table")]
    UndefinedStartState(String),
    /// A designated terminal state (accept or reject) has outgoing rules.
    #[error("Designated terminal state '{0}' has outgoing rules")]
    NonTerminalHaltState(String),
    /// Transitions reference states that are neither defined nor designated terminals.
    #[error("Transitions reference undefined states: {0:?}")]
    UndefinedNextStates(Vec<String>),
    /// States defined in the table cannot be reached from the start state.
    #[error("Unreachable states detected: {0:?}")]
    UnreachableStates(Vec<String>),
}
