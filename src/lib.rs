//! This crate provides the core logic for a single-tape Turing machine
//! palindrome recognizer. It includes modules for the growable symbol tape,
//! the wildcard-capable transition table, the stepping/execution engine, the
//! generated mark-and-compare palindrome rule set, and static table analysis.
//!
//! The crate performs no I/O and defines no text formatting: presentation
//! and persistence collaborators consume the structured [`ActionRecord`]
//! stream and [`Snapshot`] observers.

pub mod analyzer;
pub mod machine;
pub mod palindrome;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the `analyze` function from the analyzer module.
pub use analyzer::analyze;
/// Re-exports the `Machine` struct from the machine module.
pub use machine::Machine;
/// Re-exports the `TableBuilder` and `TransitionTable` structs from the table module.
pub use table::{TableBuilder, TransitionTable};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the shared data types and constants from the types module.
pub use types::{
    Action, ActionRecord, Direction, Match, Snapshot, TableError, Write, DEFAULT_BLANK_SYMBOL,
    DEFAULT_STEP_BUDGET,
};
