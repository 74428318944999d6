//! This module defines the `Machine` struct, which drives a tape and a shared
//! transition table through the read → lookup → write → move → transition cycle
//! until a halting verdict is reached or the step budget runs out.

use std::sync::Arc;

use crate::table::TransitionTable;
use crate::tape::Tape;
use crate::types::{ActionRecord, Direction, Snapshot, Write, DEFAULT_STEP_BUDGET};

/// A single-tape deterministic Turing machine.
///
/// The machine exclusively owns its tape and holds a shared, read-only
/// reference to its transition table; one table instance may drive any
/// number of machines, including on other threads. All mutation goes
/// through `&mut self`, confining a machine to one logical owner at a time.
#[derive(Debug)]
pub struct Machine {
    table: Arc<TransitionTable>,
    start_state: String,
    accept_state: String,
    reject_state: String,
    blank: char,
    tape: Tape,
    head: usize,
    state: String,
    step_count: usize,
    step_budget: usize,
}

impl Machine {
    /// Creates a machine over `table` with the three designated state labels
    /// and the blank symbol. The tape starts empty; call [`Machine::load`]
    /// to seed an input.
    pub fn new(
        table: Arc<TransitionTable>,
        start_state: &str,
        accept_state: &str,
        reject_state: &str,
        blank: char,
    ) -> Self {
        Self {
            table,
            start_state: start_state.to_string(),
            accept_state: accept_state.to_string(),
            reject_state: reject_state.to_string(),
            blank,
            tape: Tape::new("", blank),
            head: 0,
            state: start_state.to_string(),
            step_count: 0,
            step_budget: DEFAULT_STEP_BUDGET,
        }
    }

    /// Replaces the tape with one seeded from `input` and resets the head,
    /// the current state, and the step counter.
    pub fn load(&mut self, input: &str) {
        self.tape = Tape::new(input, self.blank);
        self.head = 0;
        self.state = self.start_state.clone();
        self.step_count = 0;
    }

    /// Executes a single step of the computation and returns its record.
    ///
    /// A halted machine returns [`ActionRecord::Halted`] without touching
    /// anything. An exhausted step budget forces the reject state and
    /// returns [`ActionRecord::BudgetExhausted`]. A missing rule for the
    /// current `(state, symbol)` pair forces the reject state and returns
    /// [`ActionRecord::NoRule`]; this counts as a step. Otherwise the rule
    /// is applied and [`ActionRecord::Applied`] describes what happened.
    pub fn step(&mut self) -> ActionRecord {
        if self.is_halted() {
            return ActionRecord::Halted {
                state: self.state.clone(),
            };
        }

        if self.step_count >= self.step_budget {
            let state = std::mem::replace(&mut self.state, self.reject_state.clone());
            return ActionRecord::BudgetExhausted {
                state,
                steps: self.step_count,
            };
        }

        let read = self.tape.read(self.head);
        let action = match self.table.get(&self.state, read) {
            Some(action) => action.clone(),
            None => {
                let state = std::mem::replace(&mut self.state, self.reject_state.clone());
                self.step_count += 1;
                return ActionRecord::NoRule { state, read };
            }
        };

        let written = match action.write {
            Write::Symbol(symbol) => {
                self.tape.write(self.head, symbol);
                symbol
            }
            Write::Preserve => read,
        };

        self.move_head(action.direction);

        let from = std::mem::replace(&mut self.state, action.next_state.clone());
        self.step_count += 1;

        ActionRecord::Applied {
            from,
            read,
            written,
            direction: action.direction,
            to: action.next_state,
        }
    }

    /// Moves the head one cell, keeping it a valid index at all times.
    ///
    /// Moving left at position 0 extends the tape by one blank cell at the
    /// left edge and leaves the head at 0, which is how an infinite tape is
    /// simulated without negative indices. Moving right makes the new
    /// position addressable before the next read.
    fn move_head(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if self.head == 0 {
                    self.tape.extend_left();
                } else {
                    self.head -= 1;
                }
            }
            Direction::Right => {
                self.head += 1;
                self.tape.ensure_index(self.head);
            }
            Direction::Stay => {}
        }
    }

    /// Steps until the machine halts. The budget check inside [`Machine::step`]
    /// guarantees termination: a run that never reaches accept or reject on
    /// its own is forced into reject once the budget is spent.
    ///
    /// Returns `true` iff the final state is the accept state.
    pub fn run(&mut self) -> bool {
        while !self.is_halted() {
            self.step();
        }

        self.state == self.accept_state
    }

    /// Checks whether the machine is in one of its designated terminal states.
    pub fn is_halted(&self) -> bool {
        self.state == self.accept_state || self.state == self.reject_state
    }

    /// Returns the current state label.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the current head position.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the number of counted steps since the last load.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the current step budget.
    pub fn step_budget(&self) -> usize {
        self.step_budget
    }

    /// Overrides the step budget for subsequent runs.
    pub fn set_step_budget(&mut self, budget: usize) {
        self.step_budget = budget;
    }

    /// Returns the machine's tape.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the blank symbol.
    pub fn blank(&self) -> char {
        self.blank
    }

    /// Captures the tape contents, head position, and state label for
    /// presentation or persistence collaborators. Pure observer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tape: self.tape.symbols(),
            head: self.head,
            state: self.state.clone(),
        }
    }
}
