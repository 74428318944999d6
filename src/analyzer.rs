//! This module validates a transition table against its designated state labels
//! before execution, catching malformed tables that would otherwise corrupt a
//! recognition result: undefined start states, non-terminal halt states,
//! transitions into undefined states, and unreachable states.

use std::collections::HashSet;

use crate::table::TransitionTable;
use crate::types::TableError;

/// Analyzes `table` against the designated start, accept, and reject labels.
///
/// Checks are run in order and the first violation is returned:
/// 1. The start state must be defined in the table.
/// 2. The accept and reject states must have no outgoing rules.
/// 3. Every `next_state` must be defined in the table or be one of the
///    designated terminals.
/// 4. Every defined state must be reachable from the start state.
pub fn analyze(
    table: &TransitionTable,
    start_state: &str,
    accept_state: &str,
    reject_state: &str,
) -> Result<(), TableError> {
    check_start_defined(table, start_state)?;
    check_terminal_labels(table, accept_state, reject_state)?;
    check_next_states_defined(table, accept_state, reject_state)?;
    check_reachability(table, start_state)?;

    Ok(())
}

fn check_start_defined(table: &TransitionTable, start_state: &str) -> Result<(), TableError> {
    if !table.contains(start_state) {
        return Err(TableError::UndefinedStartState(start_state.to_string()));
    }

    Ok(())
}

/// The designated halt labels may be absent from the table entirely (halting
/// is a property of the label, not of table membership), but if present they
/// must not carry outgoing rules.
fn check_terminal_labels(
    table: &TransitionTable,
    accept_state: &str,
    reject_state: &str,
) -> Result<(), TableError> {
    for state in [accept_state, reject_state] {
        if table.contains(state) && !table.is_terminal(state) {
            return Err(TableError::NonTerminalHaltState(state.to_string()));
        }
    }

    Ok(())
}

fn check_next_states_defined(
    table: &TransitionTable,
    accept_state: &str,
    reject_state: &str,
) -> Result<(), TableError> {
    let mut undefined: Vec<String> = Vec::new();

    for state in table.states() {
        for action in table.actions(state) {
            let next = action.next_state.as_str();
            if !table.contains(next)
                && next != accept_state
                && next != reject_state
                && !undefined.contains(&action.next_state)
            {
                undefined.push(action.next_state.clone());
            }
        }
    }

    if !undefined.is_empty() {
        undefined.sort();
        return Err(TableError::UndefinedNextStates(undefined));
    }

    Ok(())
}

/// Breadth-first traversal over actions, starting from the start state.
fn check_reachability(table: &TransitionTable, start_state: &str) -> Result<(), TableError> {
    let mut visited = HashSet::new();
    let mut queue = vec![start_state.to_string()];

    while let Some(state) = queue.pop() {
        if !visited.insert(state.clone()) {
            continue;
        }

        for action in table.actions(&state) {
            if !visited.contains(&action.next_state) {
                queue.push(action.next_state.clone());
            }
        }
    }

    let mut unreachable: Vec<String> = table
        .states()
        .filter(|state| !visited.contains(*state))
        .map(String::from)
        .collect();

    if !unreachable.is_empty() {
        unreachable.sort();
        return Err(TableError::UnreachableStates(unreachable));
    }

    Ok(())
}
