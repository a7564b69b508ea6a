//! This module provides functions for analyzing transition tables to detect common errors
//! before execution. It backs strict mode: ambiguous rules, unsupported directions,
//! initial states with nothing to do, rules leaving terminal states, and unreachable states.

use crate::table::TransitionTable;
use crate::types::{is_terminal_state, Direction, TuringMachineError};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Represents various errors that can be found during the analysis of a transition table.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// More than one rule matches the same state and symbol.
    AmbiguousTransitions(Vec<String>),
    /// Rules whose movement token is neither `l` nor `r`.
    InvalidDirections(Vec<String>),
    /// The initial state is not terminal and no rule starts from it.
    InvalidStartState(String),
    /// Rules that start from a terminal state and can never fire.
    TerminalStateTransitions(Vec<String>),
    /// States with rules that cannot be reached from the initial state.
    UnreachableStates(Vec<String>),
}

impl From<AnalysisError> for TuringMachineError {
    /// Converts an `AnalysisError` into a `TuringMachineError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::AmbiguousTransitions(rules) => TuringMachineError::ValidationError(
                format!("Ambiguous transitions for the same state and symbol: {:?}", rules),
            ),
            AnalysisError::InvalidDirections(rules) => TuringMachineError::ValidationError(
                format!("Transitions with invalid directions: {:?}", rules),
            ),
            AnalysisError::InvalidStartState(state) => {
                TuringMachineError::ValidationError(format!("Invalid start state: {}", state))
            }
            AnalysisError::TerminalStateTransitions(rules) => TuringMachineError::ValidationError(
                format!("Transitions leaving a terminal state: {:?}", rules),
            ),
            AnalysisError::UnreachableStates(states) => TuringMachineError::ValidationError(
                format!("Unreachable states detected: {:?}", states),
            ),
        }
    }
}

/// Analyzes a transition table for structural and logical errors.
///
/// All checks run; the first failure is reported.
///
/// # Arguments
///
/// * `table` - The parsed transition table.
/// * `initial_state` - The state execution starts from.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(TuringMachineError::ValidationError)` if any check fails.
pub fn analyze(table: &TransitionTable, initial_state: &str) -> Result<(), TuringMachineError> {
    let checks: [fn(&TransitionTable, &str) -> Result<(), AnalysisError>; 5] = [
        check_ambiguous_transitions,
        check_directions,
        check_valid_start_state,
        check_terminal_state_transitions,
        check_unreachable_states,
    ];

    match checks.iter().find_map(|f| f(table, initial_state).err()) {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

/// Checks that no two rules share the same `(start, read)` pair.
fn check_ambiguous_transitions(table: &TransitionTable, _: &str) -> Result<(), AnalysisError> {
    let mut first_seen: HashMap<(&str, char), usize> = HashMap::new();
    let mut ambiguous = Vec::new();

    for (i, transition) in table.iter().enumerate() {
        let key = (transition.start.as_str(), transition.read);
        if let Some(first) = first_seen.get(&key) {
            ambiguous.push(format!("#{} shadowed by #{}: {}", i, first, transition));
        } else {
            first_seen.insert(key, i);
        }
    }

    if !ambiguous.is_empty() {
        return Err(AnalysisError::AmbiguousTransitions(ambiguous));
    }

    Ok(())
}

/// Checks that every rule moves the head left or right.
fn check_directions(table: &TransitionTable, _: &str) -> Result<(), AnalysisError> {
    let invalid: Vec<String> = table
        .iter()
        .enumerate()
        .filter(|(_, t)| matches!(t.direction, Direction::Unknown(_)))
        .map(|(i, t)| format!("#{}: {}", i, t))
        .collect();

    if !invalid.is_empty() {
        return Err(AnalysisError::InvalidDirections(invalid));
    }

    Ok(())
}

/// Checks that the initial state is either terminal or has at least one rule.
fn check_valid_start_state(
    table: &TransitionTable,
    initial_state: &str,
) -> Result<(), AnalysisError> {
    if is_terminal_state(initial_state) || table.iter().any(|t| t.start == initial_state) {
        return Ok(());
    }

    Err(AnalysisError::InvalidStartState(initial_state.to_string()))
}

/// Checks that no rule starts from a terminal state. Terminal states are absorbing,
/// so such rules are dead.
fn check_terminal_state_transitions(
    table: &TransitionTable,
    _: &str,
) -> Result<(), AnalysisError> {
    let dead: Vec<String> = table
        .iter()
        .enumerate()
        .filter(|(_, t)| is_terminal_state(&t.start))
        .map(|(i, t)| format!("#{}: {}", i, t))
        .collect();

    if !dead.is_empty() {
        return Err(AnalysisError::TerminalStateTransitions(dead));
    }

    Ok(())
}

/// Checks for unreachable states by traversing rules from the initial state.
///
/// Any state that starts a rule but cannot be reached through any sequence of
/// transitions is reported. Terminal states are ignored here.
fn check_unreachable_states(
    table: &TransitionTable,
    initial_state: &str,
) -> Result<(), AnalysisError> {
    let mut visited = HashSet::new();
    let mut queue = vec![initial_state];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        for transition in table.iter().filter(|t| t.start == state) {
            if !visited.contains(transition.end.as_str()) {
                queue.push(transition.end.as_str());
            }
        }
    }

    let unreachable: BTreeSet<&str> = table
        .iter()
        .map(|t| t.start.as_str())
        .filter(|state| !is_terminal_state(state) && !visited.contains(state))
        .collect();

    if !unreachable.is_empty() {
        return Err(AnalysisError::UnreachableStates(
            unreachable.into_iter().map(String::from).collect(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn analyze_text(text: &str) -> Result<(), TuringMachineError> {
        let table = parse(text);
        let initial = table.initial_state().unwrap_or_default().to_string();
        analyze(&table, &initial)
    }

    #[test]
    fn test_valid_table() {
        let result = analyze_text("qin 0 0 r q1\nqin 1 1 r qin\nq1 1 1 r halt-accept");
        assert!(result.is_ok());
    }

    #[test]
    fn test_ambiguous_transitions() {
        let table = parse("qin 0 0 r q1\nqin 0 1 l q1\nq1 _ _ r halt-accept");

        assert_eq!(
            check_ambiguous_transitions(&table, "qin"),
            Err(AnalysisError::AmbiguousTransitions(vec![
                "#1 shadowed by #0: qin 0 1 l q1".to_string()
            ]))
        );

        let error = analyze(&table, "qin").unwrap_err();
        assert!(matches!(error, TuringMachineError::ValidationError(_)));
        assert!(error.to_string().contains("Ambiguous transitions"));
    }

    #[test]
    fn test_invalid_directions() {
        let table = parse("qin 0 0 x halt-accept");

        assert_eq!(
            check_directions(&table, "qin"),
            Err(AnalysisError::InvalidDirections(vec![
                "#0: qin 0 0 x halt-accept".to_string()
            ]))
        );
    }

    #[test]
    fn test_invalid_start_state() {
        let table = parse("qin 0 0 r halt-accept");

        assert_eq!(
            check_valid_start_state(&table, "q9"),
            Err(AnalysisError::InvalidStartState("q9".to_string()))
        );
        assert!(check_valid_start_state(&table, "halt-reject").is_ok());
    }

    #[test]
    fn test_terminal_state_transitions() {
        let table = parse("qin 0 0 r halt-accept\nhalt-accept 0 0 r qin");

        assert_eq!(
            check_terminal_state_transitions(&table, "qin"),
            Err(AnalysisError::TerminalStateTransitions(vec![
                "#1: halt-accept 0 0 r qin".to_string()
            ]))
        );
    }

    #[test]
    fn test_unreachable_states() {
        let table = parse("qin 0 0 r halt-accept\nq2 0 0 r q3\nq3 0 0 r q2");

        assert_eq!(
            check_unreachable_states(&table, "qin"),
            Err(AnalysisError::UnreachableStates(vec![
                "q2".to_string(),
                "q3".to_string()
            ]))
        );
    }

    #[test]
    fn test_first_error_is_reported() {
        let error = analyze_text("qin 0 0 r q1\nqin 0 0 s q1").unwrap_err();

        assert!(error.to_string().contains("Ambiguous"));
    }
}
