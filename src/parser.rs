//! This module parses transition table text into a [`TransitionTable`].
//!
//! Each line holds one rule, `<start> <read> <write> <move> <end>`. Lines are
//! trimmed, the first run of two or more interior spaces is collapsed to a single
//! space, the result is lowercased and split on single spaces. A line only yields a
//! rule when that split produces exactly five tokens and the read/write tokens are
//! single characters.

use crate::{
    table::TransitionTable,
    types::{Direction, Mode, Transition, TuringMachineError},
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref INTERIOR_SPACES: Regex = Regex::new(" {2,}").unwrap();
}

/// Parses transition text leniently: lines that do not describe a rule are dropped.
///
/// # Arguments
///
/// * `input` - Newline separated transitions.
///
/// # Returns
///
/// * The rules in the order they appear.
pub fn parse(input: &str) -> TransitionTable {
    input
        .split('\n')
        .enumerate()
        .filter_map(|(i, line)| {
            let transition = parse_line(line);
            if transition.is_none() && !line.trim().is_empty() {
                debug!(line = i + 1, content = line, "dropping malformed transition");
            }
            transition
        })
        .collect::<Vec<_>>()
        .into()
}

/// Parses transition text according to `mode`.
///
/// # Returns
///
/// * `Ok(TransitionTable)` with every rule in order.
/// * `Err(TuringMachineError::MalformedLine)` in `Mode::Strict` for the first
///   non-empty line that does not describe a rule.
pub fn parse_with_mode(input: &str, mode: Mode) -> Result<TransitionTable, TuringMachineError> {
    match mode {
        Mode::Normal => Ok(parse(input)),
        Mode::Strict => parse_strict(input),
    }
}

fn parse_strict(input: &str) -> Result<TransitionTable, TuringMachineError> {
    let mut transitions = Vec::new();

    for (i, line) in input.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let transition = parse_line(line).ok_or_else(|| TuringMachineError::MalformedLine {
            line: i + 1,
            content: line.trim().to_string(),
        })?;
        transitions.push(transition);
    }

    Ok(transitions.into())
}

/// Parses a single line into a rule, if it has the expected shape.
pub fn parse_line(line: &str) -> Option<Transition> {
    let normalized = normalize_line(line);
    let tokens: Vec<&str> = normalized.split(' ').collect();

    let [start, read, write, direction, end] = tokens.as_slice() else {
        return None;
    };

    Some(Transition {
        start: start.to_string(),
        read: parse_symbol(read)?,
        write: parse_symbol(write)?,
        direction: Direction::from(*direction),
        end: end.to_string(),
    })
}

/// Trims, collapses the first run of interior spaces, and lowercases.
fn normalize_line(line: &str) -> String {
    INTERIOR_SPACES
        .replacen(line.trim(), 1, " ")
        .to_lowercase()
}

fn parse_symbol(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Some(symbol),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_rules() {
        let table = parse("qin 0 0 R halt-accept\nqin 1 1 R halt-reject");

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.as_slice(),
            &[
                Transition::new("qin", '0', '0', Direction::Right, "halt-accept"),
                Transition::new("qin", '1', '1', Direction::Right, "halt-reject"),
            ]
        );
    }

    #[test]
    fn test_parse_lowercases_everything() {
        let table = parse("QIN A B L Q1");
        let transition = table.get(0).unwrap();

        assert_eq!(transition.start, "qin");
        assert_eq!(transition.read, 'a');
        assert_eq!(transition.write, 'b');
        assert_eq!(transition.direction, Direction::Left);
        assert_eq!(transition.end, "q1");
    }

    #[test]
    fn test_parse_drops_malformed_lines() {
        let input = "qin 0 0 r q1\nqin 0 0 r\n\nqin 0 0 r q1 extra\n   \nq1 1 1 r halt-accept";
        let table = parse(input);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1).unwrap().start, "q1");
    }

    #[test]
    fn test_parse_trims_and_collapses_first_space_run() {
        let table = parse("  qin    0 0 r q1  \r");

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0).unwrap().end, "q1");
    }

    #[test]
    fn test_parse_only_collapses_first_space_run() {
        // The second run of spaces leaves an empty token, giving six tokens.
        let table = parse("qin  0 0  r q1");

        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_rejects_multi_character_symbols() {
        assert!(parse_line("qin 01 0 r q1").is_none());
        assert!(parse_line("qin 0 ab r q1").is_none());
    }

    #[test]
    fn test_parse_keeps_unknown_directions() {
        let transition = parse_line("qin 0 0 s q1").unwrap();

        assert_eq!(transition.direction, Direction::Unknown("s".to_string()));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n").is_empty());
    }

    #[test]
    fn test_parse_with_mode_normal_is_lenient() {
        let table = parse_with_mode("garbage\nqin 0 0 r q1", Mode::Normal).unwrap();

        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_parse_with_mode_strict_reports_line() {
        let result = parse_with_mode("qin 0 0 r q1\n\n  bad line  ", Mode::Strict);

        assert_eq!(
            result.unwrap_err(),
            TuringMachineError::MalformedLine {
                line: 3,
                content: "bad line".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_with_mode_strict_skips_blank_lines() {
        let table = parse_with_mode("\nqin 0 0 r q1\n\n", Mode::Strict).unwrap();

        assert_eq!(table.len(), 1);
    }
}
