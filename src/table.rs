//! The ordered transition table and its first-match-wins lookup.

use crate::types::Transition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// An ordered list of transitions. Rules are addressed by their position,
/// which is what the execution history records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionTable {
    transitions: Vec<Transition>,
}

impl TransitionTable {
    pub fn new(transitions: Vec<Transition>) -> Self {
        Self { transitions }
    }

    /// Finds the first rule for `state` that reads `symbol`, together with its index.
    pub fn find(&self, state: &str, symbol: char) -> Option<(usize, &Transition)> {
        self.transitions
            .iter()
            .enumerate()
            .find(|(_, t)| t.start == state && t.read == symbol)
    }

    /// Returns the rule at `index`.
    pub fn get(&self, index: usize) -> Option<&Transition> {
        self.transitions.get(index)
    }

    /// The default initial state: the `start` of the first rule.
    pub fn initial_state(&self) -> Option<&str> {
        self.transitions.first().map(|t| t.start.as_str())
    }

    /// Every state named by the table, either as a start or an end.
    pub fn states(&self) -> BTreeSet<&str> {
        self.transitions
            .iter()
            .flat_map(|t| [t.start.as_str(), t.end.as_str()])
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transition> {
        self.transitions.iter()
    }

    pub fn as_slice(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl From<Vec<Transition>> for TransitionTable {
    fn from(transitions: Vec<Transition>) -> Self {
        Self::new(transitions)
    }
}

impl<'a> IntoIterator for &'a TransitionTable {
    type Item = &'a Transition;
    type IntoIter = std::slice::Iter<'a, Transition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders one canonical line per rule, which parses back to the same table.
impl fmt::Display for TransitionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, transition) in self.transitions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{transition}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::types::Direction;

    #[test]
    fn test_find_first_match_wins() {
        let table = TransitionTable::new(vec![
            Transition::new("qin", '0', '1', Direction::Right, "q1"),
            Transition::new("qin", '0', '0', Direction::Left, "q2"),
        ]);

        let (index, transition) = table.find("qin", '0').unwrap();
        assert_eq!(index, 0);
        assert_eq!(transition.end, "q1");
        assert!(table.find("qin", '1').is_none());
        assert!(table.find("q1", '0').is_none());
    }

    #[test]
    fn test_get_by_index() {
        let table = parse("qin 0 0 r q1\nq1 1 1 r halt-accept");

        assert_eq!(table.get(1).unwrap().start, "q1");
        assert!(table.get(2).is_none());
    }

    #[test]
    fn test_initial_state_and_states() {
        let table = parse("qin 0 0 r q1\nq1 1 1 r halt-accept");

        assert_eq!(table.initial_state(), Some("qin"));
        assert_eq!(
            table.states().into_iter().collect::<Vec<_>>(),
            vec!["halt-accept", "q1", "qin"]
        );
        assert_eq!(TransitionTable::default().initial_state(), None);
    }

    #[test]
    fn test_display_round_trips_through_parser() {
        let table = parse("QIN 0 0 R q1\n  q1   1 _ L halt-reject ");
        let rendered = table.to_string();

        assert_eq!(rendered, "qin 0 0 r q1\nq1 1 _ l halt-reject");
        assert_eq!(parse(&rendered), table);
    }

    #[test]
    fn test_serializes_as_list() {
        let table = parse("qin 0 0 r q1");
        let json = serde_json::to_string(&table).unwrap();

        assert_eq!(
            json,
            r#"[{"start":"qin","read":"0","write":"0","move":"r","end":"q1"}]"#
        );
    }
}
