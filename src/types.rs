//! This module defines the core data structures and types used throughout the interpreter,
//! including program descriptions, transitions, step outcomes, and error types.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// The symbol read from any tape cell that has never been written.
pub const BLANK_SYMBOL: char = '_';
/// Terminal state entered when the machine accepts its input.
pub const HALT_ACCEPT: &str = "halt-accept";
/// Terminal state entered when the machine rejects its input.
pub const HALT_REJECT: &str = "halt-reject";
/// Terminal state entered when no transition applies.
pub const HALT_ABORT: &str = "halt-abort";
/// The reserved names of every terminal state.
pub const TERMINAL_STATES: [&str; 3] = [HALT_ACCEPT, HALT_REJECT, HALT_ABORT];
/// Default ceiling for bounded runs.
pub const MAX_EXECUTION_STEPS: usize = 10000;

/// Returns `true` if `state` is one of the reserved terminal states.
pub fn is_terminal_state(state: &str) -> bool {
    TERMINAL_STATES.contains(&state)
}

/// Describes a machine to construct: its initial tape, transition table text,
/// and optionally the state to start from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Program {
    /// A display name, used by the built-in registry and the loader.
    pub name: String,
    /// Initial tape content, one symbol per character.
    pub tape: String,
    /// Newline separated transitions: `<start> <read> <write> <move> <end>`.
    pub transitions: String,
    /// Overrides the default initial state (the `start` of the first rule).
    #[serde(alias = "initialState", deserialize_with = "non_empty_string")]
    pub initial_state: Option<String>,
    /// How strictly the transitions are parsed and checked.
    pub mode: Mode,
}

impl Program {
    /// Creates a program from tape content and transition text.
    pub fn new(tape: impl Into<String>, transitions: impl Into<String>) -> Self {
        Self {
            tape: tape.into(),
            transitions: transitions.into(),
            ..Self::default()
        }
    }

    /// Sets the initial state. An empty string leaves the default in place.
    pub fn with_initial_state(mut self, state: impl Into<String>) -> Self {
        let state = state.into();
        self.initial_state = (!state.is_empty()).then_some(state);
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// The parsing mode for a program.
///
/// - `Normal` (default): malformed lines are dropped and ambiguous tables resolve first-match-wins.
/// - `Strict`: malformed lines are errors and the table is analyzed before execution.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Strict,
}

/// The direction the head moves after a transition.
///
/// Any token other than `l` or `r` is kept as `Unknown` so that executing the
/// rule aborts the computation instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// An unsupported movement token.
    Unknown(String),
}

impl Direction {
    /// Returns the direction that undoes this one, if it is a valid movement.
    pub fn reverse(&self) -> Option<Direction> {
        match self {
            Direction::Left => Some(Direction::Right),
            Direction::Right => Some(Direction::Left),
            Direction::Unknown(_) => None,
        }
    }

    /// The signed offset applied to the head, if valid.
    pub fn offset(&self) -> Option<isize> {
        match self {
            Direction::Left => Some(-1),
            Direction::Right => Some(1),
            Direction::Unknown(_) => None,
        }
    }
}

impl From<&str> for Direction {
    fn from(token: &str) -> Self {
        match token {
            "l" => Direction::Left,
            "r" => Direction::Right,
            other => Direction::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Direction {
    fn from(token: String) -> Self {
        Direction::from(token.as_str())
    }
}

impl From<Direction> for String {
    fn from(direction: Direction) -> Self {
        direction.to_string()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "l"),
            Direction::Right => write!(f, "r"),
            Direction::Unknown(token) => write!(f, "{token}"),
        }
    }
}

/// A single rule of the transition function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state the rule applies in.
    pub start: String,
    /// The symbol that must be under the head.
    pub read: char,
    /// The symbol written under the head.
    pub write: char,
    /// Where the head moves afterwards.
    #[serde(rename = "move")]
    pub direction: Direction,
    /// The state the machine enters.
    pub end: String,
}

impl Transition {
    pub fn new(
        start: impl Into<String>,
        read: char,
        write: char,
        direction: Direction,
        end: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            read,
            write,
            direction,
            end: end.into(),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.start, self.read, self.write, self.direction, self.end
        )
    }
}

/// The terminal outcome of a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Halt {
    Accept,
    Reject,
    Abort,
}

impl Halt {
    /// Maps a terminal state name to its outcome.
    pub fn from_state(state: &str) -> Option<Halt> {
        match state {
            HALT_ACCEPT => Some(Halt::Accept),
            HALT_REJECT => Some(Halt::Reject),
            HALT_ABORT => Some(Halt::Abort),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Halt::Accept => HALT_ACCEPT,
            Halt::Reject => HALT_REJECT,
            Halt::Abort => HALT_ABORT,
        }
    }
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a forward step aborted the computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Abort {
    /// No rule matches the current state and the symbol under the head.
    UndefinedTransition { state: String, symbol: char },
    /// The matching rule carries a movement token other than `l` or `r`.
    InvalidDirection { index: usize, token: String },
}

impl fmt::Display for Abort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Abort::UndefinedTransition { state, symbol } => {
                write!(f, "no rule defined for state {state} and symbol '{symbol}'")
            }
            Abort::InvalidDirection { index, token } => {
                write!(f, "rule #{index} has invalid direction '{token}'")
            }
        }
    }
}

/// Represents the outcome of a single forward or backward step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Step {
    /// A rule was applied.
    Applied {
        tape: Vec<char>,
        head: isize,
        is_terminal: bool,
        transition: Transition,
    },
    /// The most recent step was undone.
    Reverted {
        tape: Vec<char>,
        head: isize,
        is_terminal: bool,
    },
    /// The machine was already in the given terminal state; nothing changed.
    Halted { state: String },
    /// The computation aborted and the machine is now in `halt-abort`.
    Aborted { reason: Abort },
    /// There was nothing to undo.
    NoOp,
}

impl Step {
    /// Returns `true` if the step changed the machine's configuration.
    pub fn is_progress(&self) -> bool {
        matches!(
            self,
            Step::Applied { .. } | Step::Reverted { .. } | Step::Aborted { .. }
        )
    }
}

/// Represents various errors that can occur while building or running a machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// No initial state was supplied and the transition table is empty.
    #[error("Missing initial state: no transitions were parsed and none was given")]
    MissingInitialState,
    /// A non-empty line does not describe a transition (strict mode only).
    #[error("Malformed transition on line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },
    /// The transition table failed analysis (strict mode only).
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// A bounded run did not reach a terminal state.
    #[error("Machine did not halt within {0} steps")]
    StepLimitExceeded(usize),
    /// Reading a program file or directory failed.
    #[error("File error: {0}")]
    FileError(String),
    /// A program description could not be decoded.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for TuringMachineError {
    fn from(error: serde_json::Error) -> Self {
        TuringMachineError::ConfigError(error.to_string())
    }
}
