//! This module defines the `TuringMachine` struct, which simulates a deterministic
//! single-tape Turing Machine. It owns the control state, the tape, the transition
//! table and the history of applied rules, and can step forward, step back, or run
//! until a terminal state is reached.

use crate::analyzer::analyze;
use crate::parser::parse_with_mode;
use crate::table::TransitionTable;
use crate::tape::Tape;
use crate::types::{
    is_terminal_state, Abort, Halt, Mode, Program, Step, Transition, TuringMachineError,
    HALT_ABORT,
};
use tracing::{debug, trace};

/// Represents a single-tape Turing Machine.
#[derive(Debug, Clone, PartialEq)]
pub struct TuringMachine {
    state: String,
    initial_state: String,
    input: String,
    tape: Tape,
    head: isize,
    table: TransitionTable,
    /// Indices into `table` of every applied rule, oldest first.
    history: Vec<usize>,
    /// The state the machine was in when the last forward step aborted.
    aborted_from: Option<String>,
}

impl TuringMachine {
    /// Creates a new `TuringMachine` from a `Program`.
    ///
    /// The transitions are parsed according to the program's mode. In `Mode::Strict`
    /// the table is also analyzed before the machine is built.
    ///
    /// # Returns
    ///
    /// * `Ok(TuringMachine)` positioned at the start of the tape, in the initial state.
    /// * `Err(TuringMachineError::MissingInitialState)` if no rules were parsed and no
    ///   initial state was given.
    /// * `Err(TuringMachineError::MalformedLine)` or `Err(TuringMachineError::ValidationError)`
    ///   in strict mode.
    pub fn new(program: &Program) -> Result<Self, TuringMachineError> {
        let table = parse_with_mode(&program.transitions, program.mode)?;
        let machine = Self::from_table(table, &program.tape, program.initial_state.as_deref())?;

        if program.mode == Mode::Strict {
            analyze(&machine.table, &machine.initial_state)?;
        }

        Ok(machine)
    }

    /// Creates a machine from an already parsed table.
    ///
    /// `initial_state` defaults to the `start` of the first rule when `None` or empty.
    pub fn from_table(
        table: TransitionTable,
        tape: &str,
        initial_state: Option<&str>,
    ) -> Result<Self, TuringMachineError> {
        let initial_state = initial_state
            .filter(|state| !state.is_empty())
            .or_else(|| table.initial_state())
            .map(str::to_string)
            .ok_or(TuringMachineError::MissingInitialState)?;

        debug!(
            transitions = table.len(),
            initial_state = %initial_state,
            tape = tape,
            "machine created"
        );

        Ok(Self {
            state: initial_state.clone(),
            initial_state,
            input: tape.to_string(),
            tape: Tape::new(tape),
            head: 0,
            table,
            history: Vec::new(),
            aborted_from: None,
        })
    }

    /// Executes a single forward step.
    ///
    /// # Returns
    ///
    /// * `Step::Halted` if the machine is already in a terminal state.
    /// * `Step::Aborted` if no rule matches, or the matching rule has an invalid
    ///   direction. The machine moves to `halt-abort` and nothing else changes.
    /// * `Step::Applied` with the new tape, head and applied rule otherwise.
    pub fn step(&mut self) -> Step {
        if self.is_halted() {
            return Step::Halted {
                state: self.state.clone(),
            };
        }

        let symbol = self.symbol();
        let (index, transition) = match self.table.find(&self.state, symbol) {
            Some((index, transition)) => (index, transition.clone()),
            None => {
                return self.abort(Abort::UndefinedTransition {
                    state: self.state.clone(),
                    symbol,
                })
            }
        };

        let Some(offset) = transition.direction.offset() else {
            return self.abort(Abort::InvalidDirection {
                index,
                token: transition.direction.to_string(),
            });
        };

        self.tape.write(self.head, transition.write);
        self.head += offset;
        self.state = transition.end.clone();
        self.history.push(index);

        trace!(step = self.history.len(), rule = %transition, head = self.head, "applied");

        Step::Applied {
            tape: self.tape(),
            head: self.head,
            is_terminal: self.is_halted(),
            transition,
        }
    }

    /// Undoes the most recent forward step.
    ///
    /// An abort is undone by restoring the state the machine aborted from. Otherwise
    /// the last applied rule is reverted: the head moves back, the symbol it read is
    /// written back, and the rule's start state is restored.
    ///
    /// # Returns
    ///
    /// * `Step::NoOp` if the machine is in its initial configuration.
    /// * `Step::Reverted` with the restored tape and head otherwise.
    pub fn step_back(&mut self) -> Step {
        if let Some(state) = self.aborted_from.take() {
            trace!(state = %state, "abort reverted");
            self.state = state;
            return self.reverted();
        }

        let Some(index) = self.history.pop() else {
            return Step::NoOp;
        };

        let Some(transition) = self.table.get(index) else {
            return Step::NoOp;
        };

        if let Some(offset) = transition.direction.reverse().and_then(|d| d.offset()) {
            self.head += offset;
        }
        self.tape.write(self.head, transition.read);
        self.state = transition.start.clone();

        trace!(step = self.history.len(), rule = %transition, head = self.head, "reverted");

        self.reverted()
    }

    /// Runs the machine until it reaches a terminal state and returns that state.
    ///
    /// This does not return if the machine never halts. See [`Self::run_with_limit`].
    pub fn run(&mut self) -> &str {
        while !self.is_halted() {
            self.step();
        }

        &self.state
    }

    /// Runs the machine for at most `max_steps` forward steps.
    ///
    /// # Returns
    ///
    /// * `Ok(state)` with the terminal state reached.
    /// * `Err(TuringMachineError::StepLimitExceeded)` if the machine is still running.
    pub fn run_with_limit(&mut self, max_steps: usize) -> Result<&str, TuringMachineError> {
        for _ in 0..max_steps {
            if self.is_halted() {
                break;
            }
            self.step();
        }

        if !self.is_halted() {
            debug!(max_steps, state = %self.state, "step limit exceeded");
            return Err(TuringMachineError::StepLimitExceeded(max_steps));
        }

        Ok(&self.state)
    }

    /// Replaces the tape and resets the machine to its initial configuration.
    /// The transition table is kept.
    pub fn set_tape(&mut self, input: &str) {
        self.input = input.to_string();
        self.reset();
    }

    /// Resets the machine to its initial configuration with the last supplied tape.
    pub fn reset(&mut self) {
        self.state = self.initial_state.clone();
        self.tape = Tape::new(&self.input);
        self.head = 0;
        self.history.clear();
        self.aborted_from = None;
    }

    /// Returns the current control state.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the state the machine starts from.
    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    /// Returns a copy of the tape cells, leftmost first.
    pub fn tape(&self) -> Vec<char> {
        self.tape.to_vec()
    }

    /// Returns a read-only view of the tape.
    pub fn tape_view(&self) -> &Tape {
        &self.tape
    }

    /// Returns the head position.
    pub fn head(&self) -> isize {
        self.head
    }

    /// Returns the symbol under the head.
    pub fn symbol(&self) -> char {
        self.tape.read(self.head)
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.table
    }

    /// Returns the table indices of the applied rules, oldest first.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Returns the number of rules currently applied.
    pub fn step_count(&self) -> usize {
        self.history.len()
    }

    /// Returns the rule that the next forward step would apply, if any.
    pub fn transition(&self) -> Option<&Transition> {
        if self.is_halted() {
            return None;
        }

        self.table
            .find(&self.state, self.symbol())
            .map(|(_, transition)| transition)
    }

    /// Checks if the machine is in one of the terminal states.
    pub fn is_halted(&self) -> bool {
        is_terminal_state(&self.state)
    }

    /// Returns the terminal outcome, if the machine has halted.
    pub fn halt(&self) -> Option<Halt> {
        Halt::from_state(&self.state)
    }

    fn abort(&mut self, reason: Abort) -> Step {
        debug!(state = %self.state, head = self.head, %reason, "computation aborted");

        self.aborted_from = Some(std::mem::replace(&mut self.state, HALT_ABORT.to_string()));
        Step::Aborted { reason }
    }

    fn reverted(&self) -> Step {
        Step::Reverted {
            tape: self.tape(),
            head: self.head,
            is_terminal: self.is_halted(),
        }
    }
}
