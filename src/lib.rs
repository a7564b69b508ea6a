//! This crate provides the core logic for a deterministic, single-tape Turing Machine interpreter.
//! It includes modules for parsing transition tables, representing an unbounded tape, executing
//! and undoing steps, analyzing tables in strict mode, and loading example programs.

pub mod analyzer;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the parsing functions from the parser module.
pub use parser::{parse, parse_with_mode};
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the `TransitionTable` struct from the table module.
pub use table::TransitionTable;
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports various types related to machine definition and execution from the types module.
pub use types::{
    Abort, Direction, Halt, Mode, Program, Step, Transition, TuringMachineError, BLANK_SYMBOL,
    HALT_ABORT, HALT_ACCEPT, HALT_REJECT, MAX_EXECUTION_STEPS,
};
