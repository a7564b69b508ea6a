//! Built-in example programs, embedded at compile time.

use crate::parser::parse;
use crate::types::{Program, TuringMachineError};
use tracing::warn;

// Default embedded programs
const PROGRAM_TEXTS: [&str; 3] = [
    include_str!("../programs/binary-increment.json"),
    include_str!("../programs/even-zeros.json"),
    include_str!("../programs/unary-addition.json"),
];

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Program> = PROGRAM_TEXTS
        .iter()
        .filter_map(|text| match serde_json::from_str::<Program>(text) {
            Ok(program) => Some(program),
            Err(e) => {
                warn!(error = %e, "failed to decode embedded program");
                None
            }
        })
        .collect();
}

/// Summary of a built-in program.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub initial_state: String,
    pub initial_tape: String,
    pub state_count: usize,
    pub transition_count: usize,
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Program, TuringMachineError> {
        PROGRAMS.get(index).cloned().ok_or_else(|| {
            TuringMachineError::ValidationError(format!("Program index {} out of range", index))
        })
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<Program, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name == name)
            .cloned()
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program '{}' not found", name))
            })
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        PROGRAMS.iter().map(|program| program.name.clone()).collect()
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let program = Self::get_program_by_index(index)?;
        let table = parse(&program.transitions);
        let initial_state = program
            .initial_state
            .clone()
            .or_else(|| table.initial_state().map(str::to_string))
            .unwrap_or_default();

        Ok(ProgramInfo {
            index,
            name: program.name,
            initial_state,
            initial_tape: program.tape,
            state_count: table.states().len(),
            transition_count: table.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::TuringMachine;
    use crate::types::{HALT_ACCEPT, HALT_REJECT};

    fn run_builtin(name: &str, tape: Option<&str>) -> (String, String) {
        let program = ProgramManager::get_program_by_name(name).unwrap();
        let mut machine = TuringMachine::new(&program).unwrap();
        if let Some(tape) = tape {
            machine.set_tape(tape);
        }

        let state = machine.run().to_string();
        (state, machine.tape_view().to_string())
    }

    #[test]
    fn test_all_programs_load() {
        assert_eq!(ProgramManager::count(), PROGRAM_TEXTS.len());

        for program in PROGRAMS.iter() {
            assert!(TuringMachine::new(program).is_ok(), "{}", program.name);
        }
    }

    #[test]
    fn test_list_program_names() {
        assert_eq!(
            ProgramManager::list_program_names(),
            vec!["binary-increment", "even-zeros", "unary-addition"]
        );
    }

    #[test]
    fn test_get_program_errors() {
        assert!(ProgramManager::get_program_by_index(99).is_err());
        assert!(ProgramManager::get_program_by_name("missing").is_err());
    }

    #[test]
    fn test_get_program_info() {
        let info = ProgramManager::get_program_info(0).unwrap();

        assert_eq!(info.name, "binary-increment");
        assert_eq!(info.initial_state, "right");
        assert_eq!(info.initial_tape, "1011");
        assert_eq!(info.state_count, 4);
        assert_eq!(info.transition_count, 9);
    }

    #[test]
    fn test_binary_increment() {
        assert_eq!(
            run_builtin("binary-increment", None),
            (HALT_ACCEPT.to_string(), "1100".to_string())
        );
        assert_eq!(
            run_builtin("binary-increment", Some("111")),
            (HALT_ACCEPT.to_string(), "1000".to_string())
        );
    }

    #[test]
    fn test_even_zeros() {
        assert_eq!(run_builtin("even-zeros", None).0, HALT_ACCEPT);
        assert_eq!(run_builtin("even-zeros", Some("10")).0, HALT_REJECT);
        assert_eq!(run_builtin("even-zeros", Some("")).0, HALT_ACCEPT);
    }

    #[test]
    fn test_unary_addition() {
        assert_eq!(
            run_builtin("unary-addition", None),
            (HALT_ACCEPT.to_string(), "11111_".to_string())
        );
    }
}
