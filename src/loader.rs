//! This module provides the `ProgramLoader` struct, responsible for loading programs
//! from files, strings, and directories.
//!
//! Two file formats are understood: `.json` files hold a serialized [`Program`], and
//! any other file is read as plain transition table text with an empty tape.

use crate::types::{Program, TuringMachineError};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of files holding a serialized `Program`.
pub const PROGRAM_EXTENSION: &str = "json";
/// Extension of files holding bare transition table text.
pub const TRANSITIONS_EXTENSION: &str = "tm";

/// `ProgramLoader` is a utility struct for loading programs.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single program from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A `.json` program file, or a file containing transition text.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if the file is read and decoded. Programs without a name are
    ///   named after the file stem.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * `Err(TuringMachineError::ConfigError)` if a `.json` file is not a valid program.
    pub fn load_program(path: &Path) -> Result<Program, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        let mut program = if has_extension(path, PROGRAM_EXTENSION) {
            Self::load_program_from_string(&content)?
        } else {
            Program::new("", content)
        };

        if program.name.is_empty() {
            program.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
        }

        Ok(program)
    }

    /// Decodes a program from JSON content.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if the content is a valid program description.
    /// * `Err(TuringMachineError::ConfigError)` otherwise.
    pub fn load_program_from_string(content: &str) -> Result<Program, TuringMachineError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Loads every `.json` and `.tm` file in a directory.
    ///
    /// Directories and files with other extensions are skipped. Each loaded file yields
    /// its own `Result` so one bad file does not hide the others.
    pub fn load_programs(directory: &Path) -> Vec<Result<(PathBuf, Program), TuringMachineError>> {
        if !directory.exists() {
            return vec![Err(TuringMachineError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TuringMachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        let mut results: Vec<_> = entries
            .filter_map(|entry| {
                let path = match entry {
                    Ok(entry) => entry.path(),
                    Err(e) => {
                        return Some(Err(TuringMachineError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                if path.is_dir()
                    || !(has_extension(&path, PROGRAM_EXTENSION)
                        || has_extension(&path, TRANSITIONS_EXTENSION))
                {
                    return None;
                }

                Some(Self::load_program(&path).map(|program| (path, program)))
            })
            .collect();

        // `read_dir` order is platform dependent
        results.sort_by(|a, b| match (a, b) {
            (Ok((a, _)), Ok((b, _))) => a.cmp(b),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => std::cmp::Ordering::Equal,
        });

        results
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mode;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(path: &Path, content: &str) {
        let mut file = File::create(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_json_program() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("accept.json");
        write_file(
            &file_path,
            r#"{"name": "Accept", "tape": "01", "transitions": "qin 0 0 r halt-accept", "mode": "Strict"}"#,
        );

        let program = ProgramLoader::load_program(&file_path).unwrap();

        assert_eq!(program.name, "Accept");
        assert_eq!(program.tape, "01");
        assert_eq!(program.transitions, "qin 0 0 r halt-accept");
        assert_eq!(program.mode, Mode::Strict);
    }

    #[test]
    fn test_load_plain_transitions() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("scan.tm");
        write_file(&file_path, "qin 0 0 r qin\nqin _ _ l halt-accept\n");

        let program = ProgramLoader::load_program(&file_path).unwrap();

        assert_eq!(program.name, "scan");
        assert_eq!(program.tape, "");
        assert!(program.transitions.starts_with("qin 0 0 r qin"));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("invalid.json");
        write_file(&file_path, "This is not a valid program");

        let result = ProgramLoader::load_program(&file_path);
        assert!(matches!(result, Err(TuringMachineError::ConfigError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();

        let result = ProgramLoader::load_program(&dir.path().join("missing.tm"));
        assert!(matches!(result, Err(TuringMachineError::FileError(_))));
    }

    #[test]
    fn test_load_programs_from_directory() {
        let dir = tempdir().unwrap();

        write_file(
            &dir.path().join("valid.json"),
            r#"{"tape": "1", "transitions": "qin 1 1 r halt-accept"}"#,
        );
        write_file(&dir.path().join("invalid.json"), "{ nope");
        write_file(&dir.path().join("plain.tm"), "qin _ _ r halt-reject");
        write_file(&dir.path().join("ignored.txt"), "This file should be ignored");

        let results = ProgramLoader::load_programs(dir.path());

        assert_eq!(results.len(), 3);
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 2);
        assert!(results[2].is_err());

        let (path, program) = results[0].as_ref().unwrap();
        assert!(path.ends_with("plain.tm"));
        assert_eq!(program.name, "plain");
    }

    #[test]
    fn test_load_programs_missing_directory() {
        let dir = tempdir().unwrap();
        let results = ProgramLoader::load_programs(&dir.path().join("nope"));

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(TuringMachineError::FileError(_))));
    }
}
