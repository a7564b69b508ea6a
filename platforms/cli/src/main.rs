mod logging;

use clap::Parser;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use utm::{
    Halt, Mode, Program, ProgramLoader, ProgramManager, Step, TuringMachine, TuringMachineError,
    MAX_EXECUTION_STEPS,
};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  utm-cli --builtin binary-increment --tape 111
  utm-cli --rule 'qin 0 0 r q1' --rule 'q1 1 1 r halt-accept' --tape 01 --debug
  cat machine.tm | utm-cli --tape 0101")]
struct Cli {
    /// A program file: a `.json` program description, or plain transition text
    #[clap(short, long, conflicts_with = "builtin")]
    program: Option<PathBuf>,

    /// The name of a built-in program (see --list)
    #[clap(short, long)]
    builtin: Option<String>,

    /// A single transition `<start> <read> <write> <move> <end>`; repeat for more
    #[clap(short, long = "rule")]
    rules: Vec<String>,

    /// The initial tape, replacing the program's own
    #[clap(short, long)]
    tape: Option<String>,

    /// The state to start from, instead of the first rule's start state
    #[clap(short = 's', long)]
    initial_state: Option<String>,

    /// Reject malformed lines and ambiguous transition tables
    #[clap(long)]
    strict: bool,

    /// Give up after this many steps
    #[clap(short, long, default_value_t = MAX_EXECUTION_STEPS)]
    max_steps: usize,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Print steps and results as JSON
    #[clap(long)]
    json: bool,

    /// List the built-in programs and exit
    #[clap(long)]
    list: bool,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    if cli.list {
        for name in ProgramManager::list_program_names() {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    match execute(&cli) {
        Ok(Halt::Accept) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Builds the machine, runs it, and prints the outcome.
fn execute(cli: &Cli) -> Result<Halt, TuringMachineError> {
    let program = load_program(cli)?;
    debug!(name = %program.name, mode = ?program.mode, "program loaded");

    let mut machine = TuringMachine::new(&program)?;

    if cli.debug {
        print_configuration(cli, &machine);
        for _ in 0..cli.max_steps {
            if machine.is_halted() {
                break;
            }
            let step = machine.step();
            print_step(cli, &machine, &step);
        }
    } else {
        machine.run_with_limit(cli.max_steps)?;
    }

    let halt = machine
        .halt()
        .ok_or(TuringMachineError::StepLimitExceeded(cli.max_steps))?;

    if cli.json {
        let result = serde_json::json!({
            "state": machine.state(),
            "tape": machine.tape_view().to_string(),
            "head": machine.head(),
            "steps": machine.step_count(),
        });
        println!("{result}");
    } else {
        if cli.debug {
            println!();
        }
        println!("{}", machine.state());
        println!("{}", machine.tape_view());
    }

    Ok(halt)
}

/// Resolves the program from, in order: a file, a built-in, `--rule` flags, or stdin.
/// Command line overrides are applied on top.
fn load_program(cli: &Cli) -> Result<Program, TuringMachineError> {
    let mut program = if let Some(path) = &cli.program {
        ProgramLoader::load_program(path)?
    } else if let Some(name) = &cli.builtin {
        ProgramManager::get_program_by_name(name)?
    } else if !cli.rules.is_empty() {
        Program::new("", cli.rules.join("\n"))
    } else if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| TuringMachineError::FileError(format!("Failed to read stdin: {}", e)))?;
        Program::new("", buffer)
    } else {
        return Err(TuringMachineError::ConfigError(
            "No program given: use --program, --builtin, --rule, or pipe transitions on stdin"
                .to_string(),
        ));
    };

    if let Some(tape) = &cli.tape {
        program.tape = tape.clone();
    }
    if let Some(state) = &cli.initial_state {
        program = program.with_initial_state(state.as_str());
    }
    if cli.strict {
        program.mode = Mode::Strict;
    }

    Ok(program)
}

fn print_configuration(cli: &Cli, machine: &TuringMachine) {
    if cli.json {
        let configuration = serde_json::json!({
            "state": machine.state(),
            "tape": machine.tape(),
            "head": machine.head(),
        });
        println!("{configuration}");
    } else {
        println!(
            "Step: 0, State: {}, Head: {}, Tape: [{}]",
            machine.state(),
            machine.head(),
            machine.tape_view()
        );
    }
}

fn print_step(cli: &Cli, machine: &TuringMachine, step: &Step) {
    if cli.json {
        match serde_json::to_string(step) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("Failed to encode step: {}", e),
        }
        return;
    }

    match step {
        Step::Applied { transition, .. } => println!(
            "Step: {}, State: {}, Head: {}, Tape: [{}], Rule: {}",
            machine.step_count(),
            machine.state(),
            machine.head(),
            machine.tape_view(),
            transition
        ),
        Step::Aborted { reason } => println!("Aborted: {}", reason),
        _ => {}
    }
}
