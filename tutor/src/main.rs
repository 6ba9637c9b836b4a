//! Column arithmetic tutor.
//!
//! Interactive boards for column addition and subtraction, short mental
//! arithmetic drills, and a `solve` command that prints the expected digits
//! and carries for a problem.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use tutor::app::App;
use tutor::core::problem::Problem;
use tutor::core::solver::{create_expectations, reassemble};
use tutor::core::training::TrainingMode;
use tutor::core::types::{ColumnExpectation, Operation};
use tutor::exit_codes;
use tutor::generator::RandomSource;
use tutor::io::config::{DEFAULT_CONFIG_PATH, TutorConfig, load_config, write_config};
use tutor::logging;
use tutor::play::{Start, run};

#[derive(Parser)]
#[command(
    name = "tutor",
    version,
    about = "Column addition and subtraction tutor"
)]
struct Cli {
    /// Config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the default config file if missing.
    Init {
        /// Overwrite an existing config file.
        #[arg(short, long)]
        force: bool,
    },
    /// Open the main menu.
    Menu,
    /// Work boards of one operation.
    Play {
        #[arg(value_enum)]
        operation: OperationArg,
    },
    /// Run a mental arithmetic drill.
    Train {
        #[arg(value_enum)]
        mode: ModeArg,
    },
    /// Print the expected digit and carry of every column.
    Solve {
        #[arg(value_enum)]
        operation: SolveArg,
        /// Operands, most significant first for subtraction (minuend subtrahend).
        #[arg(required = true, num_args = 2..)]
        operands: Vec<u64>,
        /// Board width; defaults to the configured column count.
        #[arg(long)]
        columns: Option<usize>,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OperationArg {
    Addition,
    Subtraction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SolveArg {
    Add,
    Sub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Doubles,
    #[value(name = "complements10")]
    Complements10,
    #[value(name = "bridge10")]
    Bridge10,
}

impl From<OperationArg> for Operation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::Addition => Operation::Addition,
            OperationArg::Subtraction => Operation::Subtraction,
        }
    }
}

impl From<SolveArg> for Operation {
    fn from(arg: SolveArg) -> Self {
        match arg {
            SolveArg::Add => Operation::Addition,
            SolveArg::Sub => Operation::Subtraction,
        }
    }
}

impl From<ModeArg> for TrainingMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Doubles => TrainingMode::Doubles,
            ModeArg::Complements10 => TrainingMode::Complements10,
            ModeArg::Bridge10 => TrainingMode::Bridge10,
        }
    }
}

/// `tutor solve --json` payload.
#[derive(Serialize)]
struct SolveReport<'a> {
    problem: &'a Problem,
    expectations: &'a [ColumnExpectation],
    result: u64,
}

fn main() {
    logging::init();
    if let Err(err) = run_cli() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}

fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::Menu => cmd_interactive(&cli.config, Start::Menu),
        Command::Play { operation } => {
            cmd_interactive(&cli.config, Start::Board(operation.into()))
        }
        Command::Train { mode } => cmd_interactive(&cli.config, Start::Training(mode.into())),
        Command::Solve {
            operation,
            operands,
            columns,
            json,
        } => cmd_solve(&cli.config, operation.into(), operands, columns, json),
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        println!("{} already exists", path.display());
        return Ok(());
    }
    write_config(path, &TutorConfig::default())
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "config written");
    println!("wrote {}", path.display());
    Ok(())
}

fn cmd_interactive(path: &Path, start: Start) -> Result<()> {
    let config = load_config(path)?;
    let source = RandomSource::from_thread_rng(config.generator.clone());
    let mut app = App::new(config, source);
    let stdin = io::stdin();
    run(&mut app, start, stdin.lock(), io::stdout().lock())
}

fn cmd_solve(
    path: &Path,
    operation: Operation,
    operands: Vec<u64>,
    columns: Option<usize>,
    json: bool,
) -> Result<()> {
    let columns = match columns {
        Some(columns) => columns,
        None => load_config(path)?.columns,
    };
    let problem = Problem::with_columns(operation, operands, columns)?;
    let expectations = create_expectations(&problem);
    let result = reassemble(&expectations);

    if json {
        let report = SolveReport {
            problem: &problem,
            expectations: &expectations,
            result,
        };
        let payload = serde_json::to_string_pretty(&report).context("serialize solve report")?;
        println!("{payload}");
        return Ok(());
    }

    let expression = problem
        .operands()
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(&format!(" {} ", operation.symbol()));
    println!("{expression} = {result}");
    let mark = match operation {
        Operation::Addition => "carry",
        Operation::Subtraction => "borrow",
    };
    for (column, expected) in expectations.iter().enumerate() {
        println!(
            "column {column}: digit {}, {mark} {}",
            expected.result_digit, expected.next_carry
        );
    }
    Ok(())
}
