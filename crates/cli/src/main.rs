// detgrid - editable integer grid with a live determinant
// Interactive by default; `eval` and `random` work headless over CSV.

mod exit_codes;
mod matrix_io;
mod tui;
mod util;

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use detgrid_config::settings::Settings;
use detgrid_engine::controller::{format_result, Action, GridController};
use detgrid_engine::grid::GridState;
use detgrid_engine::matrix::MAX_SIZE;

use exit_codes::{EXIT_IO, EXIT_PARSE, EXIT_SHAPE, EXIT_SUCCESS, EXIT_TERMINAL, EXIT_USAGE};
use matrix_io::MatrixIoError;

#[derive(Parser)]
#[command(name = "detgrid")]
#[command(about = "Editable integer grid with a live determinant")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive grid (default when no command is given)
    #[command(after_help = "\
Examples:
  detgrid
  detgrid grid --size 4
  detgrid grid --size 5 --seed 42")]
    Grid {
        /// Initial grid size, 1-10 (default: grid.defaultSize from settings)
        #[arg(long, short = 'n')]
        size: Option<usize>,

        /// Seed for randomize, for reproducible grids
        #[arg(long, env = "DETGRID_SEED")]
        seed: Option<u64>,
    },

    /// Compute the determinant of a square matrix read as CSV
    #[command(after_help = "\
Empty or non-numeric fields read as 0, like empty grid cells.
Values must fit a cell: -99 to 99.

Examples:
  printf '1,2\\n3,4\\n' | detgrid eval
  detgrid eval matrix.csv
  detgrid eval matrix.tsv --delimiter $'\\t' --json
  detgrid random --size 6 | detgrid eval")]
    Eval {
        /// Input file (omit to read from stdin)
        input: Option<PathBuf>,

        /// Field delimiter
        #[arg(long, short = 'd', default_value = ",")]
        delimiter: char,

        /// Print a JSON object instead of the result line
        #[arg(long)]
        json: bool,
    },

    /// Print a randomized grid (values -10..10) as CSV
    #[command(after_help = "\
Examples:
  detgrid random --size 4
  detgrid random --size 3 --seed 7 | detgrid eval")]
    Random {
        /// Grid size, 1-10 (default: grid.defaultSize from settings)
        #[arg(long, short = 'n')]
        size: Option<usize>,

        /// Seed for reproducible output
        #[arg(long, env = "DETGRID_SEED")]
        seed: Option<u64>,

        /// Field delimiter
        #[arg(long, short = 'd', default_value = ",")]
        delimiter: char,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("DETGRID_GIT_HASH"), ")",
        "\nengine:  detgrid-engine ", env!("CARGO_PKG_VERSION"),
        "\nbuild:   ", env!("DETGRID_BUILD_PROFILE"),
    )
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => cmd_grid(None, None),
        Some(Commands::Grid { size, seed }) => cmd_grid(size, seed),
        Some(Commands::Eval { input, delimiter, json }) => cmd_eval(input, delimiter, json),
        Some(Commands::Random { size, seed, delimiter }) => cmd_random(size, seed, delimiter),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_PARSE, message: msg.into(), hint: None }
    }

    pub fn shape(msg: impl Into<String>) -> Self {
        Self { code: EXIT_SHAPE, message: msg.into(), hint: None }
    }

    pub fn terminal(msg: impl Into<String>) -> Self {
        Self { code: EXIT_TERMINAL, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<MatrixIoError> for CliError {
    fn from(err: MatrixIoError) -> Self {
        match err {
            MatrixIoError::Parse(_) => CliError::parse(err.to_string()),
            MatrixIoError::Shape(_) => CliError::shape(err.to_string())
                .with_hint(format!("input must be a square matrix of at most {} rows", MAX_SIZE)),
        }
    }
}

/// Resolve a size flag, falling back to settings. Only reads settings when needed.
fn resolve_size(size: Option<usize>) -> Result<usize, CliError> {
    let size = match size {
        Some(n) => n,
        None => Settings::load().effective_size(),
    };
    if !GridState::accepts_size(size) {
        return Err(CliError::args(format!("size {} is out of range", size))
            .with_hint(format!("use a size between 1 and {}", MAX_SIZE)));
    }
    Ok(size)
}

fn delimiter_byte(delimiter: char) -> Result<u8, CliError> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(CliError::args(format!("delimiter {:?} must be a single ASCII character", delimiter)))
    }
}

// ============================================================================
// grid
// ============================================================================

fn cmd_grid(size: Option<usize>, seed: Option<u64>) -> Result<(), CliError> {
    let settings = Settings::load();
    let size = match size {
        Some(n) => resolve_size(Some(n))?,
        None => settings.effective_size(),
    };

    let options = tui::GridOptions {
        size,
        seed,
        cell_width: settings.effective_cell_width(),
        show_help: settings.show_help_on_start,
    };

    tui::run(options).map_err(|e| {
        log::error!("grid UI failed: {}", e);
        CliError::terminal(e).with_hint("detgrid needs an interactive terminal; try `detgrid eval` for piped input")
    })
}

// ============================================================================
// eval
// ============================================================================

#[derive(Serialize)]
struct EvalReport {
    size: usize,
    determinant: i128,
}

fn cmd_eval(input: Option<PathBuf>, delimiter: char, json: bool) -> Result<(), CliError> {
    let delimiter = delimiter_byte(delimiter)?;

    let content = match &input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| CliError::io(format!("failed to read {}: {}", path.display(), e)))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| CliError::io(e.to_string()))?;
            if buf.trim().is_empty() {
                return Err(CliError::parse("no input received on stdin")
                    .with_hint("printf '1,2\\n3,4\\n' | detgrid eval"));
            }
            buf
        }
    };

    let matrix = matrix_io::parse_csv(&content, delimiter)?;
    let det = matrix.determinant();
    log::debug!("{}x{} determinant = {}", matrix.size(), matrix.size(), det);

    let out = if json {
        let report = EvalReport { size: matrix.size(), determinant: det };
        serde_json::to_string_pretty(&report).map_err(|e| CliError::io(e.to_string()))?
    } else {
        format_result(det)
    };
    println!("{}", out);
    Ok(())
}

// ============================================================================
// random
// ============================================================================

fn cmd_random(size: Option<usize>, seed: Option<u64>, delimiter: char) -> Result<(), CliError> {
    let delimiter = delimiter_byte(delimiter)?;
    let size = resolve_size(size)?;

    let mut controller = GridController::new(size, seed)
        .ok_or_else(|| CliError::args(format!("size {} is out of range", size)))?;
    controller.apply(Action::Randomize);

    let text = matrix_io::write_csv(&controller.matrix(), delimiter).map_err(CliError::io)?;
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())
        .map_err(|e| CliError::io(e.to_string()))?;
    Ok(())
}
