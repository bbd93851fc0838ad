//! `diffnest` CLI: structural diff of JSON and YAML files.
//!
//! ## Usage
//!
//! ```sh
//! # Compare two files (format detected from the extension)
//! diffnest old.yaml new.yaml
//!
//! # Compare across formats
//! diffnest deployment.json deployment.yaml
//!
//! # Read the first source from stdin, forcing JSON
//! cat old.json | diffnest --format1 json - new.json
//!
//! # Position-based array comparison, one line of context
//! diffnest --array-strategy index -C 1 a.yaml b.yaml
//!
//! # Emit an RFC 6902 JSON patch
//! diffnest --format json-patch a.json b.json
//! ```
//!
//! Exit status: 0 when the inputs match, 1 when they differ, 2 on error.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use diffnest_core::{
    detect_format, has_differences, match_documents, parse_documents, render_patch,
    render_unified, ArrayStrategy, ContextMode, DiffOptions, Format,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "diffnest",
    version,
    about = "Structural diff for JSON and YAML documents"
)]
struct Cli {
    /// First file (`-` for stdin)
    file1: String,

    /// Second file (`-` for stdin)
    file2: String,

    /// Show all fields including unchanged ones
    #[arg(long, conflicts_with = "context")]
    show_all: bool,

    /// Treat zero values (0, false, "", [], {}, null) as absent
    #[arg(long)]
    ignore_zero_values: bool,

    /// Ignore fields missing on one side
    #[arg(long)]
    ignore_empty: bool,

    /// Ignore case differences in object keys
    #[arg(long)]
    ignore_key_case: bool,

    /// Ignore case differences in string values
    #[arg(long)]
    ignore_value_case: bool,

    /// Array comparison strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::Value)]
    array_strategy: StrategyArg,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputArg::Unified)]
    format: OutputArg,

    /// Format of the first file (detected from the file name if omitted)
    #[arg(long)]
    format1: Option<String>,

    /// Format of the second file (detected from the file name if omitted)
    #[arg(long)]
    format2: Option<String>,

    /// Number of context lines around changes; negative shows none
    #[arg(short = 'C', long, allow_negative_numbers = true)]
    context: Option<i64>,

    /// Verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Index,
    Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputArg {
    Unified,
    JsonPatch,
}

const DEFAULT_CONTEXT_LINES: i64 = 3;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Run the comparison; returns whether any difference was found.
fn run(cli: &Cli) -> Result<bool> {
    if cli.file1 == "-" && cli.file2 == "-" {
        anyhow::bail!("only one input can be read from stdin");
    }

    let format1 = resolve_format(cli.format1.as_deref(), &cli.file1)?;
    let format2 = resolve_format(cli.format2.as_deref(), &cli.file2)?;
    debug!(%format1, %format2, "resolved input formats");

    let text1 = read_input(&cli.file1)?;
    let text2 = read_input(&cli.file2)?;

    let docs1 = parse_documents(&text1, format1)
        .with_context(|| format!("Failed to parse first file: {}", cli.file1))?;
    let docs2 = parse_documents(&text2, format2)
        .with_context(|| format!("Failed to parse second file: {}", cli.file2))?;

    let results = match_documents(&docs1, &docs2, diff_options(cli));

    let output = match cli.format {
        OutputArg::Unified => render_unified(&results, context_mode(cli)),
        OutputArg::JsonPatch => render_patch(&results).context("Failed to render JSON patch")?,
    };
    io::stdout()
        .write_all(output.as_bytes())
        .context("Failed to write output")?;

    Ok(has_differences(&results))
}

fn diff_options(cli: &Cli) -> DiffOptions {
    DiffOptions {
        ignore_empty_fields: cli.ignore_empty,
        ignore_zero_values: cli.ignore_zero_values,
        ignore_key_case: cli.ignore_key_case,
        ignore_value_case: cli.ignore_value_case,
        array_strategy: match cli.array_strategy {
            StrategyArg::Index => ArrayStrategy::Index,
            StrategyArg::Value => ArrayStrategy::Value,
        },
    }
}

/// `--show-all` renders everything; otherwise `-C` picks the window
/// (default 3 lines, negative for changes only).
fn context_mode(cli: &Cli) -> ContextMode {
    if cli.show_all {
        ContextMode::ShowAll
    } else {
        ContextMode::from_lines(cli.context.unwrap_or(DEFAULT_CONTEXT_LINES))
    }
}

/// An explicit `--formatN` wins; otherwise detect from the file name.
fn resolve_format(explicit: Option<&str>, path: &str) -> Result<Format> {
    match explicit {
        Some(name) => name
            .parse()
            .with_context(|| format!("Invalid format for {}", path)),
        None => detect_format(path).with_context(|| format!("Cannot detect format of {}", path)),
    }
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
    }
}
