//! CLI entry point for the data explorer.

use anyhow::{Context, Result};
use clap::Parser;
use lex_explorer::{ExplorerConfig, ExplorerConfigBuilder, ExplorerSession, ShellOptions, shell};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Interactive explorer for a single tabular dataset",
    long_about = "Loads one CSV file and opens a command shell over it.\n\n\
                  Type `help` in the shell for the list of commands.\n\n\
                  EXAMPLES:\n  \
                  # Explore the default dataset\n  \
                  lex-explorer\n\n  \
                  # Run a script of commands and print JSON views\n  \
                  lex-explorer --data survey.csv --script steps.txt --json"
)]
struct Args {
    /// CSV file to explore (overrides the config file)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory exports are written to
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Numeric column averaged on the relationships page
    #[arg(long)]
    value_column: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Print every view as one JSON document per line
    ///
    /// Disables all logging so stdout only carries JSON.
    #[arg(long)]
    json: bool,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Config file (or defaults) with command-line flags layered on top.
fn build_config(args: &Args) -> Result<ExplorerConfig> {
    let base = match &args.config {
        Some(path) => ExplorerConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ExplorerConfig::default(),
    };

    let mut builder = ExplorerConfigBuilder::from_config(base);
    if let Some(data) = &args.data {
        builder = builder.data_path(data);
    }
    if let Some(output) = &args.output {
        builder = builder.output_dir(output);
    }
    if let Some(column) = &args.value_column {
        builder = builder.value_column(column);
    }
    Ok(builder.build()?)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;
    let mut session = ExplorerSession::load(config).context("Failed to load dataset")?;
    let (rows, columns) = session.store().shape();
    info!("Session ready: {} rows x {} columns", rows, columns);

    let stdout = io::stdout().lock();
    let executed = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            let options = ShellOptions {
                json: args.json,
                prompt: false,
            };
            shell::run(&mut session, BufReader::new(file), stdout, options)?
        }
        None => {
            let stdin = io::stdin();
            let options = ShellOptions {
                json: args.json,
                prompt: !args.json && stdin.is_terminal(),
            };
            shell::run(&mut session, stdin.lock(), stdout, options)?
        }
    };

    info!("Shell closed after {} commands", executed);
    Ok(())
}
