//! Line-oriented command shell.
//!
//! Each input line is split with shell quoting rules (`shlex`) and parsed by
//! clap into a [`ShellAction`]. Errors are printed and the loop continues;
//! only `quit` or end of input stops it.

use crate::charts::ChartRequest;
use crate::encoders::EncodingMode;
use crate::error::{ExplorerError, Result};
use crate::imputers::FillStrategy;
use crate::router::{Command, Page, Router};
use crate::session::ExplorerSession;
use crate::view::PageView;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

/// Shell-side fill strategy names.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFillStrategy {
    /// Leave missing values as they are
    #[value(name = "none")]
    Keep,
    /// Column mean (numeric columns only)
    Mean,
    /// Column median (numeric columns only)
    Median,
    /// Most frequent value
    Mode,
    /// Per-column value given with --value COLUMN=VALUE
    Custom,
}

/// Shell-side encoding names.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliEncoding {
    /// Map each distinct value to an integer
    Label,
    /// One indicator column per distinct value
    OneHot,
}

impl From<CliEncoding> for EncodingMode {
    fn from(cli: CliEncoding) -> Self {
        match cli {
            CliEncoding::Label => EncodingMode::Label,
            CliEncoding::OneHot => EncodingMode::OneHot,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "lex-explorer",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// List the pages
    Pages,
    /// Open a page (overview, missing-values, encoding, visualization, relationships, save-reset)
    Go { page: Page },
    /// Explore one column
    Describe { column: String },
    /// Fill missing values
    Fill {
        #[arg(value_enum)]
        strategy: CliFillStrategy,
        /// Custom value for one column, repeatable
        #[arg(long = "value", value_name = "COLUMN=VALUE", value_parser = parse_assignment)]
        values: Vec<(String, String)>,
    },
    /// Encode categorical columns
    Encode {
        #[arg(value_enum)]
        mode: CliEncoding,
        #[arg(required = true)]
        columns: Vec<String>,
    },
    /// Draw a chart
    Chart {
        #[command(subcommand)]
        chart: ChartCommand,
    },
    /// Mean of the value column per group
    Relate { column: String },
    /// Save the working table as CSV
    Export {
        /// Output directory (defaults to the configured one)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Restore the originally loaded table
    Reset,
    /// Show applied actions
    History,
    /// Show this help
    Help,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
enum ChartCommand {
    Histogram { column: String },
    Boxplot { column: String },
    Heatmap,
    Scatter { x: String, y: String },
}

impl From<ChartCommand> for ChartRequest {
    fn from(cmd: ChartCommand) -> Self {
        match cmd {
            ChartCommand::Histogram { column } => ChartRequest::Histogram { column },
            ChartCommand::Boxplot { column } => ChartRequest::Boxplot { column },
            ChartCommand::Heatmap => ChartRequest::CorrelationHeatmap,
            ChartCommand::Scatter { x, y } => ChartRequest::Scatter { x, y },
        }
    }
}

fn parse_assignment(s: &str) -> std::result::Result<(String, String), String> {
    let (column, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=VALUE, got '{s}'"))?;
    Ok((column.to_string(), value.to_string()))
}

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    Dispatch(Command),
    Pages,
    History,
    Help,
    Quit,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ShellAction>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let words = shlex::split(trimmed)
        .ok_or_else(|| ExplorerError::InvalidCommand("unbalanced quotes".to_string()))?;
    let parsed = ShellLine::try_parse_from(words)
        .map_err(|e| ExplorerError::InvalidCommand(e.to_string().trim_end().to_string()))?;

    let action = match parsed.command {
        ShellCommand::Pages => ShellAction::Pages,
        ShellCommand::Go { page } => ShellAction::Dispatch(Command::Navigate(page)),
        ShellCommand::Describe { column } => ShellAction::Dispatch(Command::Describe { column }),
        ShellCommand::Fill { strategy, values } => {
            let strategy = match strategy {
                CliFillStrategy::Keep => FillStrategy::None,
                CliFillStrategy::Mean => FillStrategy::Mean,
                CliFillStrategy::Median => FillStrategy::Median,
                CliFillStrategy::Mode => FillStrategy::Mode,
                CliFillStrategy::Custom => {
                    FillStrategy::Custom(values.into_iter().collect::<BTreeMap<_, _>>())
                }
            };
            ShellAction::Dispatch(Command::Fill(strategy))
        }
        ShellCommand::Encode { mode, columns } => ShellAction::Dispatch(Command::Encode {
            columns,
            mode: mode.into(),
        }),
        ShellCommand::Chart { chart } => ShellAction::Dispatch(Command::Chart(chart.into())),
        ShellCommand::Relate { column } => ShellAction::Dispatch(Command::Relate {
            group_column: column,
        }),
        ShellCommand::Export { dir } => ShellAction::Dispatch(Command::Export { dir }),
        ShellCommand::Reset => ShellAction::Dispatch(Command::Reset),
        ShellCommand::History => ShellAction::History,
        ShellCommand::Help => ShellAction::Help,
        ShellCommand::Quit => ShellAction::Quit,
    };
    Ok(Some(action))
}

/// Usage text listing every shell command.
pub fn help_text() -> String {
    ShellLine::command().render_help().to_string()
}

/// Output options for [`run`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellOptions {
    /// One JSON document per line instead of text.
    pub json: bool,
    /// Print a prompt before reading each line.
    pub prompt: bool,
}

/// Run the shell until `quit` or end of input.
///
/// Returns the number of commands that produced a view.
pub fn run<R: BufRead, W: Write>(
    session: &mut ExplorerSession,
    reader: R,
    mut writer: W,
    options: ShellOptions,
) -> Result<usize> {
    let mut executed = 0;
    let mut lines = reader.lines();

    loop {
        if options.prompt {
            write!(writer, "[{}] > ", session.current_page().slug())?;
            writer.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let action = match parse_line(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(err) => {
                write_error(&mut writer, &err, options)?;
                continue;
            }
        };
        debug!("Shell action: {:?}", action);

        let outcome = match action {
            ShellAction::Quit => break,
            ShellAction::Pages => Ok(PageView::Pages {
                current: session.current_page(),
                pages: Page::ALL.to_vec(),
            }),
            ShellAction::History => Ok(PageView::History {
                entries: session.history().to_vec(),
            }),
            ShellAction::Help => Ok(PageView::Help { text: help_text() }),
            ShellAction::Dispatch(command) => Router::dispatch(session, command),
        };

        match outcome {
            Ok(view) => {
                write_view(&mut writer, &view, options)?;
                executed += 1;
            }
            Err(err) => write_error(&mut writer, &err, options)?,
        }
    }

    writer.flush()?;
    Ok(executed)
}

fn write_view<W: Write>(writer: &mut W, view: &PageView, options: ShellOptions) -> Result<()> {
    if options.json {
        writeln!(writer, "{}", serde_json::to_string(view)?)?;
    } else {
        write!(writer, "{view}")?;
        writeln!(writer)?;
    }
    Ok(())
}

fn write_error<W: Write>(writer: &mut W, err: &ExplorerError, options: ShellOptions) -> Result<()> {
    if options.json {
        let payload = serde_json::json!({ "error": err });
        writeln!(writer, "{payload}")?;
    } else {
        writeln!(writer, "Error: {err}")?;
        writeln!(writer)?;
    }
    Ok(())
}
