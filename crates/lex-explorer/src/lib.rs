//! Single-Table Data Explorer
//!
//! Interactive exploration of one tabular dataset, built on Polars.
//!
//! # Overview
//!
//! The explorer loads a CSV file once and keeps two copies of it: the working
//! table that every action mutates, and the original snapshot it can be reset
//! to. On top of that it offers:
//!
//! - **Profiling**: dataset preview and per-column descriptors
//! - **Imputation**: mean, median, mode or custom fills for missing values
//! - **Encoding**: label and one-hot encoding of text columns
//! - **Charts**: histogram, boxplot, correlation heatmap and scatter data
//! - **Relationships**: mean of the value column per group
//! - **Export**: CSV output of the working table
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_explorer::{Command, ExplorerConfig, ExplorerSession, FillStrategy, Router};
//!
//! let config = ExplorerConfig::builder()
//!     .data_path("Post-COVID_Conditions.csv")
//!     .build()?;
//! let mut session = ExplorerSession::load(config)?;
//!
//! let view = Router::dispatch(&mut session, Command::Fill(FillStrategy::Median))?;
//! println!("{view}");
//!
//! let view = Router::dispatch(&mut session, Command::Export { dir: None })?;
//! println!("{view}");
//! ```
//!
//! # Shell
//!
//! [`shell::run`] drives a session from any line source, so the same commands
//! work interactively, from a script file, or in tests:
//!
//! ```rust,ignore
//! let script = "fill mode\nencode one-hot State\nrelate Group\n";
//! shell::run(&mut session, script.as_bytes(), std::io::stdout(), ShellOptions::default())?;
//! ```

pub mod charts;
pub mod config;
pub mod encoders;
pub mod error;
pub mod export;
pub mod imputers;
pub mod profiler;
pub mod relationships;
pub mod router;
pub mod session;
pub mod shell;
pub mod store;
pub mod types;
pub mod utils;
pub mod view;

// Re-exports for convenient access
pub use charts::{Chart, ChartRequest, render_chart};
pub use config::{ConfigValidationError, ExplorerConfig, ExplorerConfigBuilder};
pub use encoders::{EncodingMode, EncodingOutcome, LabelEncoder, OneHotEncoder, encode};
pub use error::{ExplorerError, Result as ExplorerResult, ResultExt};
pub use export::{ExportReceipt, export_to_dir, to_csv_bytes};
pub use imputers::{
    FillStrategy, ImputationOutcome, StatisticalImputer, impute, missing_value_summary,
};
pub use profiler::DataProfiler;
pub use relationships::{GroupMean, Relationship, relate};
pub use router::{Command, Page, Router};
pub use session::{ExplorerSession, HistoryEntry, MAX_HISTORY_ENTRIES};
pub use shell::{ShellAction, ShellOptions};
pub use store::{DatasetStore, read_csv_file};
pub use types::{
    ColumnDescriptor, ColumnKind, DatasetOverview, MissingCount, SummaryStatistics, TablePreview,
};
pub use view::PageView;
