//! Page routing.
//!
//! Six fixed pages, each a view over the working table. A [`Command`] selects
//! its page, runs against the session and yields a fresh [`PageView`].

use crate::charts::{ChartRequest, render_chart};
use crate::encoders::{EncodingMode, encode};
use crate::error::{ExplorerError, Result};
use crate::export::export_to_dir;
use crate::imputers::{FillStrategy, impute, missing_value_summary};
use crate::profiler::DataProfiler;
use crate::relationships::relate;
use crate::session::ExplorerSession;
use crate::types::ColumnKind;
use crate::utils::column_names;
use crate::view::PageView;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, warn};

/// Rows shown after a fill or encode.
const CHANGE_PREVIEW_ROWS: usize = 5;

/// Navigation destinations, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Overview,
    MissingValues,
    Encoding,
    Visualization,
    Relationships,
    SaveReset,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Overview,
        Page::MissingValues,
        Page::Encoding,
        Page::Visualization,
        Page::Relationships,
        Page::SaveReset,
    ];

    /// Sidebar label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::MissingValues => "Missing Values",
            Self::Encoding => "Encoding",
            Self::Visualization => "Visualization",
            Self::Relationships => "Relationships",
            Self::SaveReset => "Save / Reset",
        }
    }

    /// Name accepted by `go`.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::MissingValues => "missing-values",
            Self::Encoding => "encoding",
            Self::Visualization => "visualization",
            Self::Relationships => "relationships",
            Self::SaveReset => "save-reset",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Page {
    type Err = ExplorerError;

    /// Accepts a slug or a label, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Page::ALL
            .into_iter()
            .find(|page| page.slug() == wanted || page.label().to_lowercase() == wanted)
            .ok_or_else(|| ExplorerError::InvalidCommand(format!("unknown page '{s}'")))
    }
}

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Navigate(Page),
    Describe { column: String },
    Fill(FillStrategy),
    Encode { columns: Vec<String>, mode: EncodingMode },
    Chart(ChartRequest),
    Relate { group_column: String },
    /// Export to `dir`, or the configured output directory.
    Export { dir: Option<PathBuf> },
    Reset,
}

impl Command {
    /// Page the command runs on.
    pub fn page(&self) -> Page {
        match self {
            Self::Navigate(page) => *page,
            Self::Describe { .. } => Page::Overview,
            Self::Fill(_) => Page::MissingValues,
            Self::Encode { .. } => Page::Encoding,
            Self::Chart(_) => Page::Visualization,
            Self::Relate { .. } => Page::Relationships,
            Self::Export { .. } | Self::Reset => Page::SaveReset,
        }
    }
}

/// Dispatches commands to the components.
pub struct Router;

impl Router {
    pub fn dispatch(session: &mut ExplorerSession, command: Command) -> Result<PageView> {
        debug!("Dispatching {:?}", command);
        session.set_page(command.page());

        match command {
            Command::Navigate(page) => Self::landing(session, page),
            Command::Describe { column } => {
                let descriptor = DataProfiler::describe_column(
                    session.store().working(),
                    &column,
                    session.config().sample_value_limit,
                )?;
                Ok(PageView::ColumnDetail(descriptor))
            }
            Command::Fill(strategy) => Self::fill(session, strategy),
            Command::Encode { columns, mode } => Self::encode(session, &columns, mode),
            Command::Chart(request) => {
                let chart = render_chart(
                    session.store().working(),
                    &request,
                    session.config().histogram_bins,
                )?;
                Ok(PageView::Chart { request, chart })
            }
            Command::Relate { group_column } => {
                let value_column = session.config().value_column.clone();
                match relate(session.store().working(), &group_column, &value_column) {
                    Ok(relationship) => Ok(PageView::Relationship(relationship)),
                    Err(err) if err.is_warning() => Ok(Self::warning(err)),
                    Err(err) => Err(err),
                }
            }
            Command::Export { dir } => {
                let dir = dir.unwrap_or_else(|| session.config().output_dir.clone());
                let receipt = export_to_dir(
                    session.store().working(),
                    &dir,
                    &session.config().export_file_name,
                )?;
                session.record("export", receipt.path.display().to_string());
                Ok(PageView::Exported(receipt))
            }
            Command::Reset => {
                session.store_mut().reset();
                let (rows, columns) = session.store().shape();
                session.record("reset", format!("{rows} rows x {columns} columns"));
                Ok(PageView::Reset { rows, columns })
            }
        }
    }

    /// The view a page shows before any action is taken on it.
    pub fn landing(session: &ExplorerSession, page: Page) -> Result<PageView> {
        let store = session.store();
        let config = session.config();
        let view = match page {
            Page::Overview => PageView::Overview(DataProfiler::overview(
                store.working(),
                config.preview_rows,
            )?),
            Page::MissingValues => PageView::MissingValues {
                missing: missing_value_summary(store.working()),
            },
            Page::Encoding => PageView::Encoding {
                text_columns: store.columns_of_kind(ColumnKind::Text),
            },
            Page::Visualization => PageView::Visualization {
                numeric_columns: store.columns_of_kind(ColumnKind::Numeric),
            },
            Page::Relationships => {
                if store.working().column(&config.value_column).is_err() {
                    return Ok(Self::warning(ExplorerError::ValueColumnMissing(
                        config.value_column.clone(),
                    )));
                }
                PageView::Relationships {
                    value_column: config.value_column.clone(),
                    group_columns: column_names(store.working()),
                }
            }
            Page::SaveReset => PageView::SaveReset {
                export_path: config.export_path(),
                pristine: store.is_pristine(),
            },
        };
        Ok(view)
    }

    fn fill(session: &mut ExplorerSession, strategy: FillStrategy) -> Result<PageView> {
        let working = session.store().working();
        let missing = missing_value_summary(working);
        if missing.is_empty() || strategy == FillStrategy::None {
            return Ok(PageView::MissingValues { missing });
        }

        let (filled, outcome) = impute(working, &strategy)?;
        let preview = DataProfiler::preview(&filled, CHANGE_PREVIEW_ROWS)?;
        session.store_mut().replace_working(filled);
        let detail = format!(
            "{}: {} cells in {} columns",
            outcome.strategy,
            outcome.total_filled(),
            outcome.filled.len()
        );
        session.record("fill", detail);
        Ok(PageView::Imputed { outcome, preview })
    }

    fn encode(
        session: &mut ExplorerSession,
        columns: &[String],
        mode: EncodingMode,
    ) -> Result<PageView> {
        if columns.is_empty() {
            return Self::landing(session, Page::Encoding);
        }

        let (encoded, outcome) = encode(session.store().working(), columns, mode)?;
        let preview = DataProfiler::preview(&encoded, CHANGE_PREVIEW_ROWS)?;
        session.store_mut().replace_working(encoded);
        session.record("encode", format!("{}: {}", mode.label(), outcome.encoded.join(", ")));
        Ok(PageView::Encoded { outcome, preview })
    }

    fn warning(err: ExplorerError) -> PageView {
        warn!("{}", err);
        PageView::Warning {
            message: err.to_string(),
        }
    }
}
