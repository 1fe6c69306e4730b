//! Session state shared by every page.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     ExplorerSession                     │
//! ├────────────────────────────┬────────────────────────────┤
//! │  config: ExplorerConfig    │  store: DatasetStore       │
//! │  (read-only after startup) │  - working (mutable)       │
//! │                            │  - original (snapshot)     │
//! ├────────────────────────────┼────────────────────────────┤
//! │  current_page: Page        │  history: Vec<HistoryEntry>│
//! │                            │  (newest first, max 50)    │
//! └────────────────────────────┴────────────────────────────┘
//! ```
//!
//! Only the store survives navigation as data; pages are recomputed from the
//! working table on every command.

use crate::config::ExplorerConfig;
use crate::error::Result;
use crate::router::Page;
use crate::store::DatasetStore;
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Maximum number of history entries to keep.
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// A mutating action applied to the working table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// RFC 3339 local time.
    pub timestamp: String,
    pub action: String,
    pub detail: String,
}

#[derive(Debug, Clone)]
pub struct ExplorerSession {
    config: ExplorerConfig,
    store: DatasetStore,
    current_page: Page,
    history: Vec<HistoryEntry>,
}

static_assertions::assert_impl_all!(ExplorerSession: Send);

impl ExplorerSession {
    pub fn new(config: ExplorerConfig, store: DatasetStore) -> Self {
        Self {
            config,
            store,
            current_page: Page::default(),
            history: Vec::new(),
        }
    }

    /// Load the configured dataset and open a session on it.
    pub fn load(config: ExplorerConfig) -> Result<Self> {
        let store = DatasetStore::load(&config)?;
        Ok(Self::new(config, store))
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DatasetStore {
        &mut self.store
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn set_page(&mut self, page: Page) {
        self.current_page = page;
    }

    /// History entries, newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Record a mutating action, dropping the oldest entries past the limit.
    pub fn record(&mut self, action: impl Into<String>, detail: impl Into<String>) {
        let entry = HistoryEntry {
            timestamp: Local::now().to_rfc3339(),
            action: action.into(),
            detail: detail.into(),
        };
        self.history.insert(0, entry);
        if self.history.len() > MAX_HISTORY_ENTRIES {
            self.history.truncate(MAX_HISTORY_ENTRIES);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn session() -> ExplorerSession {
        let df = df!["Value" => [1.0, 2.0]].unwrap();
        ExplorerSession::new(ExplorerConfig::default(), DatasetStore::from_frame(df))
    }

    #[test]
    fn test_starts_on_overview() {
        let session = session();
        assert_eq!(session.current_page(), Page::Overview);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_history_newest_first_and_bounded() {
        let mut session = session();
        for i in 0..MAX_HISTORY_ENTRIES + 5 {
            session.record("fill", format!("run {i}"));
        }
        assert_eq!(session.history().len(), MAX_HISTORY_ENTRIES);
        assert_eq!(session.history()[0].detail, format!("run {}", MAX_HISTORY_ENTRIES + 4));
    }

    #[test]
    fn test_history_timestamp_is_rfc3339() {
        let mut session = session();
        session.record("reset", "");
        let stamp = &session.history()[0].timestamp;
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
    }
}
