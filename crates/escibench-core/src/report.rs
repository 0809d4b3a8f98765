//! Append-only cross-run report store.
//!
//! The store is an ordered JSON array; each entry maps one backend name to
//! its [`AggregateReport`]. A missing or unparseable store loads as an
//! empty sequence so a fresh or damaged file never blocks a run; appends
//! rewrite the whole array pretty-printed.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregate::AggregateReport;
use crate::error::{Error, Result};

/// One store entry: `{backend_name: report}`.
pub type ReportEntry = BTreeMap<String, AggregateReport>;

/// Handle to an on-disk report store.
#[derive(Debug, Clone)]
pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    /// Creates a handle for the store at `path`. The file need not exist.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying store file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all prior entries, oldest first.
    ///
    /// A missing file, unreadable content, or JSON that is not an array of
    /// entries yields an empty sequence; the store is self-healing on the
    /// next append.
    #[must_use]
    pub fn load(&self) -> Vec<ReportEntry> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Appends one `{backend_name: report}` entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Report`] if the store cannot be serialized or the
    /// file cannot be written. Prior entries are preserved.
    pub fn append(&self, backend_name: &str, report: AggregateReport) -> Result<()> {
        let mut entries = self.load();
        entries.push(ReportEntry::from([(backend_name.to_string(), report)]));

        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| Error::Report(format!("failed to serialize report store: {e}")))?;
        fs::write(&self.path, json)
            .map_err(|e| Error::Report(format!("failed to write {}: {e}", self.path.display())))?;

        Ok(())
    }
}
