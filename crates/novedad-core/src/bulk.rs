//! Sequential sync of a batch of records read from a file.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::ledger::SentLedger;
use crate::models::Novedad;
use crate::sync::{sync_novedad, SyncAction, SyncOutcome};
use crate::table::RemoteTable;

/// Read a JSON array of records.
pub fn load_bulk_file(path: &Path) -> Result<Vec<Novedad>> {
    let content = fs::read_to_string(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}

/// What happened to one record of the batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BulkEntry {
    /// Sent to the table (successfully or not)
    Synced(SyncOutcome),
    /// Already listed in the sent ledger
    Skipped,
}

/// Per-record results of a bulk run, in input order
#[derive(Debug, Clone, Serialize)]
pub struct BulkReport {
    pub started_at: DateTime<Utc>,
    pub entries: Vec<BulkEntry>,
}

impl BulkReport {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn added(&self) -> usize {
        self.count_action(SyncAction::Add)
    }

    pub fn updated(&self) -> usize {
        self.count_action(SyncAction::Update)
    }

    pub fn skipped(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, BulkEntry::Skipped))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, BulkEntry::Synced(outcome) if !outcome.is_success()))
            .count()
    }

    /// Plain-text run summary, one `label: value` per line
    pub fn render_summary(&self) -> String {
        format!(
            "Sync date: {}\nTotal records: {}\nAdded: {}\nUpdated: {}\nSkipped: {}\nErrors: {}\n",
            self.started_at.format("%Y-%m-%d"),
            self.total(),
            self.added(),
            self.updated(),
            self.skipped(),
            self.failed(),
        )
    }

    fn count_action(&self, action: SyncAction) -> usize {
        self.entries
            .iter()
            .filter(|entry| {
                matches!(entry, BulkEntry::Synced(outcome) if outcome.action == Some(action))
            })
            .count()
    }
}

/// Sync `records` one at a time, in order.
///
/// A failed record does not stop the run or undo earlier ones. With a ledger,
/// already delivered records are skipped without any remote call and
/// successful ones are recorded (the caller decides when to save it).
/// `on_entry` is called after each record with its index.
pub async fn run_bulk<T: RemoteTable>(
    table: &T,
    records: &[Novedad],
    mut ledger: Option<&mut SentLedger>,
    mut on_entry: impl FnMut(usize, &Novedad, &BulkEntry),
) -> BulkReport {
    let started_at = Utc::now();
    let mut entries = Vec::with_capacity(records.len());
    info!(count = records.len(), "Starting bulk sync");

    for (index, novedad) in records.iter().enumerate() {
        let entry = if ledger.as_ref().is_some_and(|ledger| ledger.contains(novedad)) {
            BulkEntry::Skipped
        } else {
            let outcome = sync_novedad(table, novedad).await;
            if outcome.is_success() {
                if let Some(ledger) = ledger.as_mut() {
                    ledger.record(novedad);
                }
            } else {
                warn!(index, error = outcome.error.as_deref(), "Bulk record failed");
            }
            BulkEntry::Synced(outcome)
        };

        on_entry(index, novedad, &entry);
        entries.push(entry);
    }

    let report = BulkReport {
        started_at,
        entries,
    };
    info!(
        total = report.total(),
        added = report.added(),
        updated = report.updated(),
        skipped = report.skipped(),
        failed = report.failed(),
        "Bulk sync finished"
    );
    report
}
