//! In-memory table used as a test double for the Glide table.

use std::sync::{Mutex, PoisonError};

use uuid::Uuid;

use super::{RemoteTable, TableError, TableResult};
use crate::models::{Novedad, RemoteRow};

/// Number of calls a [`MemoryTable`] has served, per operation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub get: usize,
    pub add: usize,
    pub update: usize,
    pub delete: usize,
}

impl CallCounts {
    /// Total calls of any kind
    pub const fn total(&self) -> usize {
        self.get + self.add + self.update + self.delete
    }

    /// Calls that modify the table
    pub const fn writes(&self) -> usize {
        self.add + self.update + self.delete
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: Vec<RemoteRow>,
    calls: CallCounts,
    failure: Option<String>,
}

/// Row store held in process memory.
///
/// Ids are UUID v7 strings. Updates behave like a partial column update.
#[derive(Debug, Default)]
pub struct MemoryTable {
    state: Mutex<MemoryState>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table pre-populated with rows (ids may be missing)
    pub fn with_rows(rows: Vec<RemoteRow>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                rows,
                ..MemoryState::default()
            }),
        }
    }

    /// Snapshot of the stored rows
    pub fn rows(&self) -> Vec<RemoteRow> {
        self.lock().rows.clone()
    }

    pub fn calls(&self) -> CallCounts {
        self.lock().calls
    }

    /// Make every following call fail with `message`
    pub fn fail_with(&self, message: impl Into<String>) {
        self.lock().failure = Some(message.into());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MemoryState {
    fn check_available(&self) -> TableResult<()> {
        self.failure
            .as_ref()
            .map_or(Ok(()), |message| Err(TableError::Unavailable(message.clone())))
    }

    fn find_mut(&mut self, row_id: &str) -> TableResult<&mut RemoteRow> {
        self.rows
            .iter_mut()
            .find(|row| row.id() == Some(row_id))
            .ok_or_else(|| TableError::RowNotFound(row_id.to_string()))
    }
}

impl RemoteTable for MemoryTable {
    async fn get(&self) -> TableResult<Vec<RemoteRow>> {
        let mut state = self.lock();
        state.calls.get += 1;
        state.check_available()?;
        Ok(state.rows.clone())
    }

    async fn add(&self, fields: &Novedad) -> TableResult<String> {
        let mut state = self.lock();
        state.calls.add += 1;
        state.check_available()?;

        let row_id = Uuid::now_v7().to_string();
        state
            .rows
            .push(RemoteRow::new(Some(row_id.clone()), fields.clone()));
        Ok(row_id)
    }

    async fn update(&self, row_id: &str, fields: &Novedad) -> TableResult<()> {
        let mut state = self.lock();
        state.calls.update += 1;
        state.check_available()?;

        state.find_mut(row_id)?.fields.apply(fields);
        Ok(())
    }

    async fn delete(&self, row_id: &str) -> TableResult<()> {
        let mut state = self.lock();
        state.calls.delete += 1;
        state.check_available()?;

        let before = state.rows.len();
        state.rows.retain(|row| row.id() != Some(row_id));
        if state.rows.len() == before {
            return Err(TableError::RowNotFound(row_id.to_string()));
        }
        Ok(())
    }
}
