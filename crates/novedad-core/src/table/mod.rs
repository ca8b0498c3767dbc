//! Remote table access
//!
//! The synchronizer only needs four operations from the store. They live on
//! the [`RemoteTable`] trait so the Glide client can be swapped for the
//! in-memory table in tests.

mod columns;
mod glide;
mod memory;

use thiserror::Error;

use crate::models::{Novedad, RemoteRow};

pub use glide::GlideTable;
pub use memory::{CallCounts, MemoryTable};

/// Errors raised by remote table calls
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Glide HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Glide API error: {0}")]
    Api(String),
    #[error("Invalid Glide response: {0}")]
    InvalidPayload(String),
    #[error("Row not found: {0}")]
    RowNotFound(String),
    #[error("Table unavailable: {0}")]
    Unavailable(String),
}

pub type TableResult<T> = Result<T, TableError>;

/// Operations a remote row store must offer
#[allow(async_fn_in_trait)]
pub trait RemoteTable {
    /// Read every row (unfiltered, unpaginated)
    async fn get(&self) -> TableResult<Vec<RemoteRow>>;

    /// Insert a row and return its new id
    async fn add(&self, fields: &Novedad) -> TableResult<String>;

    /// Overwrite the given fields of an existing row
    async fn update(&self, row_id: &str, fields: &Novedad) -> TableResult<()>;

    /// Delete a row
    async fn delete(&self, row_id: &str) -> TableResult<()>;
}
