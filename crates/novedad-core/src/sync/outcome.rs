//! Result objects reported for each sync or delete call

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::table::TableError;

/// Write performed against the remote table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    Add,
    Update,
    Delete,
}

impl SyncAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Failures that stop a single sync or delete.
///
/// None of them cross the `sync_novedad`/`delete_novedad` boundary; they are
/// folded into a failed [`SyncOutcome`].
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Invalid start/end date: fechaInicio={start:?}, fechaFin={end:?}")]
    InvalidDates {
        start: Option<String>,
        end: Option<String>,
    },
    #[error("Row id must not be empty")]
    EmptyRowId,
    #[error("existing record missing row id")]
    MissingRowId,
    #[error(transparent)]
    Remote(#[from] TableError),
}

impl SyncError {
    /// Short category name used in logs
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidDates { .. } | Self::EmptyRowId => "validation",
            Self::MissingRowId => "integrity",
            Self::Remote(_) => "remote",
        }
    }
}

/// `{success, action, id}` on success, `{success: false, error}` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<SyncAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncOutcome {
    pub fn applied(action: SyncAction, id: impl Into<String>) -> Self {
        Self {
            success: true,
            action: Some(action),
            id: Some(id.into()),
            error: None,
        }
    }

    pub fn failed(error: &SyncError) -> Self {
        Self {
            success: false,
            action: None,
            id: None,
            error: Some(error.to_string()),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.success
    }
}

impl From<Result<(SyncAction, String), SyncError>> for SyncOutcome {
    fn from(result: Result<(SyncAction, String), SyncError>) -> Self {
        match result {
            Ok((action, id)) => Self::applied(action, id),
            Err(error) => Self::failed(&error),
        }
    }
}
