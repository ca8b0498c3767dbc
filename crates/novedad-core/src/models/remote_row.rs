//! Remote row model

use serde::{Deserialize, Serialize};

use super::Novedad;

/// A record as stored in the remote table, with its store-assigned id.
///
/// The id is optional because the store is not guaranteed to return it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRow {
    #[serde(rename = "$rowID", default, skip_serializing_if = "Option::is_none")]
    pub row_id: Option<String>,
    #[serde(flatten)]
    pub fields: Novedad,
}

impl RemoteRow {
    #[must_use]
    pub const fn new(row_id: Option<String>, fields: Novedad) -> Self {
        Self { row_id, fields }
    }

    /// Row id, treating a blank id the same as a missing one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.row_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
