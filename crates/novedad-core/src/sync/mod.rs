//! Upsert-by-natural-key and delete-by-row-id against a remote table.

mod outcome;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::models::{format_timestamp, normalize_timestamp, NaturalKey, Novedad};
use crate::table::RemoteTable;

pub use outcome::{SyncAction, SyncError, SyncOutcome};

/// Insert `novedad`, or update the row that shares its natural key.
///
/// 1. Reads the whole table.
/// 2. Rejects records whose start/end dates do not parse (no write issued).
/// 3. Updates the first row with an equal normalized key, or inserts a new
///    row when none matches.
///
/// A matched row without a row id is reported as a failure and left alone.
/// Every failure is returned as an outcome, never as an error.
pub async fn sync_novedad<T: RemoteTable>(table: &T, novedad: &Novedad) -> SyncOutcome {
    let result = try_sync(table, novedad).await;
    match &result {
        Ok((action, id)) => info!(action = action.as_str(), %id, "Novedad synced"),
        Err(error) => error!(kind = error.kind(), %error, "Failed to sync novedad"),
    }
    result.into()
}

/// Delete the row with `row_id`. No existence check is made first.
pub async fn delete_novedad<T: RemoteTable>(table: &T, row_id: &str) -> SyncOutcome {
    let result = try_delete(table, row_id).await;
    match &result {
        Ok((_, id)) => info!(%id, "Novedad deleted"),
        Err(error) => error!(kind = error.kind(), %error, "Failed to delete novedad"),
    }
    result.into()
}

async fn try_sync<T: RemoteTable>(
    table: &T,
    novedad: &Novedad,
) -> Result<(SyncAction, String), SyncError> {
    let rows = table.get().await?;
    debug!(count = rows.len(), "Fetched remote rows");

    let key = novedad
        .natural_key()
        .ok_or_else(|| SyncError::InvalidDates {
            start: novedad.fecha_inicio.clone(),
            end: novedad.fecha_fin.clone(),
        })?;

    let now = Utc::now();
    let existing = rows
        .iter()
        .find(|row| row.fields.natural_key().as_ref() == Some(&key));

    if let Some(row) = existing {
        let row_id = row.id().ok_or(SyncError::MissingRowId)?;
        debug!(%row_id, "Natural key matched an existing row");
        table.update(row_id, &update_fields(novedad, &key, now)).await?;
        Ok((SyncAction::Update, row_id.to_string()))
    } else {
        debug!(?key, "No row matched the natural key");
        let row_id = table.add(&insert_fields(novedad, &key, now)).await?;
        Ok((SyncAction::Add, row_id))
    }
}

async fn try_delete<T: RemoteTable>(
    table: &T,
    row_id: &str,
) -> Result<(SyncAction, String), SyncError> {
    let row_id = row_id.trim();
    if row_id.is_empty() {
        return Err(SyncError::EmptyRowId);
    }

    table.delete(row_id).await?;
    Ok((SyncAction::Delete, row_id.to_string()))
}

/// Fields sent on insert: key dates normalized, creation time defaulted to
/// `now` when missing or unparseable, `lastModified` stamped.
fn insert_fields(novedad: &Novedad, key: &NaturalKey, now: DateTime<Utc>) -> Novedad {
    let stamp = format_timestamp(now);
    Novedad {
        fecha_creacion: Some(
            novedad
                .fecha_creacion
                .as_deref()
                .and_then(normalize_timestamp)
                .unwrap_or_else(|| stamp.clone()),
        ),
        fecha_inicio: Some(key.fecha_inicio.clone()),
        fecha_fin: Some(key.fecha_fin.clone()),
        last_modified: Some(stamp),
        ..novedad.clone()
    }
}

/// Fields sent on update: same as insert except that an unparseable creation
/// time is left out rather than replacing the stored one.
fn update_fields(novedad: &Novedad, key: &NaturalKey, now: DateTime<Utc>) -> Novedad {
    Novedad {
        fecha_creacion: novedad
            .fecha_creacion
            .as_deref()
            .and_then(normalize_timestamp),
        fecha_inicio: Some(key.fecha_inicio.clone()),
        fecha_fin: Some(key.fecha_fin.clone()),
        last_modified: Some(format_timestamp(now)),
        ..novedad.clone()
    }
}
