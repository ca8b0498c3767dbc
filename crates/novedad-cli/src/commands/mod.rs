pub mod bulk;
pub mod common;
pub mod delete;
pub mod get;
pub mod record;

use novedad_core::RemoteTable;

use crate::cli::{Mode, RunOptions};
use crate::error::CliError;

/// Run one mode against `table`.
pub async fn execute<T: RemoteTable>(
    mode: Mode,
    table: &T,
    options: &RunOptions,
) -> Result<(), CliError> {
    match mode {
        Mode::Get => {
            get::run_get(table, options.json).await?;
        }
        Mode::Test => {
            record::run_test(table, options.json).await?;
        }
        Mode::Bulk => {
            bulk::run_bulk_command(table, options).await?;
        }
        Mode::Delete(row_id) => {
            delete::run_delete(table, &row_id, options.json).await?;
        }
        Mode::Record(raw) => {
            record::run_record(table, &raw, options.json).await?;
        }
    }
    Ok(())
}
