use novedad_core::{delete_novedad, RemoteTable, SyncOutcome};

use crate::commands::common::print_outcome;
use crate::error::CliError;

pub async fn run_delete<T: RemoteTable>(
    table: &T,
    row_id: &str,
    pretty: bool,
) -> Result<SyncOutcome, CliError> {
    let outcome = delete_novedad(table, row_id).await;
    print_outcome(&outcome, pretty)?;
    Ok(outcome)
}
