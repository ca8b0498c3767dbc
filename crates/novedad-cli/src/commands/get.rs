use novedad_core::{RemoteRow, RemoteTable};

use crate::commands::common::format_row_line;
use crate::error::CliError;

pub async fn run_get<T: RemoteTable>(table: &T, as_json: bool) -> Result<Vec<RemoteRow>, CliError> {
    let rows = table.get().await?;
    tracing::info!(count = rows.len(), "Fetched rows");

    if as_json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if rows.is_empty() {
        println!("No rows found.");
    } else {
        for row in &rows {
            println!("{}", format_row_line(row));
        }
    }

    Ok(rows)
}
