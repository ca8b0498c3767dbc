use std::fs;

use novedad_core::bulk::{load_bulk_file, run_bulk, BulkReport};
use novedad_core::ledger::SentLedger;
use novedad_core::RemoteTable;

use crate::cli::RunOptions;
use crate::commands::common::print_bulk_entry;
use crate::error::CliError;

/// Sync every record of the bulk file, one at a time.
///
/// File and ledger problems are returned before any remote call is made.
/// Per-record failures are printed and counted but do not fail the command.
pub async fn run_bulk_command<T: RemoteTable>(
    table: &T,
    options: &RunOptions,
) -> Result<BulkReport, CliError> {
    let records = load_bulk_file(&options.bulk_file)?;
    let mut ledger = options
        .ledger
        .as_ref()
        .map(|path| SentLedger::load(path.clone()))
        .transpose()?;

    tracing::info!(
        path = %options.bulk_file.display(),
        count = records.len(),
        "Loaded bulk file"
    );

    let mut print_error = None;
    let report = run_bulk(table, &records, ledger.as_mut(), |index, _, entry| {
        if let Err(error) = print_bulk_entry(index, entry) {
            print_error.get_or_insert(error);
        }
    })
    .await;
    if let Some(error) = print_error {
        return Err(error);
    }

    if let Some(ledger) = &ledger {
        ledger.save()?;
        tracing::info!(path = %ledger.path().display(), count = ledger.len(), "Saved sent ledger");
    }

    if let Some(path) = &options.summary {
        fs::write(path, report.render_summary())?;
        tracing::info!(path = %path.display(), "Wrote run summary");
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_summary());
    }

    Ok(report)
}
