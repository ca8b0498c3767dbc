use novedad_core::bulk::BulkEntry;
use novedad_core::{RemoteRow, SyncOutcome};

use crate::error::CliError;

const MISSING: &str = "-";

/// An outcome as one JSON line, or indented JSON when `pretty` is set
pub fn render_outcome(outcome: &SyncOutcome, pretty: bool) -> Result<String, CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(outcome)?
    } else {
        serde_json::to_string(outcome)?
    };
    Ok(rendered)
}

pub fn print_outcome(outcome: &SyncOutcome, pretty: bool) -> Result<(), CliError> {
    println!("{}", render_outcome(outcome, pretty)?);
    Ok(())
}

/// Print a bulk entry as `#<n> <json>` (1-based)
pub fn print_bulk_entry(index: usize, entry: &BulkEntry) -> Result<(), CliError> {
    println!("#{} {}", index + 1, serde_json::to_string(entry)?);
    Ok(())
}

/// One row as `<rowID>  <employee>  <label>  <start>..<end>`
pub fn format_row_line(row: &RemoteRow) -> String {
    let fields = &row.fields;
    format!(
        "{}  {}  {}  {}..{}",
        row.id().unwrap_or(MISSING),
        fields.id_empleado.as_deref().unwrap_or(MISSING),
        fields.novedad.as_deref().unwrap_or(MISSING),
        fields.fecha_inicio.as_deref().unwrap_or(MISSING),
        fields.fecha_fin.as_deref().unwrap_or(MISSING),
    )
}
