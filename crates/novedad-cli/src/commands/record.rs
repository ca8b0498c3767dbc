use novedad_core::{sync_novedad, Novedad, RemoteTable, SyncOutcome};

use crate::commands::common::print_outcome;
use crate::error::CliError;

/// Record synced by `test` mode
pub fn sample_novedad() -> Novedad {
    Novedad {
        id_creador: Some("JUM-0001".to_string()),
        novedad: Some("PRUEBA MANUAL".to_string()),
        fecha_creacion: Some("2025-05-06".to_string()),
        id_empleado: Some("JUM-9999".to_string()),
        fecha_inicio: Some("2025-05-06".to_string()),
        fecha_fin: Some("2025-05-08".to_string()),
        comentario: Some("Desde script".to_string()),
        attachment: Some(String::new()),
        validacion: Some(false),
        id_validador: Some(String::new()),
        last_modified: None,
        region_asignada: Some(String::new()),
        eliminar: Some(false),
    }
}

pub async fn run_test<T: RemoteTable>(table: &T, pretty: bool) -> Result<SyncOutcome, CliError> {
    let outcome = sync_novedad(table, &sample_novedad()).await;
    print_outcome(&outcome, pretty)?;
    Ok(outcome)
}

/// Sync one record given as a JSON object
pub async fn run_record<T: RemoteTable>(
    table: &T,
    raw: &str,
    pretty: bool,
) -> Result<SyncOutcome, CliError> {
    let novedad: Novedad = serde_json::from_str(raw).map_err(CliError::InvalidRecord)?;
    let outcome = sync_novedad(table, &novedad).await;
    print_outcome(&outcome, pretty)?;
    Ok(outcome)
}
