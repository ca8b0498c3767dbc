//! Mapping between record field names and Glide column names

use serde_json::{Map, Value};

use super::{TableError, TableResult};
use crate::models::{Novedad, RemoteRow};

const ROW_ID_KEY: &str = "$rowID";

/// `(record field, table column)` pairs.
pub const COLUMNS: &[(&str, &str)] = &[
    ("idCreador", "ID"),
    ("novedad", "Novedad"),
    ("fechaCreaciN", "Fecha de creación"),
    ("idEmpleado", "Legajo creador"),
    ("fechaInicio", "Fecha de inicio"),
    ("fechaFin", "Fecha de fin"),
    ("comentario", "Comentario"),
    ("attachment", "Attachment"),
    ("validaciN", "Validación"),
    ("idValidador", "Validador"),
    ("lastModified", "59m64"),
    ("regiNAsignadaDesdeEjecuciN", "jOlLV"),
    ("eliminar", "6B3Yp"),
];

/// Build the `columnValues` object for a mutation. Absent fields are not sent.
pub fn to_column_values(fields: &Novedad) -> TableResult<Map<String, Value>> {
    let Value::Object(mut by_field) = serde_json::to_value(fields)
        .map_err(|error| TableError::InvalidPayload(error.to_string()))?
    else {
        return Err(TableError::InvalidPayload(
            "record did not serialize to an object".to_string(),
        ));
    };

    let mut columns = Map::new();
    for (field, column) in COLUMNS {
        if let Some(value) = by_field.remove(*field) {
            columns.insert((*column).to_string(), value);
        }
    }
    Ok(columns)
}

/// Convert a row returned by `queryTables` into a [`RemoteRow`].
///
/// Unknown columns are dropped, nulls are treated as absent and numeric
/// values in text columns are kept as their decimal text.
pub fn from_column_values(mut row: Map<String, Value>) -> TableResult<RemoteRow> {
    let row_id = match row.remove(ROW_ID_KEY) {
        Some(Value::String(id)) => Some(id),
        _ => None,
    };

    let mut by_field = Map::new();
    for (field, column) in COLUMNS {
        match row.remove(*column) {
            None | Some(Value::Null) => {}
            Some(Value::Number(number)) if !is_boolean_field(field) => {
                by_field.insert((*field).to_string(), Value::String(number.to_string()));
            }
            Some(value) => {
                by_field.insert((*field).to_string(), value);
            }
        }
    }

    let fields: Novedad = serde_json::from_value(Value::Object(by_field)).map_err(|error| {
        TableError::InvalidPayload(format!(
            "row {} has unexpected column values: {error}",
            row_id.as_deref().unwrap_or("<no id>")
        ))
    })?;

    Ok(RemoteRow::new(row_id, fields))
}

fn is_boolean_field(field: &str) -> bool {
    matches!(field, "validaciN" | "eliminar")
}
