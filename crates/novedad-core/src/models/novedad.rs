//! Novedad model

use serde::{Deserialize, Serialize};

use super::timestamp::normalize_timestamp;

/// An employee event/status entry ("novedad").
///
/// Every attribute is optional on the wire; JSON keys keep the camelCase
/// names the table schema was generated with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Novedad {
    /// Identifier of the creator
    #[serde(rename = "idCreador", skip_serializing_if = "Option::is_none")]
    pub id_creador: Option<String>,
    /// Event/category label
    #[serde(rename = "novedad", skip_serializing_if = "Option::is_none")]
    pub novedad: Option<String>,
    /// Creation time (ISO 8601)
    #[serde(rename = "fechaCreaciN", skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<String>,
    /// Employee identifier
    #[serde(rename = "idEmpleado", skip_serializing_if = "Option::is_none")]
    pub id_empleado: Option<String>,
    /// Event start
    #[serde(rename = "fechaInicio", skip_serializing_if = "Option::is_none")]
    pub fecha_inicio: Option<String>,
    /// Event end
    #[serde(rename = "fechaFin", skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<String>,
    #[serde(rename = "comentario", skip_serializing_if = "Option::is_none")]
    pub comentario: Option<String>,
    /// Opaque reference or URL
    #[serde(rename = "attachment", skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
    #[serde(rename = "validaciN", skip_serializing_if = "Option::is_none")]
    pub validacion: Option<bool>,
    #[serde(rename = "idValidador", skip_serializing_if = "Option::is_none")]
    pub id_validador: Option<String>,
    /// Stamped on every write
    #[serde(rename = "lastModified", skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(
        rename = "regiNAsignadaDesdeEjecuciN",
        skip_serializing_if = "Option::is_none"
    )]
    pub region_asignada: Option<String>,
    /// Soft-delete marker, set by the caller
    #[serde(rename = "eliminar", skip_serializing_if = "Option::is_none")]
    pub eliminar: Option<bool>,
}

impl Novedad {
    /// Natural key of this record, or `None` when either key date is
    /// missing or does not parse.
    #[must_use]
    pub fn natural_key(&self) -> Option<NaturalKey> {
        NaturalKey::from_novedad(self)
    }

    /// Overwrite the fields that `changes` carries, leaving the rest intact.
    ///
    /// Mirrors a partial column update on the remote table.
    pub fn apply(&mut self, changes: &Self) {
        fn set<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                target.clone_from(value);
            }
        }

        set(&mut self.id_creador, &changes.id_creador);
        set(&mut self.novedad, &changes.novedad);
        set(&mut self.fecha_creacion, &changes.fecha_creacion);
        set(&mut self.id_empleado, &changes.id_empleado);
        set(&mut self.fecha_inicio, &changes.fecha_inicio);
        set(&mut self.fecha_fin, &changes.fecha_fin);
        set(&mut self.comentario, &changes.comentario);
        set(&mut self.attachment, &changes.attachment);
        set(&mut self.validacion, &changes.validacion);
        set(&mut self.id_validador, &changes.id_validador);
        set(&mut self.last_modified, &changes.last_modified);
        set(&mut self.region_asignada, &changes.region_asignada);
        set(&mut self.eliminar, &changes.eliminar);
    }
}

/// The tuple that identifies "the same logical record" across sync calls.
///
/// Dates are stored normalized, so two keys built from differently formatted
/// but equal timestamps compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NaturalKey {
    pub id_empleado: Option<String>,
    pub novedad: Option<String>,
    pub fecha_inicio: String,
    pub fecha_fin: String,
}

impl NaturalKey {
    #[must_use]
    pub fn from_novedad(novedad: &Novedad) -> Option<Self> {
        let fecha_inicio = novedad.fecha_inicio.as_deref().and_then(normalize_timestamp)?;
        let fecha_fin = novedad.fecha_fin.as_deref().and_then(normalize_timestamp)?;

        Some(Self {
            id_empleado: novedad.id_empleado.clone(),
            novedad: novedad.novedad.clone(),
            fecha_inicio,
            fecha_fin,
        })
    }
}
