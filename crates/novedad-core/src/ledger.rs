//! Local ledger of records already delivered to the table.
//!
//! The ledger is a JSON array of records. Bulk runs skip records whose
//! natural key is already listed and append the ones they deliver.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{NaturalKey, Novedad};

#[derive(Debug)]
pub struct SentLedger {
    path: PathBuf,
    records: Vec<Novedad>,
    keys: HashSet<NaturalKey>,
}

impl SentLedger {
    /// Load the ledger at `path`. A missing file is an empty ledger.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<Vec<Novedad>>(&content).map_err(|source| {
                Error::ParseFile {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(error) if error.kind() == ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(Error::ReadFile { path, source }),
        };

        let keys = records.iter().filter_map(Novedad::natural_key).collect();
        debug!(path = %path.display(), count = records.len(), "Loaded sent ledger");
        Ok(Self {
            path,
            records,
            keys,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a record with the same natural key was already delivered
    pub fn contains(&self, novedad: &Novedad) -> bool {
        novedad
            .natural_key()
            .is_some_and(|key| self.keys.contains(&key))
    }

    /// Remember a delivered record. Returns `false` if it was already listed.
    pub fn record(&mut self, novedad: &Novedad) -> bool {
        if let Some(key) = novedad.natural_key() {
            if !self.keys.insert(key) {
                return false;
            }
        }
        self.records.push(novedad.clone());
        true
    }

    /// Rewrite the ledger file, creating parent directories when needed
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.records)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn entry(employee: &str, start: &str) -> Novedad {
        Novedad {
            id_empleado: Some(employee.to_string()),
            novedad: Some("LICENCIA".to_string()),
            fecha_inicio: Some(start.to_string()),
            fecha_fin: Some("2025-06-30".to_string()),
            ..Novedad::default()
        }
    }

    #[test]
    fn missing_file_is_empty_ledger() {
        let dir = tempdir().unwrap();
        let ledger = SentLedger::load(dir.path().join("sent.json")).unwrap();
        assert!(ledger.is_empty());
        assert!(!ledger.contains(&entry("NAF-0001", "2025-06-01")));
    }

    #[test]
    fn contains_matches_by_normalized_key() {
        let dir = tempdir().unwrap();
        let mut ledger = SentLedger::load(dir.path().join("sent.json")).unwrap();
        assert!(ledger.record(&entry("NAF-0001", "2025-06-01")));

        assert!(ledger.contains(&entry("NAF-0001", "2025-06-01T00:00:00.000Z")));
        assert!(!ledger.contains(&entry("NAF-0002", "2025-06-01")));
        assert!(!ledger.record(&entry("NAF-0001", "2025-06-01")));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn save_then_load_keeps_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("sent.json");

        let mut ledger = SentLedger::load(&path).unwrap();
        ledger.record(&entry("JUM-0010", "2025-06-01"));
        ledger.record(&entry("JUM-0011", "2025-06-02"));
        ledger.save().unwrap();

        let reloaded = SentLedger::load(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains(&entry("JUM-0011", "2025-06-02")));
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sent.json");
        fs::write(&path, "{ not json").unwrap();

        match SentLedger::load(&path).unwrap_err() {
            Error::ParseFile { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
