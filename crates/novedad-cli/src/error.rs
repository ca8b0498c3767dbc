use std::io;

use novedad_core::config::ConfigError;
use novedad_core::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] novedad_core::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid novedad JSON: {0}")]
    InvalidRecord(serde_json::Error),
    #[error("Missing row id. Usage: novedad-sync delete <ROW_ID>")]
    MissingRowId,
    #[error(
        "Unknown mode '{0}'. Expected get, test, bulk, delete <ROW_ID> or a JSON object"
    )]
    UnknownMode(String),
}
