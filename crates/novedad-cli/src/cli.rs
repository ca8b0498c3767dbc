use std::path::PathBuf;

use clap::Parser;

use crate::error::CliError;

pub const DEFAULT_BULK_FILE: &str = "a_enviar.json";

#[derive(Parser)]
#[command(name = "novedad-sync")]
#[command(about = "Upsert employee novedades into a Glide table")]
#[command(version)]
pub struct Cli {
    /// get | test | bulk | delete <ROW_ID> | '{...}' (one JSON record)
    #[arg(value_name = "MODE")]
    pub args: Vec<String>,

    /// JSON array of records read by `bulk`
    #[arg(long, value_name = "PATH", env = "NOVEDAD_BULK_FILE", default_value = DEFAULT_BULK_FILE)]
    pub bulk_file: PathBuf,

    /// Ledger of delivered records; `bulk` skips what it lists and appends what it sends
    #[arg(long, value_name = "PATH", env = "NOVEDAD_LEDGER")]
    pub ledger: Option<PathBuf>,

    /// Write a plain-text run summary after `bulk`
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// Output rows, outcomes and bulk reports as pretty JSON
    #[arg(long)]
    pub json: bool,
}

/// What one invocation does. Only one mode runs per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Get,
    Test,
    Bulk,
    Delete(String),
    Record(String),
}

impl Mode {
    /// Select the mode from the positional arguments; `None` when there are none.
    pub fn from_args(args: &[String]) -> Result<Option<Self>, CliError> {
        let Some(first) = args.first() else {
            return Ok(None);
        };

        let mode = match first.as_str() {
            "get" => Self::Get,
            "test" => Self::Test,
            "bulk" => Self::Bulk,
            "delete" => {
                let row_id = args
                    .get(1)
                    .map(|id| id.trim())
                    .filter(|id| !id.is_empty())
                    .ok_or(CliError::MissingRowId)?;
                Self::Delete(row_id.to_string())
            }
            raw if raw.trim_start().starts_with('{') => Self::Record(raw.to_string()),
            other => return Err(CliError::UnknownMode(other.to_string())),
        };

        Ok(Some(mode))
    }
}

/// Options shared by every mode
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub bulk_file: PathBuf,
    pub ledger: Option<PathBuf>,
    pub summary: Option<PathBuf>,
    pub json: bool,
}

impl From<&Cli> for RunOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            bulk_file: cli.bulk_file.clone(),
            ledger: cli.ledger.clone(),
            summary: cli.summary.clone(),
            json: cli.json,
        }
    }
}
