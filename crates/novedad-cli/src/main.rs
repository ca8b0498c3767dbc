//! novedad-sync - push employee novedades into a Glide table
//!
//! One positional argument picks the mode: `get`, `test`, `bulk`,
//! `delete <ROW_ID>`, or a JSON object to sync a single record.

mod cli;
mod commands;
mod error;


use clap::{CommandFactory, Parser};
use novedad_core::config::GlideConfig;
use novedad_core::GlideTable;

use crate::cli::{Cli, Mode, RunOptions};
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("novedad_sync=info".parse().expect("valid directive"))
                .add_directive("novedad_core=info".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();
    let Some(mode) = Mode::from_args(&cli.args)? else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = GlideConfig::from_env()?;
    tracing::debug!(?config, "Loaded Glide configuration");
    let table = GlideTable::new(&config)?;
    tracing::debug!(table = table.table_name(), ?mode, "Running");

    commands::execute(mode, &table, &RunOptions::from(&cli)).await
}
