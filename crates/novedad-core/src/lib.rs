//! novedad-core - Core library for novedad-sync
//!
//! This crate contains the record model, the remote table capability with its
//! Glide and in-memory implementations, and the upsert/delete logic used by
//! the command-line front end.

pub mod bulk;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod sync;
pub mod table;
pub mod util;

pub use error::{Error, Result};
pub use models::{NaturalKey, Novedad, RemoteRow};
pub use sync::{delete_novedad, sync_novedad, SyncAction, SyncError, SyncOutcome};
pub use table::{GlideTable, MemoryTable, RemoteTable, TableError};
