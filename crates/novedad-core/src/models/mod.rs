//! Data models for novedad-sync

mod novedad;
mod remote_row;
mod timestamp;

pub use novedad::{NaturalKey, Novedad};
pub use remote_row::RemoteRow;
pub use timestamp::{format_timestamp, normalize_timestamp, parse_timestamp};
