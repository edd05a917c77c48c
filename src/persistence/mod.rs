use crate::calendar::HolidayTable;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    Csv(csv::Error),
    InvalidData(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Serialization(err) => Some(err),
            PersistenceError::Io(err) => Some(err),
            PersistenceError::Csv(err) => Some(err),
            PersistenceError::InvalidData(_) => None,
        }
    }
}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Reject empty tables and log records the resolver will skip.
pub fn validate_table(table: &HolidayTable) -> PersistenceResult<()> {
    if table.is_empty() {
        return Err(PersistenceError::InvalidData(
            "holiday table contained no records".into(),
        ));
    }
    for (idx, err) in table.invalid_records() {
        tracing::warn!(index = idx, error = %err, "holiday table record will be skipped");
    }
    Ok(())
}

pub mod file;

pub use file::{
    load_config_from_json, load_table_from_csv, load_table_from_json, save_config_to_json,
    save_table_to_csv, save_table_to_json,
};
