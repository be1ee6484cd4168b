//! CSV-backed record store.
//!
//! Each record set lives in one flat file under the configured data
//! directory. Writes are append-mostly; updates rewrite the whole file.
//! A mutex per record set serializes the read-modify-rewrite cycle.

mod applications;
mod journal;

pub use applications::CsvApplicationStore;
pub use journal::CsvAuditJournal;

use std::fs::OpenOptions;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::workflows::loans::RepositoryError;

fn unavailable(err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Unavailable(err.to_string())
}

/// Append one row, writing the header row first when the file is empty.
pub(crate) fn append_row<T: Serialize>(path: &Path, row: &T) -> Result<(), RepositoryError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(unavailable)?;
    let needs_headers = file.metadata().map_err(unavailable)?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);
    writer.serialize(row).map_err(unavailable)?;
    writer.flush().map_err(unavailable)?;
    Ok(())
}

/// Read every row; a missing file is an empty record set.
pub(crate) fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, RepositoryError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(unavailable)?;

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(unavailable)
}

/// Replace the whole file with the given rows.
pub(crate) fn rewrite_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), RepositoryError> {
    let mut writer = csv::Writer::from_path(path).map_err(unavailable)?;
    for row in rows {
        writer.serialize(row).map_err(unavailable)?;
    }
    writer.flush().map_err(unavailable)?;
    Ok(())
}
