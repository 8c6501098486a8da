//! JSON snapshot files

use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write the whole collection as one pretty-printed JSON array
///
/// Returns the number of items written.
pub fn save_snapshot(
    path: impl AsRef<Path>,
    items: &[serde_json::Value],
) -> Result<usize, SnapshotError> {
    let path = path.as_ref();
    write_json(path, items)?;

    info!("Saved {} items to {:?}", items.len(), path);

    Ok(items.len())
}

/// Pretty-print any serializable value to `path`, flushing before return
pub fn write_json<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    value: &T,
) -> Result<(), SnapshotError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Read a snapshot written by [`save_snapshot`]
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Vec<serde_json::Value>, SnapshotError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}
