//! Model serialization and deserialization using `MessagePack`.
//!
//! An assembled model can be saved and handed to a later process without
//! re-running its modules.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use garm_engine::Model;
use garm_foundation::{Error, ErrorKind, Result};

/// Serializes a model to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(model: &Model) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(model)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes a model from `MessagePack` bytes.
///
/// Names are validated again on the way in.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<Model> {
    rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Saves a model to a file using `MessagePack` format.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(model: &Model, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(model)?;

    let file = File::create(path).map_err(|e| io_error("create", path, &e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .map_err(|e| io_error("write to", path, &e))?;
    writer.flush().map_err(|e| io_error("flush", path, &e))?;

    Ok(())
}

/// Loads a model from a `MessagePack` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Model> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error("open", path, &e))?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", path, &e))?;

    from_bytes(&bytes)
}

fn io_error(action: &str, path: &Path, err: &std::io::Error) -> Error {
    Error::new(ErrorKind::IoError(format!(
        "failed to {action} file '{}': {err}",
        path.display()
    )))
}
