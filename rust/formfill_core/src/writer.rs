// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

//! Document serialization.

use std::io::{self, Write};

use lopdf::Document;

use crate::error::FillError;

/// Serialize `document` into `sink` and flush it.
///
/// The sink is flushed whether or not serialization succeeded; the first
/// failure is returned.
pub fn write_document<W: Write>(document: &mut Document, sink: &mut W) -> Result<(), FillError> {
    let written = document
        .save_to(sink)
        .map_err(|err| FillError::WriteError(io::Error::other(err.to_string())));
    let flushed = sink.flush().map_err(FillError::WriteError);
    written.and(flushed)
}

/// Write `bytes` to `path` through a temporary file in the same directory,
/// renaming it into place only once everything is on disk.
///
/// Missing parent directories are created. Unless `overwrite` is set, an
/// existing file at `path` is left alone and the call fails.
#[cfg(not(target_arch = "wasm32"))]
pub fn write_file(
    bytes: &[u8],
    path: &std::path::Path,
    overwrite: bool,
) -> Result<(), FillError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => std::path::Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;

    let persisted = if overwrite {
        file.persist(path)
    } else {
        file.persist_noclobber(path)
    };
    persisted.map_err(|err| FillError::WriteError(err.error))?;
    Ok(())
}
