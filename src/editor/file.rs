//! Document storage: raw bytes in, raw bytes out.

use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Read the document at `path`.
///
/// A missing file is not an error: it yields `None` and the editor starts
/// with an empty document that the first save creates.
pub fn load(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write `bytes` to `path` verbatim, replacing any previous content.
pub fn save(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
