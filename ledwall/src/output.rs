//! Atomic file output
//!
//! Artifacts are written to a temporary file next to the destination, flushed,
//! and renamed over the target. A failed export leaves either the previous
//! file or nothing, never a truncated one.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, WallError};

/// Write `path` through `write`, replacing the target only on success
pub(crate) fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| WallError::io(path, e))?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write(&mut writer)?;
        writer.flush().map_err(|e| WallError::io(path, e))?;
    }
    temp.as_file()
        .sync_all()
        .map_err(|e| WallError::io(path, e))?;
    temp.persist(path)
        .map_err(|e| WallError::io(path, e.error))?;

    Ok(())
}
