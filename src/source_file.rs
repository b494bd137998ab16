use crate::error::AugmentError;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Read the whole target file into memory.
pub fn read_target(path: &Path) -> Result<String, AugmentError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => AugmentError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => AugmentError::ReadError {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Replace `path` with `contents` in one step.
///
/// The data is written to a temp file next to the target and renamed over it,
/// so a failed write leaves the original bytes in place.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), AugmentError> {
    let wrap = |source: io::Error| AugmentError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(wrap)?;
    tmp.write_all(contents.as_bytes()).map_err(wrap)?;
    tmp.as_file().sync_all().map_err(wrap)?;

    // keep the original permissions on the replacement
    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), meta.permissions()).map_err(wrap)?;
    }

    tmp.persist(path).map_err(|e| wrap(e.error))?;
    tracing::trace!(path = %path.display(), bytes = contents.len(), "target persisted");
    Ok(())
}
