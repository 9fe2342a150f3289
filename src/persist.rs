//! Disk I/O helpers: read the data file, overwrite it, or replace it
//! atomically.
//!
//! [`overwrite`] truncates and rewrites in place, so a crash mid-write can
//! leave a partial document. [`atomic_write`] goes through a temp file and a
//! rename instead; that's close to atomic on most local filesystems but gives
//! no hard guarantees on FAT32 or network shares.

use crate::error::{Error, Result};
use std::path::Path;

/// Reads the whole file at `path`. A missing file is an error here; the
/// store decides what that means.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| Error::io_at(path, e))
}

/// Truncate `path` and write `bytes` into it, creating parent directories
/// first if needed.
pub fn overwrite(path: &Path, bytes: &[u8]) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, bytes).map_err(|e| Error::io_at(path, e))
}

/// Write `bytes` to `<path>.tmp` and then rename over `path`. This avoids
/// leaving a half-written file if the process crashes mid-write.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    ensure_parent(path)?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let tmp = path.with_extension(format!("{ext}.tmp"));
    std::fs::write(&tmp, bytes).map_err(|e| Error::io_at(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| Error::io_at(path, e))?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            std::fs::create_dir_all(dir).map_err(|e| Error::io_at(dir, e))
        }
        _ => Ok(()),
    }
}
