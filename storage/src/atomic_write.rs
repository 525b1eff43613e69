//! Atomic file replacement.
//!
//! Temp file + rename in the target's own directory, so the rename never
//! crosses a filesystem boundary. A reader observes either the old complete
//! document or the new one; a crash mid-write leaves the old document
//! intact. On Windows, rename-over-existing fails, so a backup-and-restore
//! fallback covers the overwrite case.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::warn;

pub(crate) fn atomic_write(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    if let Err(err) = tmp.persist(path) {
        if path.exists() {
            // Windows: move the old file aside, then retry the rename.
            let backup = path.with_extension("bak");
            let _ = std::fs::remove_file(&backup);
            std::fs::rename(path, &backup)?;

            if let Err(retry_err) = err.file.persist(path) {
                let _ = std::fs::rename(&backup, path);
                return Err(retry_err.error);
            }
            if let Err(e) = std::fs::remove_file(&backup) {
                warn!(path = %backup.display(), "failed to remove .bak after atomic write: {e}");
            }
        } else {
            return Err(err.error);
        }
    }

    Ok(())
}
