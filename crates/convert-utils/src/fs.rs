//! Filesystem helpers for writing conversion outputs.

use std::io;
use std::path::Path;

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Move a file, falling back to copy + remove when `rename` cannot cross
/// filesystems.
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    ensure_parent_dir(to)?;
    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::debug!(
                "rename {} → {} failed ({}), copying instead",
                from.display(),
                to.display(),
                e
            );
            std::fs::copy(from, to)?;
            std::fs::remove_file(from)
        }
    }
}
