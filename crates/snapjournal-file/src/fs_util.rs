//! Shared filesystem helpers.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;
use uuid::Uuid;

use snapjournal_core::Result;

/// Write `content` to `path` through a temporary sibling and a rename, so
/// readers see either the old or the new content.
pub(crate) fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));

    let mut file = File::create(&temp_path)?;
    file.write_all(content)?;
    file.sync_data()?;
    drop(file);

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    Ok(())
}

/// Run `f` while holding an exclusive lock on `lock_path`.
pub(crate) fn with_lock<T>(lock_path: &Path, f: impl FnOnce() -> Result<T>) -> Result<T> {
    if let Some(parent) = lock_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let lock_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(lock_path)?;

    lock_file.lock_exclusive()?;
    let result = f();
    lock_file.unlock()?;

    result
}

/// Returns true if `name` is a single plain path segment.
pub(crate) fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', ':'])
        && !name.starts_with('.')
}
