//! I/O utility functions

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Sibling path the content is staged in before the rename
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace `path` with `content` without ever exposing a half-written file.
///
/// The bytes are written and synced to a `.tmp` sibling, then renamed over
/// the target. On failure the staging file is removed and `path` is left as
/// it was.
pub fn atomic_write(path: &Path, content: impl AsRef<[u8]>) -> io::Result<()> {
    let staging = staging_path(path);
    let staged = File::create(&staging).and_then(|mut file| {
        file.write_all(content.as_ref())?;
        file.sync_all()
    });
    if let Err(e) = staged.and_then(|()| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }
    Ok(())
}
