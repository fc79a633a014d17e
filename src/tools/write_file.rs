use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{EditError, Result};

/// Replaces the contents of `path` in one step.
///
/// Symlinks are followed, so the link stays a link and its target is edited.
/// The new content goes to a temp file beside the real file which is then
/// renamed over it. When the directory is not writable the file is rewritten
/// in place instead.
pub fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    let to_err = |source| EditError::Write {
        path: path.to_path_buf(),
        source,
    };

    let target = fs::canonicalize(path).map_err(to_err)?;
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let metadata = fs::metadata(&target).map_err(to_err)?;

    let mut tmp = match NamedTempFile::new_in(dir) {
        Ok(tmp) => tmp,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            debug!(dir = %dir.display(), "directory not writable, writing in place");
            return fs::write(&target, content).map_err(to_err);
        }
        Err(e) => return Err(to_err(e)),
    };
    tmp.write_all(content).map_err(to_err)?;
    tmp.as_file().sync_all().map_err(to_err)?;
    fs::set_permissions(tmp.path(), metadata.permissions()).map_err(to_err)?;
    keep_owner(tmp.path(), &metadata);
    tmp.persist(&target).map_err(|e| to_err(e.error))?;

    Ok(())
}

#[cfg(unix)]
fn keep_owner(tmp: &Path, original: &fs::Metadata) {
    use std::os::unix::fs::MetadataExt;

    // Needs privileges unless the owner is already the caller.
    if let Err(e) = std::os::unix::fs::chown(tmp, Some(original.uid()), Some(original.gid())) {
        debug!(error = %e, "could not keep file owner");
    }
}

#[cfg(not(unix))]
fn keep_owner(_tmp: &Path, _original: &fs::Metadata) {}
