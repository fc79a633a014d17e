use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use crate::error::{EditError, Result};

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Copies `path` to `<path>.bak.<YYYYMMDDHHMMSS>` and returns the copy's path.
///
/// Two runs inside the same second get `.1`, `.2`, ... appended rather than
/// overwriting the earlier backup.
pub fn create_backup(path: &Path) -> Result<PathBuf> {
    let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();

    let mut attempt = 0usize;
    loop {
        let candidate = backup_candidate(path, &stamp, attempt);
        if !candidate.exists() {
            fs::copy(path, &candidate).map_err(|source| EditError::Backup {
                path: candidate.clone(),
                source,
            })?;
            debug!(backup = %candidate.display(), "backup written");
            return Ok(candidate);
        }
        attempt += 1;
    }
}

fn backup_candidate(path: &Path, stamp: &str, index: usize) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak.");
    name.push(stamp);
    if index > 0 {
        name.push(format!(".{}", index));
    }
    PathBuf::from(name)
}
