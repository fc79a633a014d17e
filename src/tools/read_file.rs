use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{EditError, Result};

/// Loads the whole target file as a point-in-time snapshot of raw bytes.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    if !path.is_file() {
        return Err(EditError::FileNotFound(path.to_path_buf()));
    }
    fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => EditError::FileNotFound(path.to_path_buf()),
        _ => EditError::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Reads the `--snippet-file` contents, untrimmed.
pub fn read_snippet_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| EditError::SnippetFile {
        path: path.to_path_buf(),
        source,
    })
}
