use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop an edit. None of these leave the target file
/// partially written.
#[derive(Error, Debug)]
pub enum EditError {
    #[error("{0}")]
    Usage(String),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("snippet is empty")]
    EmptySnippet,

    #[error("failed to read snippet file {}: {source}", path.display())]
    SnippetFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid marker id '{0}': must be on a single line")]
    InvalidMarker(String),

    #[error("Unsupported mode: {0}")]
    UnsupportedMode(String),

    #[error("--pattern is required for {0} mode")]
    MissingPattern(&'static str),

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Pattern not found: {0}")]
    PatternNotFound(String),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create backup {}: {source}", path.display())]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl EditError {
    /// `1` for usage and precondition problems, `2` for engine and IO failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            EditError::Usage(_)
            | EditError::FileNotFound(_)
            | EditError::EmptySnippet
            | EditError::SnippetFile { .. }
            | EditError::InvalidMarker(_) => 1,
            EditError::UnsupportedMode(_)
            | EditError::MissingPattern(_)
            | EditError::InvalidPattern { .. }
            | EditError::PatternNotFound(_)
            | EditError::Read { .. }
            | EditError::Backup { .. }
            | EditError::Write { .. } => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, EditError>;
