use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{EditError, Result};

/// Where the snippet goes.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Append,
    Prepend,
    After,
    Before,
    Replace,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Append => "append",
            Mode::Prepend => "prepend",
            Mode::After => "after",
            Mode::Before => "before",
            Mode::Replace => "replace",
        }
    }

    /// After, Before and Replace locate their insertion point with `--pattern`.
    pub fn requires_pattern(&self) -> bool {
        matches!(self, Mode::After | Mode::Before | Mode::Replace)
    }
}

impl FromStr for Mode {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "append" => Ok(Mode::Append),
            "prepend" => Ok(Mode::Prepend),
            "after" => Ok(Mode::After),
            "before" => Ok(Mode::Before),
            "replace" => Ok(Mode::Replace),
            other => Err(EditError::UnsupportedMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comment syntax the marker lines are wrapped in.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkerStyle {
    /// `/* AUTOEDIT: id START */`
    #[default]
    Block,
    /// `// AUTOEDIT: id START`
    Line,
    /// `# AUTOEDIT: id START`
    Hash,
    /// `<!-- AUTOEDIT: id START -->`
    Html,
    /// `AUTOEDIT: id START`
    Plain,
}

/// One invocation's worth of configuration. Built once, consumed once.
#[derive(Clone, Debug)]
pub struct EditRequest {
    pub file_path: PathBuf,
    pub mode: Mode,
    pub snippet: String,
    pub pattern: Option<String>,
    pub marker_id: Option<String>,
    pub marker_style: MarkerStyle,
    pub force: bool,
    pub skip_backup: bool,
    pub dry_run: bool,
}

impl EditRequest {
    /// The snippet is trimmed; an empty result is rejected.
    pub fn new(file_path: impl Into<PathBuf>, mode: Mode, snippet: &str) -> Result<Self> {
        let snippet = snippet.trim();
        if snippet.is_empty() {
            return Err(EditError::EmptySnippet);
        }
        Ok(EditRequest {
            file_path: file_path.into(),
            mode,
            snippet: snippet.to_string(),
            pattern: None,
            marker_id: None,
            marker_style: MarkerStyle::default(),
            force: false,
            skip_backup: false,
            dry_run: false,
        })
    }

    /// An empty pattern counts as no pattern.
    pub fn with_pattern(mut self, pattern: Option<&str>) -> Self {
        self.pattern = pattern.filter(|p| !p.is_empty()).map(|p| p.to_string());
        self
    }

    /// An empty marker id counts as no marker.
    pub fn with_marker(mut self, marker_id: Option<&str>, style: MarkerStyle) -> Result<Self> {
        let marker_id = marker_id.filter(|id| !id.is_empty());
        if let Some(id) = marker_id {
            if id.contains(['\n', '\r']) {
                return Err(EditError::InvalidMarker(id.to_string()));
            }
        }
        self.marker_id = marker_id.map(|id| id.to_string());
        self.marker_style = style;
        Ok(self)
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn skip_backup(mut self, skip_backup: bool) -> Self {
        self.skip_backup = skip_backup;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// How an invocation ended when it did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Applied { backup: Option<PathBuf> },
    /// The start marker was already in the file; nothing was touched.
    AlreadyPresent { marker: String },
    DryRun { content: Vec<u8> },
}

/// One-line machine-readable summary printed with `--json`.
#[derive(Serialize, Debug)]
pub struct Report {
    pub status: &'static str,
    pub file: String,
    pub mode: Mode,
    pub marker: Option<String>,
    pub backup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Report {
    pub fn new(request: &EditRequest, outcome: &EditOutcome) -> Report {
        let (status, backup, content) = match outcome {
            EditOutcome::Applied { backup } => (
                "applied",
                backup.as_ref().map(|p| p.display().to_string()),
                None,
            ),
            EditOutcome::AlreadyPresent { .. } => ("skipped", None, None),
            EditOutcome::DryRun { content } => (
                "dry_run",
                None,
                Some(String::from_utf8_lossy(content).into_owned()),
            ),
        };
        Report {
            status,
            file: request.file_path.display().to_string(),
            mode: request.mode,
            marker: request.marker_id.clone(),
            backup,
            content,
        }
    }
}
