//! Outcomes and the status lines used to report them.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Result of a placement that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The file or directory was written.
    Created,
    /// A protected file already existed and was left untouched.
    SkippedExisting,
    /// Dry-run: the write would have happened.
    Simulated,
}

impl Outcome {
    pub fn status(self) -> Status {
        match self {
            Self::Created => Status::Created,
            Self::SkippedExisting => Status::Skipped,
            Self::Simulated => Status::Simulated,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::SkippedExisting => write!(f, "skipped-existing"),
            Self::Simulated => write!(f, "simulated"),
        }
    }
}

/// Status shown to the user for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Created,
    Skipped,
    Simulated,
    Failed,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Skipped => "skipped",
            Self::Simulated => "simulated",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of item a status line is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Directory,
    Artifact,
    Global,
    Conversion,
}

impl Subject {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::Artifact => "artifact",
            Self::Global => "global",
            Self::Conversion => "conversion",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One human-readable report entry.
///
/// Rendered as `[status] subject path (detail)` with fixed-width columns so
/// every kind of outcome lines up the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub status: Status,
    pub subject: Subject,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl StatusLine {
    pub fn new(status: Status, subject: Subject, path: impl AsRef<Path>) -> Self {
        Self {
            status,
            subject,
            path: path.as_ref().to_path_buf(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = format!("[{}]", self.status);
        write!(
            f,
            "{tag:<11} {:<10} {}",
            self.subject.as_str(),
            self.path.display()
        )?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}
