//! Application layer errors.
//!
//! These errors represent failures while talking to the outside world, not
//! malformed input. Malformed input is `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::Outcome;
use crate::error::ErrorCategory;

/// One destination of a conversion that could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Errors that occur during orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// At least one destination of a conversion failed.
    ///
    /// The destinations that succeeded are kept so callers can still report
    /// them individually.
    #[error("Conversion of {source_path} failed for {} destination(s)", .failures.len())]
    ConversionFailed {
        source_path: PathBuf,
        failures: Vec<DestinationFailure>,
        completed: Vec<(PathBuf, Outcome)>,
    },

    /// Shared state lock poisoned (in-memory adapters).
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Make sure no regular file sits where a directory is expected".into(),
            ],
            Self::ConversionFailed { failures, .. } => {
                let mut suggestions = vec!["These destinations were not written:".into()];
                for failure in failures {
                    suggestions.push(format!("  • {}: {}", failure.path.display(), failure.reason));
                }
                suggestions
            }
            Self::LockPoisoned => vec!["This is likely a bug; try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::ConversionFailed { .. } => ErrorCategory::Io,
            Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
