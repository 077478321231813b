//! Unified error handling for rulesmith core.
//!
//! Wraps domain and application errors behind one type and classifies them
//! the way the provisioner needs: invalid arguments abort the current step,
//! I/O errors are reported and (outside directory creation) survived.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for rulesmith core operations.
#[derive(Debug, Error, Clone)]
pub enum RulesmithError {
    /// Malformed catalog entry or unknown selection.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Failure talking to the filesystem.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl RulesmithError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in rulesmith".into(),
                "Please report this issue at: https://github.com/cosecruz/rulesmith/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Malformed input; aborts the enclosing orchestration step.
    pub fn is_invalid_argument(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    /// Environment failure; survivable outside directory creation.
    pub fn is_io(&self) -> bool {
        self.category() == ErrorCategory::Io
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Io,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type RulesmithResult<T> = Result<T, RulesmithError>;
