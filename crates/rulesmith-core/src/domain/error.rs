// ============================================================================
// domain/error.rs - VALIDATION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant describes a malformed catalog entry or an unknown
/// selection. None of them depend on the state of the filesystem, so all
/// of them can be raised before any I/O is attempted.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Invalid arguments (malformed catalog entries)
    // ========================================================================
    #[error("Artifact destination path is empty")]
    EmptyDestination,

    #[error("Artifact payload for '{path}' is empty")]
    EmptyPayload { path: String },

    #[error("Directory list entry #{index} is empty")]
    EmptyDirectoryPath { index: usize },

    #[error("Conversion of '{source_path}' has an empty delimiter")]
    EmptyDelimiter { source_path: String },

    #[error("Conversion source path is empty")]
    EmptySource,

    #[error("Conversion of '{source_path}' declares no destinations")]
    NoDestinations { source_path: String },

    #[error("Global placement for profile '{profile}' has an empty {field}")]
    EmptyGlobalField {
        profile: String,
        field: &'static str,
    },

    #[error("Absolute paths not allowed in a profile: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    // ========================================================================
    // Not Found
    // ========================================================================
    #[error("Unknown profile '{name}'")]
    UnknownProfile {
        name: String,
        available: Vec<String>,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownProfile { name, available } => {
                let mut suggestions = vec![format!("'{name}' is not in the catalog")];
                if available.is_empty() {
                    suggestions.push("The catalog defines no profiles".into());
                } else {
                    suggestions.push("Available profiles:".into());
                    for profile in available {
                        suggestions.push(format!("  • {profile}"));
                    }
                }
                suggestions.push("Try: rulesmith list".into());
                suggestions
            }
            Self::InvalidCatalog(msg) => vec![
                "The catalog file could not be used".into(),
                format!("Details: {msg}"),
            ],
            _ => vec![
                "The catalog contains a malformed entry".into(),
                "Check the profile definition for empty paths or payloads".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownProfile { .. } => ErrorCategory::NotFound,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_profile_lists_available() {
        let err = DomainError::UnknownProfile {
            name: "emacs".into(),
            available: vec!["cursor".into(), "claude".into()],
        };
        let suggestions = err.suggestions();
        assert!(suggestions.iter().any(|s| s.contains("cursor")));
        assert!(suggestions.iter().any(|s| s.contains("claude")));
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn empty_fields_are_validation_errors() {
        assert_eq!(
            DomainError::EmptyDestination.category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            DomainError::EmptyDirectoryPath { index: 0 }.category(),
            ErrorCategory::Validation
        );
    }
}
