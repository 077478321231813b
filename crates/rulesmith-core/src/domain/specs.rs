//! Value objects describing a single unit of provisioning work.
//!
//! Specs are built by the provisioner for one invocation and never mutated
//! afterwards. Each one validates itself without touching the filesystem.

use std::path::{Path, PathBuf};

use super::DomainError;

/// Line that opens and closes the metadata block of a shared template.
pub const DEFAULT_DELIMITER: &str = "---";

fn is_empty_path(path: &Path) -> bool {
    path.as_os_str().is_empty()
}

/// One file to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
    pub destination: PathBuf,
    pub payload: String,
}

impl ArtifactSpec {
    pub fn new(destination: impl Into<PathBuf>, payload: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            payload: payload.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if is_empty_path(&self.destination) {
            return Err(DomainError::EmptyDestination);
        }
        if self.payload.is_empty() {
            return Err(DomainError::EmptyPayload {
                path: self.destination.display().to_string(),
            });
        }
        Ok(())
    }
}

/// Directories that must exist before anything else is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySpec {
    pub paths: Vec<PathBuf>,
}

impl DirectorySpec {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        match self.paths.iter().position(|p| is_empty_path(p)) {
            Some(index) => Err(DomainError::EmptyDirectoryPath { index }),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// A payload destined for a location shared across projects.
///
/// Honoured only while nothing exists at `global_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalPlacementRequest {
    pub profile: String,
    pub payload: String,
    pub global_path: PathBuf,
}

impl GlobalPlacementRequest {
    pub fn new(
        profile: impl Into<String>,
        payload: impl Into<String>,
        global_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            profile: profile.into(),
            payload: payload.into(),
            global_path: global_path.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if is_empty_path(&self.global_path) {
            return Err(DomainError::EmptyGlobalField {
                profile: self.profile.clone(),
                field: "path",
            });
        }
        if self.payload.is_empty() {
            return Err(DomainError::EmptyGlobalField {
                profile: self.profile.clone(),
                field: "payload",
            });
        }
        Ok(())
    }

    /// The same payload expressed as a plain artifact.
    pub fn as_artifact(&self) -> ArtifactSpec {
        ArtifactSpec::new(&self.global_path, &self.payload)
    }
}

/// Derive a plain variant of `source` and write it to every destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSpec {
    pub source: PathBuf,
    pub destinations: Vec<PathBuf>,
    pub delimiter: String,
}

impl ConversionSpec {
    pub fn new<I, P>(source: impl Into<PathBuf>, destinations: I, delimiter: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            source: source.into(),
            destinations: destinations.into_iter().map(Into::into).collect(),
            delimiter: delimiter.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if is_empty_path(&self.source) {
            return Err(DomainError::EmptySource);
        }
        let source_path = self.source.display().to_string();
        if self.delimiter.is_empty() {
            return Err(DomainError::EmptyDelimiter { source_path });
        }
        if self.destinations.is_empty() {
            return Err(DomainError::NoDestinations { source_path });
        }
        if self.destinations.iter().any(|d| is_empty_path(d)) {
            return Err(DomainError::EmptyDestination);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_requires_destination_and_payload() {
        assert!(ArtifactSpec::new("a/b.md", "x").validate().is_ok());
        assert_eq!(
            ArtifactSpec::new("", "x").validate(),
            Err(DomainError::EmptyDestination)
        );
        assert!(matches!(
            ArtifactSpec::new("a/b.md", "").validate(),
            Err(DomainError::EmptyPayload { .. })
        ));
    }

    #[test]
    fn directory_spec_reports_first_empty_index() {
        let spec = DirectorySpec::new(["a", "", "b", ""]);
        assert_eq!(
            spec.validate(),
            Err(DomainError::EmptyDirectoryPath { index: 1 })
        );
        assert!(DirectorySpec::new(["a/b", "a/c"]).validate().is_ok());
    }

    #[test]
    fn conversion_spec_validation() {
        assert!(ConversionSpec::new("t.src", ["out.md"], "---").validate().is_ok());
        assert_eq!(
            ConversionSpec::new("", ["out.md"], "---").validate(),
            Err(DomainError::EmptySource)
        );
        assert!(matches!(
            ConversionSpec::new("t.src", ["out.md"], "").validate(),
            Err(DomainError::EmptyDelimiter { .. })
        ));
        assert!(matches!(
            ConversionSpec::new("t.src", Vec::<PathBuf>::new(), "---").validate(),
            Err(DomainError::NoDestinations { .. })
        ));
    }

    #[test]
    fn global_request_converts_to_artifact() {
        let request = GlobalPlacementRequest::new("claude", "body", "/home/u/.claude/CLAUDE.md");
        assert!(request.validate().is_ok());
        let artifact = request.as_artifact();
        assert_eq!(artifact.destination, PathBuf::from("/home/u/.claude/CLAUDE.md"));
        assert_eq!(artifact.payload, "body");
    }

    #[test]
    fn global_request_rejects_empty_payload() {
        let request = GlobalPlacementRequest::new("claude", "", "/tmp/x");
        assert!(matches!(
            request.validate(),
            Err(DomainError::EmptyGlobalField { field: "payload", .. })
        ));
    }
}
