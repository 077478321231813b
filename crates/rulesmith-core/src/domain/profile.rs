//! Catalog entries: everything a profile wants materialised.
//!
//! Paths here are *templates*: relative to the project root (or, for the
//! global entry, to the global root). The provisioner turns them into
//! concrete specs for one invocation.

use std::path::Path;

use serde::Serialize;

use super::{DomainError, specs::DEFAULT_DELIMITER};

/// A primary artifact owned by the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactTemplate {
    pub path: String,
    #[serde(skip)]
    pub payload: String,
}

impl ArtifactTemplate {
    pub fn new(path: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            payload: payload.into(),
        }
    }
}

/// A shared template the profile mirrors into its own tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionTemplate {
    pub source: String,
    pub destinations: Vec<String>,
    pub delimiter: String,
}

impl ConversionTemplate {
    pub fn new<I, S>(source: impl Into<String>, destinations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source: source.into(),
            destinations: destinations.into_iter().map(Into::into).collect(),
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }
}

/// The single artifact placed outside the project, relative to the global root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalTemplate {
    pub path: String,
    #[serde(skip)]
    pub payload: String,
}

impl GlobalTemplate {
    pub fn new(path: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            payload: payload.into(),
        }
    }
}

/// One selectable target profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: String,
    pub description: String,
    /// Created first, in order.
    pub directories: Vec<String>,
    /// Placed in declared order after the directories exist.
    pub artifacts: Vec<ArtifactTemplate>,
    /// Applied last; sources are optional.
    pub conversions: Vec<ConversionTemplate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<GlobalTemplate>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            directories: Vec::new(),
            artifacts: Vec::new(),
            conversions: Vec::new(),
            global: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn directory(mut self, path: impl Into<String>) -> Self {
        self.directories.push(path.into());
        self
    }

    pub fn artifact(mut self, path: impl Into<String>, payload: impl Into<String>) -> Self {
        self.artifacts.push(ArtifactTemplate::new(path, payload));
        self
    }

    pub fn conversion(mut self, conversion: ConversionTemplate) -> Self {
        self.conversions.push(conversion);
        self
    }

    pub fn global(mut self, path: impl Into<String>, payload: impl Into<String>) -> Self {
        self.global = Some(GlobalTemplate::new(path, payload));
        self
    }

    fn relative_paths(&self) -> impl Iterator<Item = &str> {
        self.directories
            .iter()
            .chain(self.artifacts.iter().map(|a| &a.path))
            .chain(
                self.conversions
                    .iter()
                    .flat_map(|c| std::iter::once(&c.source).chain(&c.destinations)),
            )
            .chain(self.global.iter().map(|g| &g.path))
            .map(String::as_str)
    }

    /// Check every entry. Runs before any I/O for the profile.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidCatalog("profile name is empty".into()));
        }

        if let Some(index) = self.directories.iter().position(String::is_empty) {
            return Err(DomainError::EmptyDirectoryPath { index });
        }

        if let Some(path) = self.relative_paths().find(|p| Path::new(p).is_absolute()) {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.to_string(),
            });
        }

        for artifact in &self.artifacts {
            if artifact.path.is_empty() {
                return Err(DomainError::EmptyDestination);
            }
            if artifact.payload.is_empty() {
                return Err(DomainError::EmptyPayload {
                    path: artifact.path.clone(),
                });
            }
        }

        for conversion in &self.conversions {
            if conversion.source.is_empty() {
                return Err(DomainError::EmptySource);
            }
            if conversion.delimiter.is_empty() {
                return Err(DomainError::EmptyDelimiter {
                    source_path: conversion.source.clone(),
                });
            }
            if conversion.destinations.is_empty() {
                return Err(DomainError::NoDestinations {
                    source_path: conversion.source.clone(),
                });
            }
            if conversion.destinations.iter().any(String::is_empty) {
                return Err(DomainError::EmptyDestination);
            }
        }

        if let Some(global) = &self.global {
            for (field, value) in [("path", &global.path), ("payload", &global.payload)] {
                if value.is_empty() {
                    return Err(DomainError::EmptyGlobalField {
                        profile: self.name.clone(),
                        field,
                    });
                }
            }
        }

        Ok(())
    }
}
