//! File-based profile catalog.
//!
//! # `catalog.toml` format
//!
//! ```toml
//! [[profiles]]
//! name        = "team"
//! description = "Team conventions"       # optional
//! directories = [".team", ".team/rules"]
//!
//! [[profiles.artifacts]]
//! path    = ".team/rules/style.md"
//! payload = "Use four spaces."          # inline payload
//!
//! [[profiles.artifacts]]
//! path         = ".team/rules/review.md"
//! payload_file = "payloads/review.md"   # relative to the catalog file
//!
//! [[profiles.conversions]]
//! source       = ".rulesmith/shared/style.rule"
//! destinations = [".team/rules/shared-style.md"]
//! delimiter    = "---"                  # optional
//!
//! [profiles.global]                      # optional
//! path    = ".team/GLOBAL.md"
//! payload = "..."
//! ```
//!
//! Payload files are read once, when the catalog is loaded.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument};

use rulesmith_core::{
    application::ports::ProfileCatalog,
    domain::{ConversionTemplate, DomainError, Profile},
    error::RulesmithResult,
};

// ── Manifest types ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogManifest {
    #[serde(default)]
    profiles: Vec<ProfileEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileEntry {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    directories: Vec<String>,
    #[serde(default)]
    artifacts: Vec<PayloadEntry>,
    #[serde(default)]
    conversions: Vec<ConversionEntry>,
    global: Option<PayloadEntry>,
}

/// An artifact or global entry: a path plus exactly one payload source.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PayloadEntry {
    path: String,
    payload: Option<String>,
    payload_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConversionEntry {
    source: String,
    destinations: Vec<String>,
    delimiter: Option<String>,
}

impl PayloadEntry {
    fn resolve(&self, base: &Path) -> Result<String, DomainError> {
        match (&self.payload, &self.payload_file) {
            (Some(inline), None) => Ok(inline.clone()),
            (None, Some(file)) => {
                let full = base.join(file);
                fs::read_to_string(&full).map_err(|e| {
                    DomainError::InvalidCatalog(format!(
                        "payload file '{}' for '{}': {e}",
                        full.display(),
                        self.path
                    ))
                })
            }
            (Some(_), Some(_)) => Err(DomainError::InvalidCatalog(format!(
                "'{}' sets both payload and payload_file",
                self.path
            ))),
            (None, None) => Err(DomainError::InvalidCatalog(format!(
                "'{}' has neither payload nor payload_file",
                self.path
            ))),
        }
    }
}

impl ProfileEntry {
    fn into_profile(self, base: &Path) -> Result<Profile, DomainError> {
        let mut profile = Profile::new(&self.name).description(self.description);

        for directory in self.directories {
            profile = profile.directory(directory);
        }

        for artifact in &self.artifacts {
            let payload = artifact.resolve(base)?;
            profile = profile.artifact(&artifact.path, payload);
        }

        for conversion in self.conversions {
            let mut template = ConversionTemplate::new(conversion.source, conversion.destinations);
            if let Some(delimiter) = conversion.delimiter {
                template = template.with_delimiter(delimiter);
            }
            profile = profile.conversion(template);
        }

        if let Some(global) = &self.global {
            let payload = global.resolve(base)?;
            profile = profile.global(&global.path, payload);
        }

        Ok(profile)
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// Profiles loaded from a user catalog file.
#[derive(Debug, Clone)]
pub struct TomlCatalog {
    origin: PathBuf,
    profiles: Vec<Profile>,
}

impl TomlCatalog {
    /// Load and validate a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCatalog`] if the file cannot be read or
    /// parsed, a payload file is missing, two profiles share a name, or a
    /// profile fails validation.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> RulesmithResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            DomainError::InvalidCatalog(format!("failed to read '{}': {e}", path.display()))
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let catalog = Self::from_str_in(&raw, base)?;
        debug!(count = catalog.profiles.len(), "loaded catalog");

        Ok(Self {
            origin: path.to_path_buf(),
            ..catalog
        })
    }

    /// Parse catalog text; `payload_file` entries resolve against `base`.
    pub fn from_str_in(raw: &str, base: &Path) -> RulesmithResult<Self> {
        let manifest: CatalogManifest = toml::from_str(raw)
            .map_err(|e| DomainError::InvalidCatalog(format!("failed to parse catalog: {e}")))?;

        let mut seen = HashSet::new();
        let mut profiles = Vec::with_capacity(manifest.profiles.len());

        for entry in manifest.profiles {
            if !seen.insert(entry.name.clone()) {
                return Err(DomainError::InvalidCatalog(format!(
                    "duplicate profile '{}'",
                    entry.name
                ))
                .into());
            }

            let profile = entry.into_profile(base)?;
            profile.validate().map_err(|e| {
                DomainError::InvalidCatalog(format!("profile '{}': {e}", profile.name))
            })?;
            profiles.push(profile);
        }

        Ok(Self {
            origin: base.to_path_buf(),
            profiles,
        })
    }

    /// The file (or directory, for parsed text) this catalog came from.
    pub fn origin(&self) -> &Path {
        &self.origin
    }
}

impl ProfileCatalog for TomlCatalog {
    fn names(&self) -> Vec<String> {
        self.profiles.iter().map(|p| p.name.clone()).collect()
    }

    fn profile(&self, name: &str) -> RulesmithResult<Profile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .ok_or_else(|| {
                DomainError::UnknownProfile {
                    name: name.to_string(),
                    available: self.names(),
                }
                .into()
            })
    }
}
