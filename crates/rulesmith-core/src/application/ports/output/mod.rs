//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `rulesmith-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{Profile, StatusLine};
use crate::error::RulesmithResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `rulesmith_adapters::filesystem::LocalFilesystem` (production)
/// - `rulesmith_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Implementations never look at the dry-run mode; suppression happens in
/// the services before a port method is reached.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all missing ancestors. Succeeds if it exists.
    fn create_dir_all(&self, path: &Path) -> RulesmithResult<()>;

    /// Write content to a file, replacing whatever was there.
    fn write_file(&self, path: &Path, content: &str) -> RulesmithResult<()>;

    /// Read a file as UTF-8. `Ok(None)` when it does not exist.
    fn read_file(&self, path: &Path) -> RulesmithResult<Option<String>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for user-facing status lines.
///
/// Implemented by:
/// - `rulesmith_adapters::reporter::TracingReporter` (log only)
/// - `rulesmith_adapters::reporter::RecordingReporter` (testing)
/// - the CLI console reporter
pub trait StatusReporter: Send + Sync {
    fn report(&self, line: &StatusLine);
}

/// Port for the static profile catalog.
///
/// Implemented by:
/// - `rulesmith_adapters::catalog::BuiltinCatalog` (embedded payloads)
/// - `rulesmith_adapters::catalog::TomlCatalog` (user catalog file)
pub trait ProfileCatalog: Send + Sync {
    /// Profile names in catalog order.
    fn names(&self) -> Vec<String>;

    /// Look up one profile. Unknown names are `DomainError::UnknownProfile`.
    fn profile(&self, name: &str) -> RulesmithResult<Profile>;

    /// All profiles in catalog order.
    fn profiles(&self) -> RulesmithResult<Vec<Profile>> {
        self.names().iter().map(|name| self.profile(name)).collect()
    }
}
