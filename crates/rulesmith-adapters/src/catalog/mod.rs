//! Profile catalog adapters.

mod builtin;
mod file;

use std::path::Path;

use rulesmith_core::{application::ports::ProfileCatalog, error::RulesmithResult};

pub use builtin::{BuiltinCatalog, EmbeddedPayload, PAYLOADS, SHARED_DIR, payload};
pub use file::TomlCatalog;

/// The user catalog at `path` when given, otherwise the built-in one.
pub fn open(path: Option<&Path>) -> RulesmithResult<Box<dyn ProfileCatalog>> {
    match path {
        Some(path) => Ok(Box::new(TomlCatalog::load(path)?)),
        None => Ok(Box::new(BuiltinCatalog::new())),
    }
}
