//! Infrastructure adapters for rulesmith.
//!
//! This crate implements the ports defined in `rulesmith-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod catalog;
pub mod filesystem;
pub mod reporter;

// Re-export commonly used adapters
pub use catalog::{BuiltinCatalog, TomlCatalog};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use reporter::{RecordingReporter, TracingReporter};
