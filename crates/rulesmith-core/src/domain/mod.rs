// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for rulesmith.
//!
//! Pure value objects and text logic with no I/O. Filesystem access is
//! reached only through the ports defined in the application layer.
//!
//! - **No async**: everything is synchronous
//! - **No I/O**: no filesystem, network, or external calls
//! - **Immutable values**: specs are built once per invocation and never mutated
//!
pub mod error;
pub mod extract;
pub mod mode;
pub mod profile;
pub mod specs;
pub mod status;

pub use error::{DomainError, ErrorCategory};
pub use extract::extract_delimited;
pub use mode::Mode;
pub use profile::{ArtifactTemplate, ConversionTemplate, GlobalTemplate, Profile};
pub use specs::{
    ArtifactSpec, ConversionSpec, DEFAULT_DELIMITER, DirectorySpec, GlobalPlacementRequest,
};
pub use status::{Outcome, Status, StatusLine, Subject};
