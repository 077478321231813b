//! Application layer for rulesmith.
//!
//! This layer contains:
//! - **Services**: the provisioning components and catalog queries
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The dry-run decision, overwrite policy, and stage ordering live here.
//! Text extraction and validation live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ArtifactPlacer, CatalogService, ConversionOutcome, FilesystemGuard, FormatConverter,
    GlobalPlacementResolver, ProfileInfo, ProfileProvisioner, ProvisionLayout, ProvisionState,
    ProvisionSummary,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, ProfileCatalog, StatusReporter};

pub use error::{ApplicationError, DestinationFailure};
