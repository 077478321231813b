//! Application services - orchestrate use cases.
//!
//! Leaves first: the guard owns the dry-run decision, the placer writes
//! through it, the resolver and converter write through the placer, and the
//! provisioner drives all of them for one profile.

pub mod artifact_placer;
pub mod catalog_service;
pub mod filesystem_guard;
pub mod format_converter;
pub mod global_placement;
pub mod provisioner;

pub use artifact_placer::ArtifactPlacer;
pub use catalog_service::{CatalogService, ProfileInfo};
pub use filesystem_guard::FilesystemGuard;
pub use format_converter::{ConversionOutcome, FormatConverter};
pub use global_placement::GlobalPlacementResolver;
pub use provisioner::{ProfileProvisioner, ProvisionLayout, ProvisionState, ProvisionSummary};
