//! rulesmith Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the rulesmith
//! provisioning engine, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          rulesmith-cli (CLI)            │
//! │   (profile selection, mode, reporting)  │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  ProfileProvisioner → FormatConverter   │
//! │  GlobalPlacementResolver → ArtifactPlacer│
//! │          → FilesystemGuard              │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, StatusReporter, Catalog)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    rulesmith-adapters (Infrastructure)  │
//! │ (LocalFilesystem, BuiltinCatalog, etc)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rulesmith_core::{
//!     application::{ProfileProvisioner, ProvisionLayout},
//!     domain::{Mode, Profile},
//! };
//!
//! # fn demo(
//! #     filesystem: Arc<dyn rulesmith_core::application::Filesystem>,
//! #     reporter: Arc<dyn rulesmith_core::application::StatusReporter>,
//! # ) -> rulesmith_core::error::RulesmithResult<()> {
//! let profile = Profile::new("alpha")
//!     .directory("a/b")
//!     .artifact("a/b/rule.md", "RULE");
//!
//! let provisioner = ProfileProvisioner::new(
//!     filesystem,
//!     reporter,
//!     Mode::DRY_RUN,
//!     ProvisionLayout::new(".", "/home/me"),
//! );
//! let summary = provisioner.provision(&profile)?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ArtifactPlacer, CatalogService, ConversionOutcome, FilesystemGuard, FormatConverter,
        GlobalPlacementResolver, ProfileInfo, ProfileProvisioner, ProvisionLayout,
        ProvisionState, ProvisionSummary,
        ports::{Filesystem, ProfileCatalog, StatusReporter},
    };
    pub use crate::domain::{
        ArtifactSpec, ConversionSpec, ConversionTemplate, DEFAULT_DELIMITER, DirectorySpec,
        GlobalPlacementRequest, Mode, Outcome, Profile, Status, StatusLine, Subject,
    };
    pub use crate::error::{RulesmithError, RulesmithResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
