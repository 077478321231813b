//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into calls on the core services and
//! render the results. No provisioning logic lives here.

pub mod completions;
pub mod config;
pub mod convert;
pub mod init;
pub mod list;
pub mod provision;

use std::path::PathBuf;

use rulesmith_adapters::catalog;
use rulesmith_core::application::CatalogService;

use crate::{config::AppConfig, error::CliResult};

/// Catalog selected by `--catalog`, then `paths.catalog`, then the built-in one.
pub(crate) fn open_catalog(flag: Option<PathBuf>, config: &AppConfig) -> CliResult<CatalogService> {
    let path = flag.or_else(|| config.paths.catalog.clone());
    let catalog = catalog::open(path.as_deref())?;
    Ok(CatalogService::new(catalog))
}
