//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `RULESMITH_DEFAULTS__PROFILE=cursor`
//! 3. Config file: `--config FILE`, else the platform config dir, else
//!    `.rulesmith.toml` in the current directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// File name used for the local (per-directory) configuration.
pub const LOCAL_CONFIG_FILE: &str = ".rulesmith.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// What to provision when the command line does not say.
    pub defaults: Defaults,
    /// Where things live.
    pub paths: PathsConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Log sinks beyond stderr.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Base of global placements. The home directory when unset.
    pub global_root: Option<PathBuf>,
    /// Catalog file used instead of the built-in profiles.
    pub catalog: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append logs to this file in addition to stderr.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then the environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("failed to seed configuration defaults")?;

        let mut builder = Config::builder().add_source(defaults);

        builder = match config_file {
            Some(path) => builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(true),
            ),
            None => {
                let path = Self::config_path();
                builder.add_source(
                    File::from(path.as_path())
                        .format(FileFormat::Toml)
                        .required(false),
                )
            }
        };

        let config = builder
            .add_source(
                Environment::with_prefix("RULESMITH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("failed to read configuration")?;

        config
            .try_deserialize()
            .context("configuration has an invalid shape")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.rulesmith.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "rulesmith", "rulesmith")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file that `load` reads, given the `--config` flag.
    pub fn active_path(config_file: Option<&PathBuf>) -> PathBuf {
        config_file.cloned().unwrap_or_else(Self::config_path)
    }

    /// Base for global placements: configured value, else the home directory.
    pub fn global_root(&self) -> Option<PathBuf> {
        self.paths.global_root.clone().or_else(dirs::home_dir)
    }

    /// Render as TOML, as written by `rulesmith init`.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("failed to serialise configuration")
    }

    /// Look up a dotted key. `None` when the key is unknown.
    pub fn get(&self, key: &str) -> Option<String> {
        let display = |p: &Option<PathBuf>| {
            p.as_deref()
                .map(Path::display)
                .map(|d| d.to_string())
                .unwrap_or_default()
        };

        match key {
            "defaults.profile" => Some(self.defaults.profile.clone().unwrap_or_default()),
            "paths.global_root" => Some(display(&self.paths.global_root)),
            "paths.catalog" => Some(display(&self.paths.catalog)),
            "output.no_color" => Some(self.output.no_color.to_string()),
            "output.format" => Some(self.output.format.clone()),
            "logging.file" => Some(display(&self.logging.file)),
            _ => None,
        }
    }

    /// Every key `get` understands.
    pub const KEYS: &'static [&'static str] = &[
        "defaults.profile",
        "paths.global_root",
        "paths.catalog",
        "output.no_color",
        "output.format",
        "logging.file",
    ];
}
