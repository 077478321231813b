//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "rulesmith",
    bin_name = "rulesmith",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Provision assistant rule files for a project",
    long_about = "rulesmith materialises the directories, rule files and templates \
                  a coding assistant expects, for one selectable profile, with a \
                  dry-run preview and shared-rule conversion.",
    after_help = "EXAMPLES:\n\
        \x20 rulesmith provision cursor\n\
        \x20 rulesmith provision claude --dry-run\n\
        \x20 rulesmith list --format json\n\
        \x20 rulesmith completions bash > /usr/share/bash-completion/completions/rulesmith",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Provision a profile into a project.
    #[command(
        visible_alias = "p",
        about = "Provision a profile",
        after_help = "EXAMPLES:\n\
            \x20 rulesmith provision cursor\n\
            \x20 rulesmith provision claude --dry-run\n\
            \x20 rulesmith provision team --catalog ./catalog.toml --root ../service"
    )]
    Provision(ProvisionArgs),

    /// List available profiles.
    #[command(
        visible_alias = "ls",
        about = "List available profiles",
        after_help = "EXAMPLES:\n\
            \x20 rulesmith list\n\
            \x20 rulesmith list --format json\n\
            \x20 rulesmith list --catalog ./catalog.toml"
    )]
    List(ListArgs),

    /// Derive plain-text artifacts from a delimited template.
    #[command(
        about = "Convert a template",
        after_help = "EXAMPLES:\n\
            \x20 rulesmith convert .rulesmith/shared/style.rule .clinerules/style.md\n\
            \x20 rulesmith convert notes.src a.md b.md --delimiter +++"
    )]
    Convert(ConvertArgs),

    /// Initialise a rulesmith configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 rulesmith init           # default location\n\
            \x20 rulesmith init --local   # .rulesmith.toml in CWD\n\
            \x20 rulesmith init --force   # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 rulesmith completions bash > ~/.local/share/bash-completion/completions/rulesmith\n\
            \x20 rulesmith completions zsh  > ~/.zfunc/_rulesmith\n\
            \x20 rulesmith completions fish > ~/.config/fish/completions/rulesmith.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the rulesmith configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 rulesmith config get defaults.profile\n\
            \x20 rulesmith config list\n\
            \x20 rulesmith config path"
    )]
    Config(ConfigCommands),
}

// ── provision ─────────────────────────────────────────────────────────────────

/// Arguments for `rulesmith provision`.
#[derive(Debug, Args)]
pub struct ProvisionArgs {
    /// Profile to provision. Falls back to `defaults.profile`, then to an
    /// interactive selection when stdin is a terminal.
    #[arg(value_name = "PROFILE", help = "Profile name")]
    pub profile: Option<String>,

    /// Preview what would be created without writing any files.
    #[arg(
        short = 'n',
        long = "dry-run",
        help = "Show what would be created without creating"
    )]
    pub dry_run: bool,

    /// Project root; relative catalog paths are anchored here.
    #[arg(
        short = 'r',
        long = "root",
        value_name = "DIR",
        help = "Project root (default: current directory)"
    )]
    pub root: Option<PathBuf>,

    /// Base directory for the global artifact.
    #[arg(
        long = "global-root",
        value_name = "DIR",
        help = "Base for global placements (default: home directory)"
    )]
    pub global_root: Option<PathBuf>,

    /// Use a catalog file instead of the built-in profiles.
    #[arg(long = "catalog", value_name = "FILE", help = "Profile catalog file")]
    pub catalog: Option<PathBuf>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `rulesmith list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,

    /// List a catalog file instead of the built-in profiles.
    #[arg(long = "catalog", value_name = "FILE", help = "Profile catalog file")]
    pub catalog: Option<PathBuf>,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── convert ───────────────────────────────────────────────────────────────────

/// Arguments for `rulesmith convert`.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Template to read. A missing file is not an error.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Files to write the extracted block to.
    #[arg(value_name = "DEST", required = true, num_args = 1..)]
    pub destinations: Vec<PathBuf>,

    /// Marker line that opens and closes the block.
    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "LINE",
        default_value = rulesmith_core::domain::DEFAULT_DELIMITER,
        help = "Delimiter line"
    )]
    pub delimiter: String,

    /// Preview without writing.
    #[arg(short = 'n', long = "dry-run", help = "Show what would be written")]
    pub dry_run: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `rulesmith init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.rulesmith.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `rulesmith completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `rulesmith config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.profile`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
