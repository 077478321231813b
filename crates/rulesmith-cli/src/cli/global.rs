//! Flags shared by every `rulesmith` subcommand.
//!
//! Flattened into [`super::Cli`] and marked `global`, so `rulesmith -q
//! provision cursor` and `rulesmith provision cursor -q` mean the same thing.

use clap::Args;
use std::path::PathBuf;

/// Logging, output and configuration flags.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Log level for the `rulesmith*` crates on stderr.
    ///
    /// Ignored when `RUST_LOG` is set. Status lines on stdout are not
    /// affected.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More log output on stderr (-v, -vv, -vvv)",
        long_help = "Log level for rulesmith on stderr:
    (none)  - warnings and errors
    -v      - one event per directory, artifact and conversion
    -vv     - state transitions, catalog and config resolution
    -vvv    - everything, including staged writes"
    )]
    pub verbose: u8,

    /// Only failures reach the terminal.
    ///
    /// Headers, summaries and non-failed status lines are dropped; JSON
    /// documents are still printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print failed items only"
    )]
    pub quiet: bool,

    /// Plain glyphs and text, no ANSI styling.
    ///
    /// Also set by a non-empty `NO_COLOR` or `output.no_color = true`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored status lines"
    )]
    pub no_color: bool,

    /// Config file used instead of the platform location; it must exist.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read configuration from FILE"
    )]
    pub config: Option<PathBuf>,

    /// Output style; `auto` defers to `output.format`, then to the terminal.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output style for status lines and summaries"
    )]
    pub output_format: OutputFormat,
}

/// How status lines, summaries and listings are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped.
    #[default]
    Auto,
    /// Colored glyphs and headers.
    Human,
    /// Same lines without color, for logs and pipes.
    Plain,
    /// One JSON document on stdout; logs on stderr as JSON.
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` config value. Unknown values mean `Auto`.
    pub fn from_config(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "human" => Self::Human,
            "plain" => Self::Plain,
            "json" => Self::Json,
            _ => Self::Auto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_format_values_are_case_insensitive() {
        assert_eq!(OutputFormat::from_config("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_config("plain"), OutputFormat::Plain);
        assert_eq!(OutputFormat::from_config("fancy"), OutputFormat::Auto);
    }
}
