//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use rulesmith_core::{
    application::ports::StatusReporter,
    domain::{Status, StatusLine},
};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
#[derive(Debug, Clone)]
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // The flag wins over the config file; `auto` defers to the config.
        let requested = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_config(&config.output.format),
            explicit => explicit,
        };

        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet and JSON modes.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// One provisioning status line.
    ///
    /// Failures are printed even in quiet mode. Nothing is printed in JSON
    /// mode; the lines are part of the final JSON document instead.
    pub fn status(&self, line: &StatusLine) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            return Ok(());
        }
        if self.quiet && line.status != Status::Failed {
            return Ok(());
        }
        self.term.write_line(&render_status(line, !self.no_color))
    }

    /// Pretty JSON document on stdout, regardless of quiet mode.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Human-oriented lines are dropped in quiet mode and in JSON mode.
    fn silent(&self) -> bool {
        self.quiet || self.resolved_format == OutputFormat::Json
    }

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

fn glyph(status: Status) -> &'static str {
    match status {
        Status::Created => "\u{2713}",   // ✓
        Status::Skipped => "\u{2192}",   // →
        Status::Simulated => "\u{25cb}", // ○
        Status::Failed => "\u{2717}",    // ✗
    }
}

/// `<glyph> [status] subject path (detail)`.
pub fn render_status(line: &StatusLine, color: bool) -> String {
    let glyph = glyph(line.status);
    if !color {
        return format!("{glyph} {line}");
    }
    let glyph = match line.status {
        Status::Created => glyph.green().bold().to_string(),
        Status::Skipped => glyph.yellow().bold().to_string(),
        Status::Simulated => glyph.cyan().bold().to_string(),
        Status::Failed => glyph.red().bold().to_string(),
    };
    format!("{glyph} {line}")
}

/// Prints status lines as the core components report them.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    output: OutputManager,
}

impl ConsoleReporter {
    pub fn new(output: OutputManager) -> Self {
        Self { output }
    }
}

impl StatusReporter for ConsoleReporter {
    fn report(&self, line: &StatusLine) {
        if let Err(e) = self.output.status(line) {
            tracing::warn!(error = %e, "failed to print status line");
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use rulesmith_core::domain::Subject;

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: OutputFormat::Human, // avoid TTY detection in tests
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn plain_status_line_has_glyph_and_tag() {
        let line = StatusLine::new(Status::Created, Subject::Directory, "a/b");
        assert_eq!(render_status(&line, false), "\u{2713} [created]   directory  a/b");
    }

    #[test]
    fn each_status_has_a_distinct_glyph() {
        let glyphs = [
            Status::Created,
            Status::Skipped,
            Status::Simulated,
            Status::Failed,
        ]
        .map(glyph);
        for (i, a) in glyphs.iter().enumerate() {
            assert!(glyphs[i + 1..].iter().all(|b| b != a));
        }
    }

    #[test]
    fn detail_is_appended() {
        let line = StatusLine::new(Status::Skipped, Subject::Global, "~/.claude/CLAUDE.md")
            .with_detail("already exists");
        assert!(render_status(&line, false).ends_with("(already exists)"));
    }

    #[test]
    fn quiet_status_is_ok() {
        let out = make_manager(true, true);
        let line = StatusLine::new(Status::Created, Subject::Artifact, "x.md");
        assert!(out.status(&line).is_ok());
    }

    #[test]
    fn no_color_flag_reported() {
        assert!(make_manager(false, false).supports_color());
        assert!(!make_manager(false, true).supports_color());
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Auto,
        };
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        assert_eq!(OutputManager::new(&args, &config).format(), OutputFormat::Json);
    }
}
