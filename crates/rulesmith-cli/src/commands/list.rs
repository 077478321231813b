//! Implementation of the `rulesmith list` command.

use crate::{
    cli::{ListArgs, ListFormat, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = super::open_catalog(args.catalog, &config)?;
    let profiles = service.list()?;

    let format = if output.format() == OutputFormat::Json {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Available Profiles:")?;
            let width = profiles.iter().map(|p| p.name.len()).max().unwrap_or(0);
            for profile in &profiles {
                let mut counts = format!(
                    "{} dirs, {} artifacts, {} conversions",
                    profile.directories, profile.artifacts, profile.conversions
                );
                if let Some(global) = &profile.global {
                    counts.push_str(&format!(", global ~/{global}"));
                }
                output.print(&format!(
                    "  {:<width$}  {}  ({counts})",
                    profile.name, profile.description
                ))?;
            }
        }

        ListFormat::List => {
            for profile in &profiles {
                output.print(&profile.name)?;
            }
        }

        // Bypasses quiet mode: JSON must stay parseable in pipes.
        ListFormat::Json => output.json(&profiles)?,
    }

    Ok(())
}
