//! Implementation of the `rulesmith convert` command.
//!
//! Runs the format converter on its own, outside any profile.

use std::sync::Arc;

use tracing::instrument;

use rulesmith_adapters::LocalFilesystem;
use rulesmith_core::{
    application::{ArtifactPlacer, ConversionOutcome, FilesystemGuard, FormatConverter},
    domain::{ConversionSpec, Mode},
};

use crate::{
    cli::{ConvertArgs, OutputFormat},
    error::CliResult,
    output::{ConsoleReporter, OutputManager},
};

#[instrument(skip_all, fields(source = %args.source.display()))]
pub fn execute(args: ConvertArgs, output: OutputManager) -> CliResult<()> {
    let mode = Mode::new(args.dry_run);
    let spec = ConversionSpec::new(args.source, args.destinations, args.delimiter);

    let guard = FilesystemGuard::new(
        Arc::new(LocalFilesystem::new()),
        Arc::new(ConsoleReporter::new(output.clone())),
        mode,
    );
    let converter = FormatConverter::new(ArtifactPlacer::new(guard));

    let outcome = converter.convert(&spec)?;

    if output.format() == OutputFormat::Json {
        let written: Vec<_> = match &outcome {
            ConversionOutcome::SourceMissing => Vec::new(),
            ConversionOutcome::Applied(done) => done
                .iter()
                .map(|(path, outcome)| serde_json::json!({ "path": path, "outcome": outcome }))
                .collect(),
        };
        output.json(&serde_json::json!({
            "source": spec.source,
            "mode": mode,
            "source_missing": matches!(outcome, ConversionOutcome::SourceMissing),
            "destinations": written,
        }))?;
        return Ok(());
    }

    match outcome {
        ConversionOutcome::SourceMissing => {
            output.info(&format!(
                "{} does not exist; nothing to convert",
                spec.source.display()
            ))?;
        }
        ConversionOutcome::Applied(done) if mode.is_dry_run() => {
            output.info(&format!(
                "Dry run: {} destination(s) would be written",
                done.len()
            ))?;
        }
        ConversionOutcome::Applied(done) => {
            output.success(&format!("Wrote {} destination(s)", done.len()))?;
        }
    }

    Ok(())
}
