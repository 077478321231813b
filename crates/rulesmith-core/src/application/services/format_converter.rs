//! Format Converter - derive plain variants of shared templates.

use std::path::PathBuf;

use tracing::{debug, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        error::DestinationFailure,
        services::ArtifactPlacer,
    },
    domain::{ConversionSpec, Outcome, Status, StatusLine, Subject, extract_delimited},
    error::RulesmithResult,
};

/// What a successful conversion did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The source did not exist; nothing was written.
    SourceMissing,
    /// Every destination was written (or simulated).
    Applied(Vec<(PathBuf, Outcome)>),
}

/// Extracts the delimited block of a source and writes it to each destination.
#[derive(Clone)]
pub struct FormatConverter {
    placer: ArtifactPlacer,
}

impl FormatConverter {
    pub fn new(placer: ArtifactPlacer) -> Self {
        Self { placer }
    }

    /// Convert `spec.source` into every destination.
    ///
    /// A missing source is a successful no-op. Destinations are attempted
    /// independently; if any of them fails the call returns
    /// `ApplicationError::ConversionFailed` listing both the failures and
    /// the destinations that did succeed.
    #[instrument(skip_all, fields(source = %spec.source.display(), destinations = spec.destinations.len()))]
    pub fn convert(&self, spec: &ConversionSpec) -> RulesmithResult<ConversionOutcome> {
        spec.validate()?;

        let guard = self.placer.guard();
        let text = match guard.filesystem().read_file(&spec.source) {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!("conversion source missing, skipping");
                guard.reporter().report(
                    &StatusLine::new(Status::Skipped, Subject::Conversion, &spec.source)
                        .with_detail("source not found"),
                );
                return Ok(ConversionOutcome::SourceMissing);
            }
            Err(e) => {
                warn!(error = %e, "conversion source unreadable");
                guard.reporter().report(
                    &StatusLine::new(Status::Failed, Subject::Conversion, &spec.source)
                        .with_detail(e.to_string()),
                );
                return Err(e);
            }
        };

        let content = extract_delimited(&text, &spec.delimiter);
        if content.is_empty() {
            warn!(
                delimiter = %spec.delimiter,
                "no delimited block found, writing empty artifact"
            );
        }

        let mut completed = Vec::with_capacity(spec.destinations.len());
        let mut failures = Vec::new();

        for destination in &spec.destinations {
            match self.placer.write(Subject::Conversion, destination, &content) {
                Ok(outcome) => completed.push((destination.clone(), outcome)),
                Err(e) => failures.push(DestinationFailure {
                    path: destination.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        if failures.is_empty() {
            Ok(ConversionOutcome::Applied(completed))
        } else {
            Err(ApplicationError::ConversionFailed {
                source_path: spec.source.clone(),
                failures,
                completed,
            }
            .into())
        }
    }
}
