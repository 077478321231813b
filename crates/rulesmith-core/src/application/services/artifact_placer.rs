//! Artifact Placer - unconditional, verbatim file writes.

use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::{
    application::services::FilesystemGuard,
    domain::{ArtifactSpec, DomainError, Outcome, Status, StatusLine, Subject},
    error::RulesmithResult,
};

/// Writes payloads to destinations, replacing anything already there.
///
/// This is the only place that overwrites without asking. Callers that need
/// protection check existence first (see `GlobalPlacementResolver`).
#[derive(Clone)]
pub struct ArtifactPlacer {
    guard: FilesystemGuard,
}

impl ArtifactPlacer {
    pub fn new(guard: FilesystemGuard) -> Self {
        Self { guard }
    }

    pub fn guard(&self) -> &FilesystemGuard {
        &self.guard
    }

    /// Place a primary artifact.
    #[instrument(skip_all, fields(destination = %spec.destination.display()))]
    pub fn place(&self, spec: &ArtifactSpec) -> RulesmithResult<Outcome> {
        spec.validate()?;
        self.write(Subject::Artifact, &spec.destination, &spec.payload)
    }

    /// Write `content` to `destination`, reporting under `subject`.
    ///
    /// Unlike [`Self::place`] the content may be empty; derived artifacts
    /// can legitimately be.
    pub(crate) fn write(
        &self,
        subject: Subject,
        destination: &Path,
        content: &str,
    ) -> RulesmithResult<Outcome> {
        if destination.as_os_str().is_empty() {
            return Err(DomainError::EmptyDestination.into());
        }

        let reporter = self.guard.reporter();

        if self.guard.suppresses_writes() {
            debug!(path = %destination.display(), bytes = content.len(), "would write file");
            reporter.report(&StatusLine::new(Status::Simulated, subject, destination));
            return Ok(Outcome::Simulated);
        }

        let written = self
            .guard
            .ensure_parent(destination)
            .and_then(|()| self.guard.filesystem().write_file(destination, content));

        match written {
            Ok(()) => {
                debug!(path = %destination.display(), bytes = content.len(), "file written");
                reporter.report(&StatusLine::new(Status::Created, subject, destination));
                Ok(Outcome::Created)
            }
            Err(e) => {
                warn!(path = %destination.display(), error = %e, "write failed");
                reporter.report(
                    &StatusLine::new(Status::Failed, subject, destination)
                        .with_detail(e.to_string()),
                );
                Err(e)
            }
        }
    }
}
