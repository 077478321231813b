//! Global Placement Resolver - the one overwrite-protected write.

use tracing::{info, instrument};

use crate::{
    application::services::ArtifactPlacer,
    domain::{GlobalPlacementRequest, Outcome, Status, StatusLine, Subject},
    error::RulesmithResult,
};

/// Places a payload outside the project, but only if nothing is there yet.
///
/// The global location is shared by unrelated projects, so an existing file
/// always wins over the catalog payload, in live and dry-run mode alike.
#[derive(Clone)]
pub struct GlobalPlacementResolver {
    placer: ArtifactPlacer,
}

impl GlobalPlacementResolver {
    pub fn new(placer: ArtifactPlacer) -> Self {
        Self { placer }
    }

    #[instrument(skip_all, fields(profile = %request.profile, path = %request.global_path.display()))]
    pub fn place_global(&self, request: &GlobalPlacementRequest) -> RulesmithResult<Outcome> {
        request.validate()?;

        let guard = self.placer.guard();
        if guard.filesystem().exists(&request.global_path) {
            info!("global file already present, leaving it untouched");
            guard.reporter().report(
                &StatusLine::new(Status::Skipped, Subject::Global, &request.global_path)
                    .with_detail("already exists"),
            );
            return Ok(Outcome::SkippedExisting);
        }

        self.placer
            .write(Subject::Global, &request.global_path, &request.payload)
    }
}
