//! Profile Provisioner - main application orchestrator.
//!
//! Runs one profile through a fixed sequence of stages:
//! 1. Create every directory (a failure here aborts the run)
//! 2. Place primary artifacts, then the global artifact if the profile has one
//! 3. Apply conversions of optional shared templates
//! 4. Hand a summary back to the caller
//!
//! Stages 2 and 3 report and continue: one failed item never stops its
//! siblings. Malformed catalog entries abort whatever stage they are in.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    application::{
        ports::{Filesystem, StatusReporter},
        services::{ArtifactPlacer, FilesystemGuard, FormatConverter, GlobalPlacementResolver},
    },
    domain::{
        ArtifactSpec, ConversionSpec, DirectorySpec, GlobalPlacementRequest, Mode, Profile,
        Status, StatusLine,
    },
    error::RulesmithResult,
};

/// Where relative catalog paths are anchored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionLayout {
    /// Project root; every project-local path is joined onto it.
    pub root: PathBuf,
    /// Base of the single global artifact (usually the user's home).
    pub global_root: PathBuf,
}

impl ProvisionLayout {
    pub fn new(root: impl Into<PathBuf>, global_root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            global_root: global_root.into(),
        }
    }
}

/// Lifecycle of a single provisioning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionState {
    Idle,
    DirectoriesCreated,
    ArtifactsPlaced,
    ConversionsApplied,
    Done,
    Failed,
}

impl ProvisionState {
    /// The only state reachable from `self` on success.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::DirectoriesCreated),
            Self::DirectoriesCreated => Some(Self::ArtifactsPlaced),
            Self::ArtifactsPlaced => Some(Self::ConversionsApplied),
            Self::ConversionsApplied => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for ProvisionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::DirectoriesCreated => "directories-created",
            Self::ArtifactsPlaced => "artifacts-placed",
            Self::ConversionsApplied => "conversions-applied",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Structured result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionSummary {
    pub profile: String,
    pub mode: Mode,
    pub state: ProvisionState,
    pub items: Vec<StatusLine>,
}

impl ProvisionSummary {
    pub fn count(&self, status: Status) -> usize {
        self.items.iter().filter(|l| l.status == status).count()
    }

    pub fn created(&self) -> usize {
        self.count(Status::Created)
    }

    pub fn skipped(&self) -> usize {
        self.count(Status::Skipped)
    }

    pub fn simulated(&self) -> usize {
        self.count(Status::Simulated)
    }

    pub fn failed(&self) -> usize {
        self.count(Status::Failed)
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

impl fmt::Display for ProvisionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} created, {} skipped, {} simulated, {} failed",
            self.profile,
            self.created(),
            self.skipped(),
            self.simulated(),
            self.failed()
        )
    }
}

/// Forwards status lines and keeps a copy for the summary.
struct SummaryRecorder {
    inner: Arc<dyn StatusReporter>,
    lines: Mutex<Vec<StatusLine>>,
}

impl SummaryRecorder {
    fn new(inner: Arc<dyn StatusReporter>) -> Self {
        Self {
            inner,
            lines: Mutex::new(Vec::new()),
        }
    }

    fn take(&self) -> Vec<StatusLine> {
        self.lines
            .lock()
            .map(|mut lines| std::mem::take(&mut *lines))
            .unwrap_or_default()
    }
}

impl StatusReporter for SummaryRecorder {
    fn report(&self, line: &StatusLine) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.clone());
        }
        self.inner.report(line);
    }
}

/// Components and state for one invocation.
struct Run {
    state: ProvisionState,
    guard: FilesystemGuard,
    placer: ArtifactPlacer,
    resolver: GlobalPlacementResolver,
    converter: FormatConverter,
}

impl Run {
    fn advance(&mut self, to: ProvisionState) {
        debug_assert_eq!(self.state.next(), Some(to), "illegal provisioning transition");
        debug!(from = %self.state, to = %to, "state transition");
        self.state = to;
    }

    fn fail(&mut self) {
        debug!(from = %self.state, "state transition to failed");
        self.state = ProvisionState::Failed;
    }
}

/// Orchestrates directory creation, placement, and conversion for a profile.
pub struct ProfileProvisioner {
    filesystem: Arc<dyn Filesystem>,
    reporter: Arc<dyn StatusReporter>,
    mode: Mode,
    layout: ProvisionLayout,
}

impl ProfileProvisioner {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        reporter: Arc<dyn StatusReporter>,
        mode: Mode,
        layout: ProvisionLayout,
    ) -> Self {
        Self {
            filesystem,
            reporter,
            mode,
            layout,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn layout(&self) -> &ProvisionLayout {
        &self.layout
    }

    /// Provision `profile` under the configured layout.
    ///
    /// Returns the summary once the run reaches `Done`, even if individual
    /// artifacts or conversions failed. Returns an error if the profile is
    /// malformed or any directory could not be created.
    #[instrument(skip_all, fields(profile = %profile.name, mode = %self.mode))]
    pub fn provision(&self, profile: &Profile) -> RulesmithResult<ProvisionSummary> {
        let recorder = Arc::new(SummaryRecorder::new(Arc::clone(&self.reporter)));
        let guard = FilesystemGuard::new(
            Arc::clone(&self.filesystem),
            Arc::clone(&recorder) as Arc<dyn StatusReporter>,
            self.mode,
        );
        let placer = ArtifactPlacer::new(guard.clone());
        let mut run = Run {
            state: ProvisionState::Idle,
            resolver: GlobalPlacementResolver::new(placer.clone()),
            converter: FormatConverter::new(placer.clone()),
            guard,
            placer,
        };

        info!(root = %self.layout.root.display(), "provisioning started");

        if let Err(e) = self.drive(profile, &mut run) {
            run.fail();
            error!(error = %e, "provisioning failed");
            return Err(e);
        }
        run.advance(ProvisionState::Done);

        let summary = ProvisionSummary {
            profile: profile.name.clone(),
            mode: self.mode,
            state: run.state,
            items: recorder.take(),
        };
        info!(
            created = summary.created(),
            skipped = summary.skipped(),
            simulated = summary.simulated(),
            failed = summary.failed(),
            "provisioning finished"
        );
        Ok(summary)
    }

    fn drive(&self, profile: &Profile, run: &mut Run) -> RulesmithResult<()> {
        profile.validate()?;

        // Idle -> DirectoriesCreated: everything downstream needs these.
        run.guard
            .ensure_directories(&self.directory_spec(profile))?;
        run.advance(ProvisionState::DirectoriesCreated);

        // DirectoriesCreated -> ArtifactsPlaced
        for spec in self.artifact_specs(profile) {
            if let Err(e) = run.placer.place(&spec) {
                if e.is_invalid_argument() {
                    return Err(e);
                }
                warn!(path = %spec.destination.display(), error = %e, "artifact skipped");
            }
        }
        if let Some(request) = self.global_request(profile) {
            if let Err(e) = run.resolver.place_global(&request) {
                if e.is_invalid_argument() {
                    return Err(e);
                }
                warn!(path = %request.global_path.display(), error = %e, "global artifact skipped");
            }
        }
        run.advance(ProvisionState::ArtifactsPlaced);

        // ArtifactsPlaced -> ConversionsApplied
        for spec in self.conversion_specs(profile) {
            if let Err(e) = run.converter.convert(&spec) {
                if e.is_invalid_argument() {
                    return Err(e);
                }
                warn!(source = %spec.source.display(), error = %e, "conversion incomplete");
            }
        }
        run.advance(ProvisionState::ConversionsApplied);

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Spec construction
    // -------------------------------------------------------------------------

    fn local(&self, relative: &str) -> PathBuf {
        self.layout.root.join(Path::new(relative))
    }

    fn directory_spec(&self, profile: &Profile) -> DirectorySpec {
        DirectorySpec::new(profile.directories.iter().map(|d| self.local(d)))
    }

    fn artifact_specs(&self, profile: &Profile) -> Vec<ArtifactSpec> {
        profile
            .artifacts
            .iter()
            .map(|a| ArtifactSpec::new(self.local(&a.path), a.payload.as_str()))
            .collect()
    }

    fn global_request(&self, profile: &Profile) -> Option<GlobalPlacementRequest> {
        profile.global.as_ref().map(|g| {
            GlobalPlacementRequest::new(
                profile.name.as_str(),
                g.payload.as_str(),
                self.layout.global_root.join(&g.path),
            )
        })
    }

    fn conversion_specs(&self, profile: &Profile) -> Vec<ConversionSpec> {
        profile
            .conversions
            .iter()
            .map(|c| {
                ConversionSpec::new(
                    self.local(&c.source),
                    c.destinations.iter().map(|d| self.local(d)),
                    c.delimiter.as_str(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::application::{ApplicationError, ports::MockFilesystem};
    use crate::domain::{ConversionTemplate, Subject};

    struct Silent;

    impl StatusReporter for Silent {
        fn report(&self, _line: &StatusLine) {}
    }

    fn provisioner(fs: MockFilesystem, mode: Mode) -> ProfileProvisioner {
        ProfileProvisioner::new(
            Arc::new(fs),
            Arc::new(Silent),
            mode,
            ProvisionLayout::new("/proj", "/home/u"),
        )
    }

    fn denied(path: &Path) -> crate::error::RulesmithError {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: "permission denied".into(),
        }
        .into()
    }

    #[test]
    fn states_advance_in_fixed_order() {
        let mut state = ProvisionState::Idle;
        let mut seen = vec![state];
        while let Some(next) = state.next() {
            state = next;
            seen.push(state);
        }
        assert_eq!(
            seen,
            vec![
                ProvisionState::Idle,
                ProvisionState::DirectoriesCreated,
                ProvisionState::ArtifactsPlaced,
                ProvisionState::ConversionsApplied,
                ProvisionState::Done,
            ]
        );
        assert!(ProvisionState::Failed.is_terminal());
    }

    #[test]
    fn directory_failure_aborts_before_any_artifact() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|p| Err(denied(p)));
        fs.expect_write_file().never();
        fs.expect_read_file().never();

        let profile = Profile::new("alpha").directory("a").artifact("a/x.md", "x");
        let err = provisioner(fs, Mode::LIVE).provision(&profile).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn malformed_profile_fails_before_io() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().never();

        let profile = Profile::new("alpha").directory("a").artifact("a/x.md", "");
        let err = provisioner(fs, Mode::LIVE).provision(&profile).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn failed_artifact_does_not_stop_later_ones() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|p, _| p == Path::new("/proj/a/1.md"))
            .times(1)
            .returning(|p, _| Err(denied(p)));
        fs.expect_write_file()
            .withf(|p, _| p == Path::new("/proj/a/2.md") || p == Path::new("/proj/a/3.md"))
            .times(2)
            .returning(|_, _| Ok(()));

        let profile = Profile::new("alpha")
            .directory("a")
            .artifact("a/1.md", "one")
            .artifact("a/2.md", "two")
            .artifact("a/3.md", "three");
        let summary = provisioner(fs, Mode::LIVE).provision(&profile).unwrap();

        assert_eq!(summary.state, ProvisionState::Done);
        assert_eq!(summary.failed(), 1);
        let artifacts: Vec<_> = summary
            .items
            .iter()
            .filter(|l| l.subject == Subject::Artifact)
            .map(|l| (l.path.clone(), l.status))
            .collect();
        assert_eq!(
            artifacts,
            vec![
                (PathBuf::from("/proj/a/1.md"), Status::Failed),
                (PathBuf::from("/proj/a/2.md"), Status::Created),
                (PathBuf::from("/proj/a/3.md"), Status::Created),
            ]
        );
    }

    #[test]
    fn global_artifact_goes_under_global_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists()
            .returning(|p| p == Path::new("/home/u/.claude/CLAUDE.md"));
        fs.expect_write_file().returning(|_, _| Ok(()));

        let profile = Profile::new("claude")
            .directory(".claude")
            .artifact("CLAUDE.md", "local")
            .global(".claude/CLAUDE.md", "global");
        let summary = provisioner(fs, Mode::LIVE).provision(&profile).unwrap();

        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.created(), 2);
    }

    #[test]
    fn missing_conversion_source_still_reaches_done() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs.expect_read_file().returning(|_| Ok(None));

        let profile = Profile::new("alpha")
            .directory("a/b")
            .directory("a/c")
            .artifact("a/b/rule.md", "RULE")
            .conversion(ConversionTemplate::new("a/tmpl.src", ["a/c/rule.md"]));
        let summary = provisioner(fs, Mode::LIVE).provision(&profile).unwrap();

        assert_eq!(summary.state, ProvisionState::Done);
        assert_eq!(summary.created(), 3);
        assert_eq!(summary.skipped(), 1);
        assert!(!summary.has_failures());
    }

    #[test]
    fn dry_run_simulates_everything() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();
        fs.expect_exists().returning(|_| false);
        fs.expect_read_file()
            .returning(|_| Ok(Some("---\nbody\n---\n".into())));

        let profile = Profile::new("claude")
            .directory(".claude")
            .artifact("CLAUDE.md", "local")
            .global(".claude/CLAUDE.md", "global")
            .conversion(ConversionTemplate::new("shared.rule", ["out.md"]));
        let summary = provisioner(fs, Mode::DRY_RUN).provision(&profile).unwrap();

        assert_eq!(summary.simulated(), 4);
        assert_eq!(summary.mode, Mode::DRY_RUN);
        assert_eq!(
            summary.to_string(),
            "claude: 0 created, 0 skipped, 4 simulated, 0 failed"
        );
    }
}
