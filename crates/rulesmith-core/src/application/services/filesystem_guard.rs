//! Filesystem Guard - directory creation and the single dry-run switch.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::{
    application::ports::{Filesystem, StatusReporter},
    domain::{DirectorySpec, Mode, Status, StatusLine, Subject},
    error::RulesmithResult,
};

/// Safe creation primitives shared by every other component.
///
/// Everything that could mutate the filesystem asks the guard first, so the
/// dry-run decision is made in exactly one place.
#[derive(Clone)]
pub struct FilesystemGuard {
    filesystem: Arc<dyn Filesystem>,
    reporter: Arc<dyn StatusReporter>,
    mode: Mode,
}

impl FilesystemGuard {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        reporter: Arc<dyn StatusReporter>,
        mode: Mode,
    ) -> Self {
        Self {
            filesystem,
            reporter,
            mode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// `true` when writes must be suppressed.
    pub fn suppresses_writes(&self) -> bool {
        self.mode.is_dry_run()
    }

    pub fn filesystem(&self) -> &Arc<dyn Filesystem> {
        &self.filesystem
    }

    pub fn reporter(&self) -> &Arc<dyn StatusReporter> {
        &self.reporter
    }

    /// Ensure every directory in `spec` exists, ancestors included.
    ///
    /// Directories that were already present are reported as skipped.
    /// Stops at the first failure. Directories created before it stay.
    #[instrument(skip_all, fields(count = spec.len(), mode = %self.mode))]
    pub fn ensure_directories(&self, spec: &DirectorySpec) -> RulesmithResult<()> {
        spec.validate()?;

        for path in &spec.paths {
            if self.suppresses_writes() {
                debug!(path = %path.display(), "would create directory");
                self.reporter
                    .report(&StatusLine::new(Status::Simulated, Subject::Directory, path));
                continue;
            }

            // Still call create_dir_all on existing paths: a file there must fail.
            let existed = self.filesystem.exists(path);
            match self.filesystem.create_dir_all(path) {
                Ok(()) if existed => {
                    debug!(path = %path.display(), "directory already present");
                    self.reporter.report(
                        &StatusLine::new(Status::Skipped, Subject::Directory, path)
                            .with_detail("already exists"),
                    );
                }
                Ok(()) => {
                    debug!(path = %path.display(), "directory created");
                    self.reporter
                        .report(&StatusLine::new(Status::Created, Subject::Directory, path));
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "directory creation failed");
                    self.reporter.report(
                        &StatusLine::new(Status::Failed, Subject::Directory, path)
                            .with_detail(e.to_string()),
                    );
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// Create the parent of `file` if it has one. Silent; no status line.
    pub fn ensure_parent(&self, file: &Path) -> RulesmithResult<()> {
        if self.suppresses_writes() {
            return Ok(());
        }
        match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                self.filesystem.create_dir_all(parent)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Mutex;

    use super::*;
    use crate::application::{ApplicationError, ports::MockFilesystem};
    use crate::domain::DomainError;
    use crate::error::RulesmithError;

    #[derive(Default)]
    struct Lines(Mutex<Vec<StatusLine>>);

    impl StatusReporter for Lines {
        fn report(&self, line: &StatusLine) {
            self.0.lock().unwrap().push(line.clone());
        }
    }

    impl Lines {
        fn statuses(&self) -> Vec<Status> {
            self.0.lock().unwrap().iter().map(|l| l.status).collect()
        }
    }

    fn guard(fs: MockFilesystem, mode: Mode) -> (FilesystemGuard, Arc<Lines>) {
        let lines = Arc::new(Lines::default());
        (FilesystemGuard::new(Arc::new(fs), lines.clone(), mode), lines)
    }

    #[test]
    fn creates_every_directory_in_order() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        let mut seq = mockall::Sequence::new();
        for expected in ["a/b", "a/c"] {
            fs.expect_create_dir_all()
                .withf(move |p| p == Path::new(expected))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(()));
        }

        let (guard, lines) = guard(fs, Mode::LIVE);
        guard
            .ensure_directories(&DirectorySpec::new(["a/b", "a/c"]))
            .unwrap();

        assert_eq!(lines.statuses(), vec![Status::Created, Status::Created]);
    }

    #[test]
    fn dry_run_touches_nothing_but_reports() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().never();

        let (guard, lines) = guard(fs, Mode::DRY_RUN);
        guard
            .ensure_directories(&DirectorySpec::new(["a/b", "a/c"]))
            .unwrap();

        assert_eq!(lines.statuses(), vec![Status::Simulated, Status::Simulated]);
    }

    #[test]
    fn empty_path_fails_before_any_io() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().never();

        let (guard, lines) = guard(fs, Mode::LIVE);
        let err = guard
            .ensure_directories(&DirectorySpec::new(["a/b", ""]))
            .unwrap_err();

        assert!(matches!(
            err,
            RulesmithError::Domain(DomainError::EmptyDirectoryPath { index: 1 })
        ));
        assert!(lines.statuses().is_empty());
    }

    #[test]
    fn stops_at_first_failure_without_rollback() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all()
            .withf(|p| p == Path::new("ok"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_create_dir_all()
            .withf(|p| p == Path::new("bad"))
            .times(1)
            .returning(|p| {
                Err(ApplicationError::FilesystemError {
                    path: PathBuf::from(p),
                    reason: "denied".into(),
                }
                .into())
            });
        fs.expect_create_dir_all()
            .withf(|p| p == Path::new("never"))
            .never();

        let (guard, lines) = guard(fs, Mode::LIVE);
        let err = guard
            .ensure_directories(&DirectorySpec::new(["ok", "bad", "never"]))
            .unwrap_err();

        assert!(err.is_io());
        assert_eq!(lines.statuses(), vec![Status::Created, Status::Failed]);
    }

    #[test]
    fn existing_directory_is_reported_as_skipped() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|p| p == Path::new("a/b"));
        fs.expect_create_dir_all().times(2).returning(|_| Ok(()));

        let (guard, lines) = guard(fs, Mode::LIVE);
        guard
            .ensure_directories(&DirectorySpec::new(["a/b", "a/c"]))
            .unwrap();

        assert_eq!(lines.statuses(), vec![Status::Skipped, Status::Created]);
        let first = lines.0.lock().unwrap()[0].clone();
        assert_eq!(first.detail.as_deref(), Some("already exists"));
    }

    #[test]
    fn existing_file_in_place_of_a_directory_still_fails() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_create_dir_all()
            .returning(|p| {
                Err(ApplicationError::FilesystemError {
                    path: PathBuf::from(p),
                    reason: "not a directory".into(),
                }
                .into())
            });

        let (guard, lines) = guard(fs, Mode::LIVE);
        let err = guard
            .ensure_directories(&DirectorySpec::new(["blocker"]))
            .unwrap_err();

        assert!(err.is_io());
        assert_eq!(lines.statuses(), vec![Status::Failed]);
    }

    #[test]
    fn ensure_parent_skips_bare_file_names() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().never();
        let (guard, _) = guard(fs, Mode::LIVE);
        guard.ensure_parent(Path::new("README.md")).unwrap();
    }
}
