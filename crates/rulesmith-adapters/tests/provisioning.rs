//! End-to-end provisioning against real temporary directories.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use sha2::{Digest, Sha256};
use tempfile::TempDir;
use walkdir::WalkDir;

use rulesmith_adapters::{BuiltinCatalog, LocalFilesystem, RecordingReporter};
use rulesmith_core::{
    application::{
        ArtifactPlacer, ConversionOutcome, FilesystemGuard, FormatConverter, ProfileProvisioner,
        ProvisionLayout, ProvisionState, ProvisionSummary,
        ports::{ProfileCatalog, StatusReporter},
    },
    domain::{ConversionSpec, ConversionTemplate, Mode, Profile, Status, Subject},
    error::RulesmithResult,
};

struct Workspace {
    root: TempDir,
    home: TempDir,
    reporter: RecordingReporter,
}

impl Workspace {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
            home: tempfile::tempdir().unwrap(),
            reporter: RecordingReporter::new(),
        }
    }

    fn root(&self) -> &Path {
        self.root.path()
    }

    fn home(&self) -> &Path {
        self.home.path()
    }

    fn provisioner(&self, mode: Mode) -> ProfileProvisioner {
        ProfileProvisioner::new(
            Arc::new(LocalFilesystem::new()),
            Arc::new(self.reporter.clone()),
            mode,
            ProvisionLayout::new(self.root(), self.home()),
        )
    }

    fn staged_provisioner(&self, staging: &Path, mode: Mode) -> ProfileProvisioner {
        ProfileProvisioner::new(
            Arc::new(LocalFilesystem::with_staging(staging)),
            Arc::new(self.reporter.clone()),
            mode,
            ProvisionLayout::new(self.root(), self.home()),
        )
    }

    fn provision(&self, profile: &Profile, mode: Mode) -> RulesmithResult<ProvisionSummary> {
        self.provisioner(mode).provision(profile)
    }

    fn converter(&self, mode: Mode) -> FormatConverter {
        let reporter: Arc<dyn StatusReporter> = Arc::new(self.reporter.clone());
        let guard = FilesystemGuard::new(Arc::new(LocalFilesystem::new()), reporter, mode);
        FormatConverter::new(ArtifactPlacer::new(guard))
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative)).unwrap()
    }
}

/// Hash of every path and file content under `dir`, in walk order.
fn snapshot(dir: &Path) -> String {
    let mut hasher = Sha256::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.unwrap();
        let relative = entry.path().strip_prefix(dir).unwrap();
        hasher.update(relative.to_string_lossy().as_bytes());
        if entry.file_type().is_file() {
            hasher.update(fs::read(entry.path()).unwrap());
        }
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}

fn builtin(name: &str) -> Profile {
    BuiltinCatalog::new().profile(name).unwrap()
}

fn alpha() -> Profile {
    Profile::new("alpha")
        .directory("a/b")
        .directory("a/c")
        .artifact("a/b/rule.md", "RULE")
        .conversion(ConversionTemplate::new("a/tmpl.src", ["a/c/rule.md"]))
}

#[test]
fn alpha_scenario() {
    let ws = Workspace::new();

    let summary = ws.provision(&alpha(), Mode::LIVE).unwrap();

    assert!(ws.root().join("a/b").is_dir());
    assert!(ws.root().join("a/c").is_dir());
    assert_eq!(ws.read("a/b/rule.md"), "RULE");
    assert!(!ws.root().join("a/c/rule.md").exists());
    assert_eq!(summary.state, ProvisionState::Done);
    assert_eq!(summary.created(), 3);
    assert_eq!(summary.failed(), 0);

    let skipped = ws.reporter.with_status(Status::Skipped);
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].subject, Subject::Conversion);
}

#[test]
fn provisioning_is_idempotent() {
    let ws = Workspace::new();
    let profile = builtin("cursor");

    let first = ws.provision(&profile, Mode::LIVE).unwrap();
    let after_first = snapshot(ws.root());
    let second = ws.provision(&profile, Mode::LIVE).unwrap();

    assert_eq!(snapshot(ws.root()), after_first);
    assert_eq!(first.created(), 4);
    assert_eq!(second.created(), 2);
    assert_eq!(second.skipped(), 2);
    assert!(
        second
            .items
            .iter()
            .filter(|l| l.subject == Subject::Directory)
            .all(|l| l.status == Status::Skipped && l.detail.as_deref() == Some("already exists"))
    );
    assert!(!second.has_failures());
}

#[cfg(unix)]
#[test]
fn staged_reprovisioning_keeps_file_modes() {
    use std::os::unix::fs::PermissionsExt;

    let ws = Workspace::new();
    let profile = builtin("cursor");
    let staging = ws.root().join(".staging");
    fs::create_dir(&staging).unwrap();

    let direct = ws.provision(&profile, Mode::LIVE).unwrap();
    assert!(!direct.has_failures());
    let rule = ws.root().join(".cursor/rules/project.mdc");
    let direct_mode = fs::metadata(&rule).unwrap().permissions().mode() & 0o777;

    fs::remove_file(&rule).unwrap();
    let staged = ws.staged_provisioner(&staging, Mode::LIVE);
    staged.provision(&profile).unwrap();
    assert_eq!(
        fs::metadata(&rule).unwrap().permissions().mode() & 0o777,
        direct_mode
    );

    fs::set_permissions(&rule, fs::Permissions::from_mode(0o755)).unwrap();
    let before = snapshot(ws.root());
    staged.provision(&profile).unwrap();

    assert_eq!(snapshot(ws.root()), before);
    assert_eq!(fs::metadata(&rule).unwrap().permissions().mode() & 0o777, 0o755);
    assert_eq!(fs::read_dir(&staging).unwrap().count(), 0);
}

#[test]
fn dry_run_leaves_both_roots_untouched() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.root().join(".rulesmith/shared")).unwrap();
    fs::write(
        ws.root().join(".rulesmith/shared/coding-standards.rule"),
        "---\nX\n---\n",
    )
    .unwrap();
    let before_root = snapshot(ws.root());
    let before_home = snapshot(ws.home());

    let summary = ws.provision(&builtin("claude"), Mode::DRY_RUN).unwrap();

    assert_eq!(snapshot(ws.root()), before_root);
    assert_eq!(snapshot(ws.home()), before_home);
    assert_eq!(summary.created(), 0);
    assert!(summary.simulated() > 0);
    assert_eq!(summary.mode, Mode::DRY_RUN);
}

#[test]
fn existing_global_file_is_never_overwritten() {
    let ws = Workspace::new();
    let global = ws.home().join(".claude/CLAUDE.md");
    fs::create_dir_all(global.parent().unwrap()).unwrap();
    fs::write(&global, "mine").unwrap();

    ws.provision(&builtin("claude"), Mode::LIVE).unwrap();
    ws.provision(&builtin("claude"), Mode::DRY_RUN).unwrap();

    assert_eq!(fs::read_to_string(&global).unwrap(), "mine");
    let skipped: Vec<_> = ws
        .reporter
        .with_status(Status::Skipped)
        .into_iter()
        .filter(|l| l.subject == Subject::Global)
        .collect();
    assert_eq!(skipped.len(), 2);
}

#[test]
fn missing_global_file_is_created_once() {
    let ws = Workspace::new();

    ws.provision(&builtin("claude"), Mode::LIVE).unwrap();
    let global = ws.home().join(".claude/CLAUDE.md");
    let first = fs::read_to_string(&global).unwrap();
    assert!(!first.is_empty());

    fs::write(&global, "edited").unwrap();
    ws.provision(&builtin("claude"), Mode::LIVE).unwrap();
    assert_eq!(fs::read_to_string(&global).unwrap(), "edited");
}

#[test]
fn conversion_extracts_the_delimited_block() {
    let ws = Workspace::new();
    fs::write(ws.root().join("tmpl.src"), "---\nX\n---\ntrailer\n").unwrap();

    let spec = ConversionSpec::new(
        ws.root().join("tmpl.src"),
        [ws.root().join("out/one.md"), ws.root().join("out/two.md")],
        "---",
    );
    let outcome = ws.converter(Mode::LIVE).convert(&spec).unwrap();

    assert!(matches!(outcome, ConversionOutcome::Applied(ref done) if done.len() == 2));
    assert_eq!(ws.read("out/one.md"), "X\n");
    assert_eq!(ws.read("out/two.md"), "X\n");
}

#[test]
fn conversion_with_too_few_markers_writes_empty_artifacts() {
    let ws = Workspace::new();
    for (name, text) in [("none.src", "just text\n"), ("one.src", "---\nhalf open\n")] {
        fs::write(ws.root().join(name), text).unwrap();
        let dest = ws.root().join(format!("{name}.md"));
        let spec = ConversionSpec::new(ws.root().join(name), [&dest], "---");

        ws.converter(Mode::LIVE).convert(&spec).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "", "{name}");
    }
}

#[test]
fn shared_rules_are_mirrored_after_the_shared_profile_runs() {
    let ws = Workspace::new();

    ws.provision(&builtin("shared"), Mode::LIVE).unwrap();
    let summary = ws.provision(&builtin("windsurf"), Mode::LIVE).unwrap();

    let mirrored = ws.read(".windsurf/rules/coding-standards.md");
    assert!(mirrored.starts_with("# Coding standards"));
    assert!(!mirrored.contains("---"));
    assert!(!mirrored.contains("format:"));
    assert_eq!(summary.skipped(), 0);
}

#[test]
fn one_failed_artifact_does_not_stop_its_siblings() {
    let ws = Workspace::new();
    fs::write(ws.root().join("blocker"), "regular file").unwrap();
    let profile = Profile::new("partial")
        .directory("a")
        .artifact("a/first.md", "1")
        .artifact("blocker/inside.md", "2")
        .artifact("a/last.md", "3");

    let summary = ws.provision(&profile, Mode::LIVE).unwrap();

    assert_eq!(summary.state, ProvisionState::Done);
    assert_eq!(summary.failed(), 1);
    assert_eq!(ws.read("a/first.md"), "1");
    assert_eq!(ws.read("a/last.md"), "3");
    let failed = ws.reporter.with_status(Status::Failed);
    assert_eq!(failed[0].path, ws.root().join("blocker/inside.md"));
}

#[test]
fn one_failed_conversion_destination_does_not_stop_the_others() {
    let ws = Workspace::new();
    fs::write(ws.root().join("blocker"), "regular file").unwrap();
    fs::write(ws.root().join("tmpl.src"), "---\nX\n---\n").unwrap();
    let destinations: Vec<PathBuf> = ["out/one.md", "blocker/two.md", "out/three.md"]
        .iter()
        .map(|d| ws.root().join(d))
        .collect();
    let spec = ConversionSpec::new(ws.root().join("tmpl.src"), destinations, "---");

    let err = ws.converter(Mode::LIVE).convert(&spec).unwrap_err();

    assert!(err.is_io());
    assert_eq!(ws.read("out/one.md"), "X\n");
    assert_eq!(ws.read("out/three.md"), "X\n");
}

#[test]
fn directory_failure_aborts_and_keeps_earlier_directories() {
    let ws = Workspace::new();
    fs::write(ws.root().join("blocker"), "regular file").unwrap();
    let profile = Profile::new("broken")
        .directory("first")
        .directory("blocker/sub")
        .directory("never")
        .artifact("first/rule.md", "RULE");

    let err = ws.provision(&profile, Mode::LIVE).unwrap_err();

    assert!(err.is_io());
    assert!(ws.root().join("first").is_dir());
    assert!(!ws.root().join("never").exists());
    assert!(!ws.root().join("first/rule.md").exists());
}

#[test]
fn every_builtin_profile_provisions_cleanly() {
    let catalog = BuiltinCatalog::new();
    for profile in catalog.profiles().unwrap() {
        let ws = Workspace::new();
        let summary = ws.provision(&profile, Mode::LIVE).unwrap();
        assert!(!summary.has_failures(), "{} failed", profile.name);
        assert_eq!(
            summary.created(),
            profile.directories.len()
                + profile.artifacts.len()
                + usize::from(profile.global.is_some()),
            "{}",
            profile.name
        );
    }
}
