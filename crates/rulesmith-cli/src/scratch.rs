//! Scratch space for one live run.
//!
//! Writes are staged in a temporary directory inside the project root and
//! renamed into place. The directory is removed when the [`Scratch`] value
//! drops (normal return, early `?`, panic unwinding) and, on SIGINT, SIGTERM
//! or SIGHUP, by the termination handler before the process exits with
//! status 130. The handler is not told which signal arrived, so all three
//! share that status.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::error::{CliResult, IntoCli};

/// Exit status after an interrupt or termination signal (128 + SIGINT).
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

const PREFIX: &str = ".rulesmith-scratch-";

/// Directory the interrupt handler must remove, if any.
static PENDING: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Install the termination handler once per process.
///
/// The handler removes the active scratch directory (committed artifacts
/// stay on disk) and exits with [`INTERRUPTED_EXIT_CODE`].
pub fn install_interrupt_handler() {
    static INSTALLED: OnceLock<()> = OnceLock::new();
    INSTALLED.get_or_init(|| {
        let result = ctrlc::set_handler(|| {
            let removed = remove_pending(&PENDING);
            match removed {
                Some(_) => eprintln!("\nInterrupted; scratch space removed."),
                None => eprintln!("\nInterrupted."),
            }
            std::process::exit(INTERRUPTED_EXIT_CODE);
        });
        if let Err(e) = result {
            warn!(error = %e, "could not install interrupt handler");
        }
    });
}

/// Take the registered directory out of `slot` and delete it.
fn remove_pending(slot: &Mutex<Option<PathBuf>>) -> Option<PathBuf> {
    let dir = slot.lock().ok().and_then(|mut slot| slot.take())?;
    let _ = std::fs::remove_dir_all(&dir);
    Some(dir)
}

/// A live run's staging directory.
#[derive(Debug)]
pub struct Scratch {
    dir: TempDir,
}

impl Scratch {
    /// Create a scratch directory inside `root` and register it for cleanup.
    pub fn create_in(root: &Path) -> CliResult<Self> {
        let dir = tempfile::Builder::new()
            .prefix(PREFIX)
            .tempdir_in(root)
            .with_cli_context(|| format!("failed to create scratch space in {}", root.display()))?;

        if let Ok(mut slot) = PENDING.lock() {
            *slot = Some(dir.path().to_path_buf());
        }
        debug!(path = %dir.path().display(), "scratch space created");

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        if let Ok(mut slot) = PENDING.lock() {
            if slot.as_deref() == Some(self.dir.path()) {
                *slot = None;
            }
        }
        debug!(path = %self.dir.path().display(), "scratch space released");
        // TempDir's own Drop removes the directory.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_is_removed_on_drop() {
        let root = tempfile::tempdir().unwrap();
        let path = {
            let scratch = Scratch::create_in(root.path()).unwrap();
            assert!(scratch.path().is_dir());
            assert!(scratch.path().starts_with(root.path()));
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn handler_cleanup_removes_the_registered_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(".rulesmith-scratch-test");
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        std::fs::write(dir.join("nested/staged.md"), "half").unwrap();
        let slot = Mutex::new(Some(dir.clone()));

        assert_eq!(remove_pending(&slot), Some(dir.clone()));
        assert!(!dir.exists());
        assert!(slot.lock().unwrap().is_none());
        assert_eq!(remove_pending(&slot), None);
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let err = Scratch::create_in(Path::new("/definitely/not/here")).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
