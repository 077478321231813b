//! Local filesystem adapter using std::fs.

use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use tracing::debug;

use rulesmith_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{RulesmithError, RulesmithResult},
};

/// Production filesystem implementation using `std::fs`.
///
/// With a staging directory, writes go to a temporary file inside it first
/// and are renamed into place, so a destination never holds half a payload.
/// When the rename cannot cross filesystems the write falls back to a plain
/// `std::fs::write`.
#[derive(Debug, Clone, Default)]
pub struct LocalFilesystem {
    staging: Option<PathBuf>,
}

impl LocalFilesystem {
    /// Create a new local filesystem adapter with direct writes.
    pub fn new() -> Self {
        Self { staging: None }
    }

    /// Stage writes in `dir` (which must exist for the adapter's lifetime).
    pub fn with_staging(dir: impl Into<PathBuf>) -> Self {
        Self {
            staging: Some(dir.into()),
        }
    }

    pub fn staging_dir(&self) -> Option<&Path> {
        self.staging.as_deref()
    }

    fn write_staged(staging: &Path, path: &Path, content: &str) -> io::Result<()> {
        let mut temp = staging_builder().tempfile_in(staging)?;

        // Overwrites keep the destination's mode, as a direct write would.
        let existing = std::fs::metadata(path).ok().filter(|meta| meta.is_file());
        if let Some(meta) = existing {
            temp.as_file().set_permissions(meta.permissions())?;
        }

        temp.write_all(content.as_bytes())?;
        temp.flush()?;

        match temp.persist(path) {
            Ok(_) => Ok(()),
            Err(e) => {
                // Usually EXDEV: staging and destination on different devices.
                debug!(path = %path.display(), error = %e.error, "rename failed, writing directly");
                drop(e.file);
                std::fs::write(path, content)
            }
        }
    }
}

/// Temp files default to 0600; new files get `0666 & !umask` like `fs::write`.
#[cfg(unix)]
fn staging_builder() -> tempfile::Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = tempfile::Builder::new();
    builder.permissions(std::fs::Permissions::from_mode(0o666));
    builder
}

#[cfg(not(unix))]
fn staging_builder() -> tempfile::Builder<'static, 'static> {
    tempfile::Builder::new()
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> RulesmithResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, &e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> RulesmithResult<()> {
        let result = match &self.staging {
            Some(staging) => Self::write_staged(staging, path, content),
            None => std::fs::write(path, content),
        };
        result.map_err(|e| map_io_error(path, &e, "write file"))
    }

    fn read_file(&self, path: &Path) -> RulesmithResult<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(path, &e, "read file")),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: &io::Error, operation: &str) -> RulesmithError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}
