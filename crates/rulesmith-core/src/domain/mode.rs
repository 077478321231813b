//! Execution mode shared by every provisioning component.

use std::fmt;

use serde::Serialize;

/// Whether a run mutates the filesystem or only reports what it would do.
///
/// Built once from command-line input and handed by value to every
/// component at construction. It is `Copy` and has no setters, so a run can
/// never change mode halfway through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Mode {
    dry_run: bool,
}

impl Mode {
    /// Writes happen.
    pub const LIVE: Self = Self { dry_run: false };

    /// No filesystem mutation; every intended action is reported instead.
    pub const DRY_RUN: Self = Self { dry_run: true };

    pub const fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub const fn is_dry_run(self) -> bool {
        self.dry_run
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dry_run {
            write!(f, "dry-run")
        } else {
            write!(f, "live")
        }
    }
}
