//! Status reporter that keeps every line, for assertions.

use std::sync::{Arc, Mutex};

use rulesmith_core::{
    application::ports::StatusReporter,
    domain::{Status, StatusLine},
};

/// Collects reported lines in order.
///
/// Clones share the same buffer, so a test can hand one clone to the
/// provisioner and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    lines: Arc<Mutex<Vec<StatusLine>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn lines(&self) -> Vec<StatusLine> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Lines with the given status.
    pub fn with_status(&self, status: Status) -> Vec<StatusLine> {
        self.lines()
            .into_iter()
            .filter(|line| line.status == status)
            .collect()
    }

    /// Rendered lines, as a user would read them.
    pub fn rendered(&self) -> Vec<String> {
        self.lines().iter().map(ToString::to_string).collect()
    }
}

impl StatusReporter for RecordingReporter {
    fn report(&self, line: &StatusLine) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulesmith_core::domain::Subject;

    #[test]
    fn clones_share_the_buffer() {
        let reporter = RecordingReporter::new();
        let handle = reporter.clone();

        reporter.report(&StatusLine::new(Status::Created, Subject::Directory, "a/b"));
        reporter.report(&StatusLine::new(Status::Failed, Subject::Artifact, "a/b/x.md"));

        assert_eq!(handle.lines().len(), 2);
        assert_eq!(handle.with_status(Status::Failed)[0].path.to_str(), Some("a/b/x.md"));
        assert_eq!(handle.rendered()[0], "[created]   directory  a/b");
    }
}
