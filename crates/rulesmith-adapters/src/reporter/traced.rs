//! Status lines as tracing events.

use tracing::{info, warn};

use rulesmith_core::{
    application::ports::StatusReporter,
    domain::{Status, StatusLine},
};

/// Forwards every status line to the tracing subscriber.
///
/// Used when no console is attached (and as the CLI's log-side copy).
/// Failures go out at WARN, everything else at INFO.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl TracingReporter {
    pub fn new() -> Self {
        Self
    }
}

impl StatusReporter for TracingReporter {
    fn report(&self, line: &StatusLine) {
        let path = line.path.display();
        let detail = line.detail.as_deref().unwrap_or("");
        match line.status {
            Status::Failed => warn!(
                status = %line.status,
                subject = %line.subject,
                %path,
                detail,
                "provisioning step failed"
            ),
            _ => info!(
                status = %line.status,
                subject = %line.subject,
                %path,
                detail,
                "provisioning step"
            ),
        }
    }
}
