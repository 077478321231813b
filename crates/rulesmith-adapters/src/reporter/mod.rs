//! Status reporter adapters.

mod recording;
mod traced;

pub use recording::RecordingReporter;
pub use traced::TracingReporter;
