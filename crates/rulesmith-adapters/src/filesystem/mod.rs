//! [`Filesystem`](rulesmith_core::application::ports::Filesystem) implementations: the real disk and an in-memory double.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
