//! Config sink adapters.

mod directory;
mod memory;

pub use directory::DirectoryConfigSink;
pub use memory::{AppliedConfig, MemoryConfigSink};
