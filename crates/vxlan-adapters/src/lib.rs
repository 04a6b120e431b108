//! Infrastructure adapters for the VXLAN fan-out.
//!
//! This crate implements the ports defined in `vxlan-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod config_sink;
pub mod document;
pub mod plan;
pub mod renderer;
pub mod template_store;

// Re-export commonly used adapters
pub use config_sink::{DirectoryConfigSink, MemoryConfigSink};
pub use document::{load_fabric, load_intent};
pub use plan::InMemoryPlanTracker;
pub use renderer::{RecordingRenderer, SimpleRenderer};
pub use template_store::{DirectoryStore, InMemoryStore};
