//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `vxlan-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `TemplateRenderer`: Template rendering and application
//!   - `TemplateStore`: Template source retrieval
//!   - `ConfigSink`: Rendered configuration delivery
//!   - `PlanTracker`: Plan milestone bookkeeping
//!
//! - The fabric itself is read through `crate::domain::FabricModel`, which the
//!   domain owns because the engine cannot run without it.

pub mod output;

pub use output::{ConfigSink, PlanTracker, TemplateRenderer, TemplateStore};

#[cfg(test)]
pub use output::{MockConfigSink, MockPlanTracker, MockTemplateRenderer, MockTemplateStore};
