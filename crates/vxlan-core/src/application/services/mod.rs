//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "create a VXLAN service" or "list templates".

pub mod lifecycle;
pub mod registry;
pub mod template_service;
pub mod vxlan_service;

pub use lifecycle::{LifecycleOutcome, init_plan, with_lifecycle_tracking};
pub use registry::VxlanApplication;
pub use template_service::{TemplateInfo, TemplateService};
pub use vxlan_service::{CreateReport, RendererSink, VxlanService};
