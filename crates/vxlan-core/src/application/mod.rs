//! Use cases over the domain: service points, template inventory and the
//! plan lifecycle, plus the ports adapters implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::{ConfigSink, PlanTracker, TemplateRenderer, TemplateStore};
pub use services::{
    CreateReport, LifecycleOutcome, RendererSink, TemplateInfo, TemplateService, VxlanApplication,
    VxlanService, init_plan, with_lifecycle_tracking,
};
