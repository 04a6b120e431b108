pub mod binding;
pub mod fabric;
pub mod intent;
pub mod plan;
pub mod render_call;

pub use crate::domain::DomainError;
pub use binding::VariableBinding;
pub use fabric::{Fabric, FabricModel};
pub use intent::ServiceIntent;
pub use render_call::{RenderCall, RenderTarget, TemplateName};
