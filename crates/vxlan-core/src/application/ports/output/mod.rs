//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `vxlan-adapters` crate provides implementations.

use crate::domain::{Milestone, RenderTarget, TemplateName, VariableBinding};
use crate::error::VxlanResult;

/// Port for template rendering.
///
/// Implemented by:
/// - `vxlan_adapters::renderer::SimpleRenderer` (variable substitution into a config sink)
/// - `vxlan_adapters::renderer::RecordingRenderer` (dry runs, tests)
///
/// A render failure is fatal for the service instance: the lifecycle
/// wrapper does not absorb it.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render and apply one template against its anchor entity.
    fn render(
        &self,
        template: &TemplateName,
        context: &RenderTarget,
        bindings: &VariableBinding,
    ) -> VxlanResult<()>;
}

/// Port for template source retrieval.
///
/// Implemented by:
/// - `vxlan_adapters::template_store::InMemoryStore` (built-in templates)
/// - `vxlan_adapters::template_store::DirectoryStore` (`*.tmpl` files)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Template text for `name`.
    fn get(&self, name: &TemplateName) -> VxlanResult<String>;

    /// Names of every available template, sorted.
    fn list(&self) -> VxlanResult<Vec<TemplateName>>;
}

/// Port for applying rendered configuration to a device.
///
/// Implemented by:
/// - `vxlan_adapters::config_sink::MemoryConfigSink` (testing)
/// - `vxlan_adapters::config_sink::DirectoryConfigSink` (one file per device)
#[cfg_attr(test, mockall::automock)]
pub trait ConfigSink: Send + Sync {
    fn apply(&self, device: &str, template: &TemplateName, config: &str) -> VxlanResult<()>;
}

/// Port for per-service plan tracking.
///
/// Implemented by:
/// - `vxlan_adapters::plan::InMemoryPlanTracker`
#[cfg_attr(test, mockall::automock)]
pub trait PlanTracker: Send + Sync {
    /// Add a milestone to the plan component, initially not reached.
    fn append_state(&self, milestone: Milestone) -> VxlanResult<()>;

    fn set_reached(&self, milestone: Milestone) -> VxlanResult<()>;

    fn set_failed(&self, milestone: Milestone) -> VxlanResult<()>;
}
