//! Render calls: the unit of work the fan-out engine emits.
//!
//! ```text
//! RenderCall
//! ├── template:  TemplateName   ("l2_leaf_node", ...)
//! ├── context:   RenderTarget   (leaf port | service | DCI port)
//! └── bindings:  VariableBinding
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    binding::VariableBinding,
    fabric::Port,
    intent::{LeafPort, ServiceIntent},
};

/// Name of a device-configuration template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateName(String);

impl TemplateName {
    pub const L2_LEAF_NODE: &'static str = "l2_leaf_node";
    pub const L2_BORDER_LEAF_NODE: &'static str = "l2_border_leaf_node";
    pub const L3_LEAF_NODE: &'static str = "l3_leaf_node";
    pub const L3_BORDER_LEAF_NODE: &'static str = "l3_border_leaf_node";
    pub const BORDER_LEAF_NODE_VLANS: &'static str = "border_leaf_node_vlans";

    /// Every template the engine can emit.
    pub const ALL: [&'static str; 5] = [
        Self::L2_LEAF_NODE,
        Self::L2_BORDER_LEAF_NODE,
        Self::L3_LEAF_NODE,
        Self::L3_BORDER_LEAF_NODE,
        Self::BORDER_LEAF_NODE_VLANS,
    ];

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TemplateName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The entity a template is applied against.
///
/// Mirrors the node a host template engine would be anchored on: the leaf
/// port entry, the service itself, or one DCI port of a border leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderTarget {
    LeafPort(LeafPort),
    Service { service_id: String, dc_name: String },
    DciPort { device: String, port: Port },
}

impl RenderTarget {
    pub fn service(intent: &ServiceIntent) -> Self {
        Self::Service {
            service_id: intent.service_id().to_string(),
            dc_name: intent.dc_name().to_string(),
        }
    }

    /// Device this target lives on, when the target itself knows it.
    ///
    /// Service-anchored calls return `None`; their device comes from the
    /// `DEVICE` binding.
    pub fn device(&self) -> Option<&str> {
        match self {
            Self::LeafPort(leaf) => Some(&leaf.node_name),
            Self::Service { .. } => None,
            Self::DciPort { device, .. } => Some(device),
        }
    }

    /// Variables a template may read from its anchor node.
    pub fn context_variables(&self) -> VariableBinding {
        match self {
            Self::LeafPort(leaf) => VariableBinding::new().with("NODE_NAME", &leaf.node_name),
            Self::Service {
                service_id,
                dc_name,
            } => VariableBinding::new()
                .with("SERVICE_ID", service_id)
                .with("DC_NAME", dc_name),
            Self::DciPort { port, .. } => VariableBinding::new()
                .with("PORT_ID", &port.id)
                .with("PORT_KIND", port.kind),
        }
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeafPort(leaf) => write!(f, "leaf {}", leaf.node_name),
            Self::Service { service_id, .. } => write!(f, "service {service_id}"),
            Self::DciPort { device, port } => write!(f, "{device} {port}"),
        }
    }
}

/// One template application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderCall {
    pub template: TemplateName,
    pub context: RenderTarget,
    pub bindings: VariableBinding,
}

impl RenderCall {
    pub fn new(
        template: impl Into<TemplateName>,
        context: RenderTarget,
        bindings: VariableBinding,
    ) -> Self {
        Self {
            template: template.into(),
            context,
            bindings,
        }
    }

    /// Device the rendered configuration applies to.
    pub fn device(&self) -> Option<&str> {
        self.bindings.get("DEVICE").or_else(|| self.context.device())
    }
}

impl fmt::Display for RenderCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {} [{}]", self.template, self.context, self.bindings)
    }
}
