// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for the VXLAN fan-out.
//!
//! This module contains the pure fan-out logic. Template rendering, plan
//! tracking and document loading are reached through ports (traits)
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: The fabric is read through [`FabricModel`]; calls go to a [`CallSink`]
//! - **No external crates**: Only std library + thiserror, serde derives and tracing events
//! - **Immutable entities**: Intents and fabrics are never mutated by the engine
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod fanout;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    binding::VariableBinding,
    fabric::{
        BorderLeafNode, DataCenter, Fabric, FabricModel, GlobalConfig, InterfaceGroup, LeafNode,
        Port, PortKind, TenantRouteMaps,
    },
    intent::{LeafPort, ServiceIntent, ServiceIntentBuilder, Vlan},
    plan::{Milestone, MilestoneStatus, SELF_COMPONENT, SELF_COMPONENT_TYPE},
    render_call::{RenderCall, RenderTarget, TemplateName},
};

pub use error::{DciLayer, DomainError, ErrorCategory};

pub use fanout::{CallSink, ServiceKind, bindings, render_l2, render_l3};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    fn fabric() -> Fabric {
        Fabric::new(GlobalConfig {
            nve_source_interface: Some("loopback1".into()),
            ..GlobalConfig::default()
        })
        .with_data_center(
            DataCenter::new("dc1")
                .with_leaf(LeafNode::new("leaf1", 65001))
                .with_border_leaf(
                    BorderLeafNode::new("bl1", 65100)
                        .with_layer2(InterfaceGroup::port_channels(["10"]))
                        .with_layer3(InterfaceGroup::port_channels(["20"])),
                ),
        )
    }

    fn intent() -> ServiceIntent {
        ServiceIntent::builder()
            .service_id("tenant-a")
            .dc_name("dc1")
            .leaf_port("leaf1")
            .dci_vlan(300, "DCI-300")
            .build()
            .unwrap()
    }

    #[test]
    fn plan_is_idempotent() {
        for kind in ServiceKind::ALL {
            let first = kind.plan(&intent(), &fabric()).unwrap();
            let second = kind.plan(&intent(), &fabric()).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn l2_and_l3_emit_same_shape_for_single_port() {
        let l2 = ServiceKind::L2.plan(&intent(), &fabric()).unwrap();
        let l3 = ServiceKind::L3.plan(&intent(), &fabric()).unwrap();

        assert_eq!(l2.len(), 3);
        assert_eq!(l3.len(), 3);
        assert_eq!(l2[0].template.as_str(), TemplateName::L2_LEAF_NODE);
        assert_eq!(l3[0].template.as_str(), TemplateName::L3_LEAF_NODE);
    }

    #[test]
    fn validator_rejects_bad_vlan() {
        let intent: ServiceIntent = serde_json::from_str(
            r#"{"service_id":"s","dc_name":"dc1","dci_vlans":[{"id":5000}]}"#,
        )
        .unwrap();
        assert_eq!(
            DomainValidator::validate_intent(&intent).unwrap_err(),
            DomainError::InvalidVlanId { id: 5000 }
        );
    }
}
