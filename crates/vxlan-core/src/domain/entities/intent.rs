//! Service intent: the declarative record for one VXLAN service instance.
//!
//! An intent names the data center it attaches to, the leaf devices that
//! participate, and the VLANs extended over the DCI. It is immutable once
//! handed to the fan-out engine.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// One leaf device participating in the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeafPort {
    pub node_name: String,
}

impl LeafPort {
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
        }
    }
}

/// A VLAN extended across the data-center interconnect.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vlan {
    pub id: u16,
    #[serde(default)]
    pub name: String,
}

impl Vlan {
    pub const MIN_ID: u16 = 1;
    pub const MAX_ID: u16 = 4094;

    pub fn new(id: u16, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Fallible constructor enforcing the 802.1Q range.
    pub fn try_new(id: u16, name: impl Into<String>) -> Result<Self, DomainError> {
        let vlan = Self::new(id, name);
        vlan.validate()?;
        Ok(vlan)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if (Self::MIN_ID..=Self::MAX_ID).contains(&self.id) {
            Ok(())
        } else {
            Err(DomainError::InvalidVlanId { id: self.id })
        }
    }
}

impl fmt::Display for Vlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} ({})", self.id, self.name)
        }
    }
}

/// A declarative VXLAN service instance.
///
/// Field order of `leaf_ports` and `dci_vlans` is significant: the fan-out
/// engine emits render calls in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceIntent {
    service_id: String,
    dc_name: String,
    #[serde(default)]
    leaf_ports: Vec<LeafPort>,
    #[serde(default)]
    dci_vlans: Vec<Vlan>,
}

impl ServiceIntent {
    pub fn builder() -> ServiceIntentBuilder {
        ServiceIntentBuilder::default()
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub fn dc_name(&self) -> &str {
        &self.dc_name
    }

    pub fn leaf_ports(&self) -> &[LeafPort] {
        &self.leaf_ports
    }

    pub fn dci_vlans(&self) -> &[Vlan] {
        &self.dci_vlans
    }

    /// Structural checks that do not need the fabric.
    ///
    /// Cardinality against border leaves is the engine's job; this only
    /// rejects intents that are malformed on their own.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.service_id.trim().is_empty() {
            return Err(DomainError::InvalidIntent(
                "service id cannot be empty".into(),
            ));
        }
        if self.dc_name.trim().is_empty() {
            return Err(DomainError::InvalidIntent("dc-name cannot be empty".into()));
        }

        let mut seen = HashSet::new();
        for leaf in &self.leaf_ports {
            if !seen.insert(leaf.node_name.as_str()) {
                return Err(DomainError::DuplicateLeafNode {
                    node_name: leaf.node_name.clone(),
                });
            }
        }

        self.dci_vlans.iter().try_for_each(Vlan::validate)
    }
}

impl fmt::Display for ServiceIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (dc={})", self.service_id, self.dc_name)
    }
}

/// Builder for `ServiceIntent`.
///
/// `service_id` and `dc_name` are required; ports and VLANs accumulate in
/// the order they are added.
#[derive(Default)]
pub struct ServiceIntentBuilder {
    service_id: Option<String>,
    dc_name: Option<String>,
    leaf_ports: Vec<LeafPort>,
    dci_vlans: Vec<Vlan>,
}

impl ServiceIntentBuilder {
    pub fn service_id(mut self, id: impl Into<String>) -> Self {
        self.service_id = Some(id.into());
        self
    }

    pub fn dc_name(mut self, name: impl Into<String>) -> Self {
        self.dc_name = Some(name.into());
        self
    }

    pub fn leaf_port(mut self, node_name: impl Into<String>) -> Self {
        self.leaf_ports.push(LeafPort::new(node_name));
        self
    }

    pub fn dci_vlan(mut self, id: u16, name: impl Into<String>) -> Self {
        self.dci_vlans.push(Vlan::new(id, name));
        self
    }

    pub fn build(self) -> Result<ServiceIntent, DomainError> {
        let intent = ServiceIntent {
            service_id: self
                .service_id
                .ok_or(DomainError::MissingRequiredField {
                    field: "service_id",
                })?,
            dc_name: self
                .dc_name
                .ok_or(DomainError::MissingRequiredField { field: "dc_name" })?,
            leaf_ports: self.leaf_ports,
            dci_vlans: self.dci_vlans,
        };
        intent.validate()?;
        Ok(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_declaration_order() {
        let intent = ServiceIntent::builder()
            .service_id("svc")
            .dc_name("dc1")
            .leaf_port("leaf2")
            .leaf_port("leaf1")
            .dci_vlan(20, "b")
            .dci_vlan(10, "a")
            .build()
            .unwrap();

        let names: Vec<_> = intent.leaf_ports().iter().map(|l| &l.node_name).collect();
        assert_eq!(names, ["leaf2", "leaf1"]);
        assert_eq!(intent.dci_vlans()[0].id, 20);
    }

    #[test]
    fn builder_requires_dc_name() {
        let err = ServiceIntent::builder().service_id("svc").build().unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredField { field: "dc_name" });
    }

    #[test]
    fn vlan_zero_rejected() {
        assert_eq!(
            Vlan::try_new(0, "x").unwrap_err(),
            DomainError::InvalidVlanId { id: 0 }
        );
        assert!(Vlan::try_new(4094, "x").is_ok());
        assert!(Vlan::try_new(4095, "x").is_err());
    }

    #[test]
    fn duplicate_leaf_rejected() {
        let err = ServiceIntent::builder()
            .service_id("svc")
            .dc_name("dc1")
            .leaf_port("leaf1")
            .leaf_port("leaf1")
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateLeafNode { .. }));
    }

    #[test]
    fn deserialises_with_missing_lists() {
        let intent: ServiceIntent =
            serde_json::from_str(r#"{"service_id":"s","dc_name":"dc1"}"#).unwrap();
        assert!(intent.leaf_ports().is_empty());
        assert!(intent.dci_vlans().is_empty());
    }
}
