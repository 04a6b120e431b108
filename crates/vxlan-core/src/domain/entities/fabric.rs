//! Fabric model: read-only data-center topology.
//!
//! ## Structure
//!
//! ```text
//! Fabric
//! ├── GlobalConfig            (NVE source, tenant policy)
//! └── plant: Vec<DataCenter>
//!      ├── leaf_nodes: Vec<LeafNode>          (name, asn)
//!      └── border_leaf_nodes: Vec<BorderLeafNode>
//!           ├── dci_layer2: InterfaceGroup    (Port-channel | Ethernet)
//!           └── dci_layer3: InterfaceGroup
//! ```
//!
//! The fan-out engine only reads the fabric through [`FabricModel`], so a
//! host can back it with whatever store it owns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DciLayer, DomainError};

/// Read-only query interface over the fabric.
///
/// This is a **driven port** owned by the domain: the engine needs these
/// three lookups and nothing else.
pub trait FabricModel {
    /// Fabric-wide policy values.
    fn global_config(&self) -> &GlobalConfig;

    /// Border-leaf nodes of a data center, in fabric declaration order.
    ///
    /// # Errors
    /// - `UnknownDataCenter` if `dc_name` is not in the plant
    fn border_leaf_nodes(&self, dc_name: &str) -> Result<&[BorderLeafNode], DomainError>;

    /// Autonomous-system number of a leaf or border-leaf device.
    ///
    /// # Errors
    /// - `UnknownDevice` if no data center lists `node_name`
    fn device_asn(&self, node_name: &str) -> Result<u32, DomainError>;
}

/// Tenant route-map names used for BGP redistribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRouteMaps {
    #[serde(default)]
    pub bgp_redistribute_static: Option<String>,
    #[serde(default)]
    pub bgp_redistribute_connected: Option<String>,
}

/// Fabric-wide configuration. Every value is optional upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub nve_source_interface: Option<String>,
    #[serde(default)]
    pub tenant_prefix_tag: Option<String>,
    #[serde(default)]
    pub tenant_route_maps: TenantRouteMaps,
}

/// Kind of a DCI-facing interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortKind {
    PortChannel,
    Ethernet,
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PortChannel => write!(f, "Port-channel"),
            Self::Ethernet => write!(f, "Ethernet"),
        }
    }
}

/// A resolved DCI port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Port {
    pub id: String,
    pub kind: PortKind,
}

impl Port {
    pub fn new(id: impl Into<String>, kind: PortKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.id)
    }
}

/// One group of DCI interfaces on a border leaf, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceGroup {
    #[serde(default)]
    pub port_channel: Vec<String>,
    #[serde(default)]
    pub ethernet: Vec<String>,
}

impl InterfaceGroup {
    pub fn port_channels<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            port_channel: ids.into_iter().map(Into::into).collect(),
            ethernet: Vec::new(),
        }
    }

    pub fn ethernets<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            port_channel: Vec::new(),
            ethernet: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Candidate DCI ports: Port-channels if any, else Ethernets.
    ///
    /// Exactly one kind must be populated.
    ///
    /// # Errors
    /// - `AmbiguousDciPorts` if both kinds are populated
    /// - `MissingDciPorts` if neither is
    pub fn candidate_ports(&self, device: &str, layer: DciLayer) -> Result<Vec<Port>, DomainError> {
        match (self.port_channel.is_empty(), self.ethernet.is_empty()) {
            (false, true) => Ok(self
                .port_channel
                .iter()
                .map(|id| Port::new(id.as_str(), PortKind::PortChannel))
                .collect()),
            (true, false) => Ok(self
                .ethernet
                .iter()
                .map(|id| Port::new(id.as_str(), PortKind::Ethernet))
                .collect()),
            (false, false) => Err(DomainError::AmbiguousDciPorts {
                device: device.to_string(),
                layer,
            }),
            (true, true) => Err(DomainError::MissingDciPorts {
                device: device.to_string(),
                layer,
            }),
        }
    }
}

/// A fabric device terminating DCI links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderLeafNode {
    pub name: String,
    pub asn: u32,
    #[serde(default)]
    pub dci_layer2: InterfaceGroup,
    #[serde(default)]
    pub dci_layer3: InterfaceGroup,
}

impl BorderLeafNode {
    pub fn new(name: impl Into<String>, asn: u32) -> Self {
        Self {
            name: name.into(),
            asn,
            dci_layer2: InterfaceGroup::default(),
            dci_layer3: InterfaceGroup::default(),
        }
    }

    pub fn with_layer2(mut self, group: InterfaceGroup) -> Self {
        self.dci_layer2 = group;
        self
    }

    pub fn with_layer3(mut self, group: InterfaceGroup) -> Self {
        self.dci_layer3 = group;
        self
    }

    pub fn dci_ports(&self, layer: DciLayer) -> Result<Vec<Port>, DomainError> {
        let group = match layer {
            DciLayer::Layer2 => &self.dci_layer2,
            DciLayer::Layer3 => &self.dci_layer3,
        };
        group.candidate_ports(&self.name, layer)
    }
}

/// An ordinary leaf device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafNode {
    pub name: String,
    pub asn: u32,
}

impl LeafNode {
    pub fn new(name: impl Into<String>, asn: u32) -> Self {
        Self {
            name: name.into(),
            asn,
        }
    }
}

/// One data center of the plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCenter {
    pub name: String,
    #[serde(default)]
    pub leaf_nodes: Vec<LeafNode>,
    #[serde(default)]
    pub border_leaf_nodes: Vec<BorderLeafNode>,
}

impl DataCenter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            leaf_nodes: Vec::new(),
            border_leaf_nodes: Vec::new(),
        }
    }

    pub fn with_leaf(mut self, leaf: LeafNode) -> Self {
        self.leaf_nodes.push(leaf);
        self
    }

    pub fn with_border_leaf(mut self, border_leaf: BorderLeafNode) -> Self {
        self.border_leaf_nodes.push(border_leaf);
        self
    }
}

/// Plant information: global policy plus every data center.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fabric {
    #[serde(default)]
    pub global_config: GlobalConfig,
    #[serde(default)]
    pub plant: Vec<DataCenter>,
}

impl Fabric {
    pub fn new(global_config: GlobalConfig) -> Self {
        Self {
            global_config,
            plant: Vec::new(),
        }
    }

    pub fn with_data_center(mut self, dc: DataCenter) -> Self {
        self.plant.push(dc);
        self
    }

    pub fn data_center(&self, name: &str) -> Option<&DataCenter> {
        self.plant.iter().find(|dc| dc.name == name)
    }
}

impl FabricModel for Fabric {
    fn global_config(&self) -> &GlobalConfig {
        &self.global_config
    }

    fn border_leaf_nodes(&self, dc_name: &str) -> Result<&[BorderLeafNode], DomainError> {
        self.data_center(dc_name)
            .map(|dc| dc.border_leaf_nodes.as_slice())
            .ok_or_else(|| DomainError::UnknownDataCenter {
                name: dc_name.to_string(),
            })
    }

    fn device_asn(&self, node_name: &str) -> Result<u32, DomainError> {
        self.plant
            .iter()
            .find_map(|dc| {
                dc.leaf_nodes
                    .iter()
                    .find(|l| l.name == node_name)
                    .map(|l| l.asn)
                    .or_else(|| {
                        dc.border_leaf_nodes
                            .iter()
                            .find(|b| b.name == node_name)
                            .map(|b| b.asn)
                    })
            })
            .ok_or_else(|| DomainError::UnknownDevice {
                name: node_name.to_string(),
            })
    }
}
