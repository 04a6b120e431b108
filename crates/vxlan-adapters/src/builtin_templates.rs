//! Built-in device-configuration templates.
//!
//! One template ships for every name the fan-out engine emits. Placeholders
//! use `{{NAME}}` and resolve against the call's bindings overlaid on the
//! anchor's context variables (see [`crate::renderer::SimpleRenderer`]).
//!
//! `border_leaf_node_vlans` is shared by both variants, so it only reads the
//! variables the L3 per-port call binds: `DEVICE`, `DCI_PORT`, `DCI_VLAN`.
//!
//! The L3 templates never define route-maps. Their names may be empty, so
//! the definitions are left to the operator's own templates.

use vxlan_core::domain::TemplateName;

pub const L2_LEAF_NODE: &str = "\
! L2 VXLAN leaf {{NODE_NAME}}
interface nve1
  no shutdown
  host-reachability protocol bgp
  source-interface {{NVE_SOURCE}}
";

pub const L2_BORDER_LEAF_NODE: &str = "\
! L2 VXLAN border leaf {{DEVICE}} for {{SERVICE_ID}} in {{DC_NAME}}
vlan {{DCI_VLAN}}
  name {{DCI_VLAN_NAME}}
interface nve1
  no shutdown
  source-interface {{NVE_SOURCE}}
";

pub const L3_LEAF_NODE: &str = "\
! L3 VXLAN leaf {{NODE_NAME}}
! prefix tag [{{PREFIX-TAG}}]
router bgp {{DEVICE-ASN}}
  address-family ipv4 unicast
    redistribute static route-map {{REDIST-STATIC}}
    redistribute direct route-map {{REDIST-CONNECTED}}
";

pub const L3_BORDER_LEAF_NODE: &str = "\
! L3 VXLAN border leaf {{DEVICE}} for {{SERVICE_ID}} in {{DC_NAME}}
! prefix tag [{{PREFIX-TAG}}]
router bgp {{DEVICE-ASN}}
  address-family ipv4 unicast
    redistribute static route-map {{REDIST-STATIC}}
    redistribute direct route-map {{REDIST-CONNECTED}}
";

pub const BORDER_LEAF_NODE_VLANS: &str = "\
! DCI port {{PORT_KIND}}{{DCI_PORT}} on {{DEVICE}}
interface {{PORT_KIND}}{{DCI_PORT}}
  switchport mode trunk
  switchport trunk allowed vlan add {{DCI_VLAN}}
";

/// Every built-in template, keyed by name.
pub fn all_templates() -> Vec<(TemplateName, &'static str)> {
    vec![
        (TemplateName::L2_LEAF_NODE.into(), L2_LEAF_NODE),
        (TemplateName::L2_BORDER_LEAF_NODE.into(), L2_BORDER_LEAF_NODE),
        (TemplateName::L3_LEAF_NODE.into(), L3_LEAF_NODE),
        (TemplateName::L3_BORDER_LEAF_NODE.into(), L3_BORDER_LEAF_NODE),
        (TemplateName::BORDER_LEAF_NODE_VLANS.into(), BORDER_LEAF_NODE_VLANS),
    ]
}
