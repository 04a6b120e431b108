//! Variable names and scope builders shared by the L2 and L3 fan-outs.

use crate::domain::entities::{VariableBinding, fabric::GlobalConfig};

pub const NVE_SOURCE: &str = "NVE_SOURCE";
pub const PREFIX_TAG: &str = "PREFIX-TAG";
pub const REDIST_STATIC: &str = "REDIST-STATIC";
pub const REDIST_CONNECTED: &str = "REDIST-CONNECTED";
pub const DEVICE: &str = "DEVICE";
pub const DEVICE_ASN: &str = "DEVICE-ASN";
pub const DCI_VLAN: &str = "DCI_VLAN";
pub const DCI_VLAN_NAME: &str = "DCI_VLAN_NAME";
pub const DCI_PORT: &str = "DCI_PORT";

/// Unset upstream values render as the empty string.
pub fn value_or_empty(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}

/// Global scope for L2 services.
pub fn l2_global(config: &GlobalConfig) -> VariableBinding {
    VariableBinding::new().with(
        NVE_SOURCE,
        value_or_empty(config.nve_source_interface.as_ref()),
    )
}

/// Global scope for L3 services: the L2 scope plus tenant policy.
pub fn l3_global(config: &GlobalConfig) -> VariableBinding {
    l2_global(config)
        .with(
            PREFIX_TAG,
            value_or_empty(config.tenant_prefix_tag.as_ref()),
        )
        .with(
            REDIST_STATIC,
            value_or_empty(config.tenant_route_maps.bgp_redistribute_static.as_ref()),
        )
        .with(
            REDIST_CONNECTED,
            value_or_empty(
                config
                    .tenant_route_maps
                    .bgp_redistribute_connected
                    .as_ref(),
            ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::fabric::TenantRouteMaps;

    #[test]
    fn unset_values_are_empty_strings() {
        let g = l3_global(&GlobalConfig::default());
        assert_eq!(g.len(), 4);
        assert!(g.iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn l3_global_carries_policy() {
        let cfg = GlobalConfig {
            nve_source_interface: Some("loopback1".into()),
            tenant_prefix_tag: Some("12345".into()),
            tenant_route_maps: TenantRouteMaps {
                bgp_redistribute_static: Some("RM-STATIC".into()),
                bgp_redistribute_connected: None,
            },
        };
        let g = l3_global(&cfg);
        assert_eq!(g.get(NVE_SOURCE), Some("loopback1"));
        assert_eq!(g.get(PREFIX_TAG), Some("12345"));
        assert_eq!(g.get(REDIST_STATIC), Some("RM-STATIC"));
        assert_eq!(g.get(REDIST_CONNECTED), Some(""));
    }
}
