//! L3 VXLAN fan-out.
//!
//! Unlike L2 there is no carry-forward: the service's DCI VLANs form a flat
//! list zipped one-to-one with each border leaf's L3 DCI ports, so every
//! border leaf must expose exactly as many ports as the service has VLANs.
//!
//! Per-port calls bind only `DEVICE`, `DCI_PORT` and `DCI_VLAN`. Global and
//! border-leaf variables are not merged in, unlike the L2 port calls.

use tracing::{debug, info, instrument};

use crate::domain::{
    entities::{FabricModel, RenderCall, RenderTarget, ServiceIntent, TemplateName, VariableBinding},
    error::{DciLayer, DomainError},
};

use super::{
    CallSink,
    bindings::{self, DCI_PORT, DCI_VLAN, DEVICE, DEVICE_ASN},
};

/// Fan an L3 service out into leaf, border-leaf and DCI-port calls.
///
/// # Errors
/// - `UnknownDevice` if a leaf or border leaf has no ASN in the fabric
/// - `UnknownDataCenter` if the intent's data center is not in the fabric
/// - `L3DciVlanMismatch` if a border leaf's L3 DCI port count differs from
///   the VLAN count
/// - `AmbiguousDciPorts`, `MissingDciPorts` for malformed port sets
/// - any error of the sink
#[instrument(skip_all, fields(service = %intent.service_id(), dc = %intent.dc_name()))]
pub fn render_l3<F, S>(intent: &ServiceIntent, fabric: &F, sink: &mut S) -> Result<(), S::Error>
where
    F: FabricModel + ?Sized,
    S: CallSink + ?Sized,
{
    let common_vars = bindings::l3_global(fabric.global_config());

    for leaf in intent.leaf_ports() {
        info!("Rendering L3 leaf template for {}", leaf.node_name);
        let asn = fabric.device_asn(&leaf.node_name)?;
        let leaf_vars = common_vars.overlay(&VariableBinding::new().with(DEVICE_ASN, asn));
        sink.emit(RenderCall::new(
            TemplateName::L3_LEAF_NODE,
            RenderTarget::LeafPort(leaf.clone()),
            leaf_vars,
        ))?;
    }

    let dci_vlans: Vec<u16> = intent.dci_vlans().iter().map(|vlan| vlan.id).collect();

    for border_leaf in fabric.border_leaf_nodes(intent.dc_name())? {
        let asn = fabric.device_asn(&border_leaf.name)?;
        let dci_ports = border_leaf.dci_ports(DciLayer::Layer3)?;
        if dci_ports.len() != dci_vlans.len() {
            return Err(DomainError::L3DciVlanMismatch {
                device: border_leaf.name.clone(),
                ports: dci_ports.len(),
                vlans: dci_vlans.len(),
            }
            .into());
        }
        debug!(device = %border_leaf.name, asn, ports = dci_ports.len(), "Border leaf resolved");

        info!("Rendering L3 border-leaf template for {}", border_leaf.name);
        let border_leaf_vars = common_vars.overlay(
            &VariableBinding::new()
                .with(DEVICE, &border_leaf.name)
                .with(DEVICE_ASN, asn),
        );
        sink.emit(RenderCall::new(
            TemplateName::L3_BORDER_LEAF_NODE,
            RenderTarget::service(intent),
            border_leaf_vars,
        ))?;

        info!("Rendering border-leaf vlan template for {}", border_leaf.name);
        for (dci_port, dci_vlan) in dci_ports.into_iter().zip(&dci_vlans) {
            let border_leaf_vlan_vars = VariableBinding::new()
                .with(DEVICE, &border_leaf.name)
                .with(DCI_PORT, &dci_port.id)
                .with(DCI_VLAN, dci_vlan);
            sink.emit(RenderCall::new(
                TemplateName::BORDER_LEAF_NODE_VLANS,
                RenderTarget::DciPort {
                    device: border_leaf.name.clone(),
                    port: dci_port,
                },
                border_leaf_vlan_vars,
            ))?;
        }
    }

    Ok(())
}
