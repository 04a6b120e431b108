//! L2 VXLAN fan-out.
//!
//! ## VLAN assignment
//!
//! The service declares either one DCI VLAN or one per border leaf. Border
//! leaves are zipped against the VLAN list extended by repeating its last
//! element, so a single VLAN applies everywhere and a full list applies
//! index-wise:
//!
//! | Border leaves | VLANs    | Assignment           |
//! |---------------|----------|----------------------|
//! | A, B, C       | V1       | A→V1, B→V1, C→V1     |
//! | A, B          | V1, V2   | A→V1, B→V2           |
//! | A, B, C       | V1, V2   | rejected             |

use tracing::{debug, info, instrument};

use crate::domain::{
    entities::{
        FabricModel, RenderCall, RenderTarget, ServiceIntent, TemplateName, VariableBinding,
        fabric::{BorderLeafNode, Port},
        intent::Vlan,
    },
    error::{DciLayer, DomainError},
};

use super::{
    CallSink,
    bindings::{self, DCI_PORT, DCI_VLAN, DCI_VLAN_NAME, DEVICE},
};

/// Fan an L2 service out into leaf, border-leaf and DCI-port calls.
///
/// # Errors
/// - `UnknownDataCenter` if the intent's data center is not in the fabric
/// - `L2VlanCountMismatch` if the VLAN count is neither 1 nor the
///   border-leaf count
/// - `L2DciPortCount`, `AmbiguousDciPorts`, `MissingDciPorts` if a border
///   leaf does not resolve to exactly one L2 DCI port
/// - any error of the sink
#[instrument(skip_all, fields(service = %intent.service_id(), dc = %intent.dc_name()))]
pub fn render_l2<F, S>(intent: &ServiceIntent, fabric: &F, sink: &mut S) -> Result<(), S::Error>
where
    F: FabricModel + ?Sized,
    S: CallSink + ?Sized,
{
    let common_vars = bindings::l2_global(fabric.global_config());

    for leaf in intent.leaf_ports() {
        info!("Rendering L2 leaf template for {}", leaf.node_name);
        sink.emit(RenderCall::new(
            TemplateName::L2_LEAF_NODE,
            RenderTarget::LeafPort(leaf.clone()),
            common_vars.clone(),
        ))?;
    }

    let border_leaf_nodes = fabric.border_leaf_nodes(intent.dc_name())?;
    let dci_vlans = intent.dci_vlans();

    if !(dci_vlans.len() == 1 || dci_vlans.len() == border_leaf_nodes.len()) {
        return Err(DomainError::L2VlanCountMismatch {
            vlans: dci_vlans.len(),
            border_leaves: border_leaf_nodes.len(),
        }
        .into());
    }

    for (border_leaf, dci_vlan) in border_leaf_nodes
        .iter()
        .zip(carry_forward(dci_vlans, border_leaf_nodes.len()))
    {
        // Resolve the port before the first call for this border leaf.
        let dci_port = single_dci_port(border_leaf)?;
        debug!(device = %border_leaf.name, vlan = %dci_vlan, port = %dci_port, "Border leaf resolved");

        info!("Rendering L2 border-leaf template for {}", border_leaf.name);
        let border_leaf_vars = common_vars.overlay(
            &VariableBinding::new()
                .with(DEVICE, &border_leaf.name)
                .with(DCI_VLAN, dci_vlan.id)
                .with(DCI_VLAN_NAME, &dci_vlan.name),
        );
        sink.emit(RenderCall::new(
            TemplateName::L2_BORDER_LEAF_NODE,
            RenderTarget::service(intent),
            border_leaf_vars.clone(),
        ))?;

        info!("Rendering border-leaf vlan template for {}", border_leaf.name);
        let border_leaf_vlan_vars =
            border_leaf_vars.overlay(&VariableBinding::new().with(DCI_PORT, &dci_port.id));
        sink.emit(RenderCall::new(
            TemplateName::BORDER_LEAF_NODE_VLANS,
            RenderTarget::DciPort {
                device: border_leaf.name.clone(),
                port: dci_port,
            },
            border_leaf_vlan_vars,
        ))?;
    }

    Ok(())
}

/// Extend `vlans` to `len` items by repeating its last element.
///
/// An empty slice yields nothing.
fn carry_forward(vlans: &[Vlan], len: usize) -> impl Iterator<Item = &Vlan> {
    vlans
        .iter()
        .chain(vlans.last().into_iter().cycle())
        .take(len)
}

/// The one L2 DCI port of a border leaf.
fn single_dci_port(border_leaf: &BorderLeafNode) -> Result<Port, DomainError> {
    let ports = border_leaf.dci_ports(DciLayer::Layer2)?;
    let [port]: [Port; 1] = ports
        .try_into()
        .map_err(|ports: Vec<Port>| DomainError::L2DciPortCount {
            device: border_leaf.name.clone(),
            ports: ports.len(),
        })?;
    Ok(port)
}
