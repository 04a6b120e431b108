// ============================================================================
// domain/error.rs - VALIDATION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant is a validation failure of the service intent against the
/// fabric. The lifecycle wrapper absorbs these into a failed `ncs:ready`
/// milestone; they never escape as unhandled faults.
///
/// All errors are:
/// - Cloneable (the wrapper hands the error back in its outcome)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Cardinality Errors
    // ========================================================================
    #[error(
        "Number of L2 DCI VLANs must be 1 or match the number of border-leaf nodes \
         (got {vlans} VLANs for {border_leaves} border-leaf nodes)"
    )]
    L2VlanCountMismatch { vlans: usize, border_leaves: usize },

    #[error("Each border-leaf can only have one L2 DCI port ('{device}' has {ports})")]
    L2DciPortCount { device: String, ports: usize },

    #[error(
        "Number of DCI VLANs must match number of L3 DCI ports \
         ('{device}' has {ports} ports, service declares {vlans} VLANs)"
    )]
    L3DciVlanMismatch {
        device: String,
        ports: usize,
        vlans: usize,
    },

    // ========================================================================
    // Malformed Port Sets
    // ========================================================================
    #[error("border-leaf '{device}' has both Port-channel and Ethernet {layer} DCI ports")]
    AmbiguousDciPorts { device: String, layer: DciLayer },

    #[error("border-leaf '{device}' has no {layer} DCI ports")]
    MissingDciPorts { device: String, layer: DciLayer },

    // ========================================================================
    // Unresolvable References
    // ========================================================================
    #[error("Unknown data center: '{name}'")]
    UnknownDataCenter { name: String },

    #[error("Unknown device: '{name}'")]
    UnknownDevice { name: String },

    // ========================================================================
    // Malformed Intent
    // ========================================================================
    #[error("Invalid service intent: {0}")]
    InvalidIntent(String),

    #[error("VLAN id {id} out of range (1-4094)")]
    InvalidVlanId { id: u16 },

    #[error("Duplicate leaf node '{node_name}' in service intent")]
    DuplicateLeafNode { node_name: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

/// Which DCI interface group a port-set error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DciLayer {
    Layer2,
    Layer3,
}

impl std::fmt::Display for DciLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Layer2 => write!(f, "L2"),
            Self::Layer3 => write!(f, "L3"),
        }
    }
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::L2VlanCountMismatch {
                vlans,
                border_leaves,
            } => vec![
                format!(
                    "Declare either 1 DCI VLAN or exactly {} (one per border leaf)",
                    border_leaves
                ),
                format!("The service currently declares {}", vlans),
            ],
            Self::L2DciPortCount { device, .. } => vec![
                format!("Configure exactly one dci-layer2 port on '{}'", device),
                "Use a Port-channel if more than one physical link is needed".into(),
            ],
            Self::L3DciVlanMismatch {
                device,
                ports,
                vlans,
            } => vec![
                format!(
                    "'{}' needs one DCI VLAN per dci-layer3 port ({} ports, {} VLANs)",
                    device, ports, vlans
                ),
                "Add or remove DCI VLANs in the service, or adjust the fabric".into(),
            ],
            Self::AmbiguousDciPorts { device, layer } => vec![
                format!(
                    "Remove either the Port-channel or the Ethernet {} DCI ports on '{}'",
                    layer, device
                ),
            ],
            Self::MissingDciPorts { device, layer } => {
                vec![format!("Configure {} DCI ports on '{}'", layer, device)]
            }
            Self::UnknownDataCenter { name } => vec![
                format!("No data center named '{}' exists in the fabric", name),
                "Check the service dc-name against the plant information".into(),
            ],
            Self::UnknownDevice { name } => vec![
                format!("Device '{}' is not a leaf or border-leaf of any data center", name),
                "Add the device to the fabric or fix the node name".into(),
            ],
            Self::InvalidVlanId { .. } => vec!["VLAN ids must be between 1 and 4094".into()],
            _ => vec!["Check the service intent and fabric definitions".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownDataCenter { .. } | Self::UnknownDevice { .. } => {
                ErrorCategory::NotFound
            }
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
