//! Fan-out engine: one service intent in, an ordered stream of render calls out.
//!
//! ## Emission Order
//!
//! ```text
//! leaf ports (declaration order)
//!   └── one leaf call each
//! border leaves (fabric order)
//!   ├── one border-leaf call
//!   └── one call per DCI port
//! ```
//!
//! The two variants share the binding helpers but keep their VLAN indexing
//! apart: L2 carries the last VLAN forward across border leaves ([`l2`]),
//! L3 zips VLANs one-to-one with each border leaf's DCI ports ([`l3`]).
//!
//! ## Sinks
//!
//! Calls are pushed into a [`CallSink`] as soon as they are computed. A
//! validation failure stops emission at the violating entity; calls already
//! pushed for earlier entities stay pushed. Rolling those back is the
//! caller's business.

use std::fmt;
use std::str::FromStr;

use crate::domain::{
    entities::{FabricModel, RenderCall, ServiceIntent},
    error::DomainError,
};

pub mod bindings;
pub mod l2;
pub mod l3;

pub use l2::render_l2;
pub use l3::render_l3;

/// Receiver of render calls, in emission order.
///
/// The sink's error type must absorb [`DomainError`] so the engine can
/// report validation failures through the same channel as sink failures.
pub trait CallSink {
    type Error: From<DomainError>;

    fn emit(&mut self, call: RenderCall) -> Result<(), Self::Error>;
}

/// Collecting sink: the pure form of the engine.
impl CallSink for Vec<RenderCall> {
    type Error = DomainError;

    fn emit(&mut self, call: RenderCall) -> Result<(), DomainError> {
        self.push(call);
        Ok(())
    }
}

/// Which VXLAN topology a service instance describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    L2,
    L3,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 2] = [Self::L2, Self::L3];

    /// Service point the variant is registered under.
    pub fn service_point(&self) -> &'static str {
        match self {
            Self::L2 => "vxlan-l2-servicepoint",
            Self::L3 => "vxlan-l3-servicepoint",
        }
    }

    /// Run the variant's fan-out into `sink`.
    pub fn fan_out<F, S>(self, intent: &ServiceIntent, fabric: &F, sink: &mut S) -> Result<(), S::Error>
    where
        F: FabricModel + ?Sized,
        S: CallSink + ?Sized,
    {
        match self {
            Self::L2 => render_l2(intent, fabric, sink),
            Self::L3 => render_l3(intent, fabric, sink),
        }
    }

    /// Compute the full call sequence without side effects.
    pub fn plan<F>(self, intent: &ServiceIntent, fabric: &F) -> Result<Vec<RenderCall>, DomainError>
    where
        F: FabricModel + ?Sized,
    {
        let mut calls = Vec::new();
        self.fan_out(intent, fabric, &mut calls)?;
        Ok(calls)
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::L2 => write!(f, "l2"),
            Self::L3 => write!(f, "l3"),
        }
    }
}

impl FromStr for ServiceKind {
    type Err = String;

    /// Accepts the short name (`l2`) or the service point name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.to_string() == s || k.service_point() == s)
            .ok_or_else(|| format!("unknown VXLAN service kind '{s}'"))
    }
}
