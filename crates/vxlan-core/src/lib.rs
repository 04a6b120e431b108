//! Expands one tenant VXLAN service intent into the ordered list of
//! device-configuration template applications across a data center's leaf
//! and border-leaf switches.
//!
//! Layers, innermost first:
//!
//! - [`domain`]: intent and fabric entities, validation and the L2/L3
//!   fan-out. Pure, no I/O.
//! - [`application`]: the ports (`TemplateRenderer`, `TemplateStore`,
//!   `ConfigSink`, `PlanTracker`), the plan lifecycle wrapper and the
//!   service-point registry.
//! - [`error`]: [`error::VxlanError`], returned by everything above the domain.
//!
//! Adapters for the ports live in `vxlan-adapters`; `vxlan-cli` wires them.
//!
//! ```rust,no_run
//! use vxlan_core::domain::{Fabric, GlobalConfig, ServiceIntent, ServiceKind};
//!
//! let fabric = Fabric::new(GlobalConfig::default());
//! let intent = ServiceIntent::builder()
//!     .service_id("tenant-a")
//!     .dc_name("dc1")
//!     .build()
//!     .unwrap();
//!
//! for call in ServiceKind::L2.plan(&intent, &fabric).unwrap() {
//!     println!("{call}");
//! }
//! ```

pub mod application;
pub mod domain;
pub mod error;
