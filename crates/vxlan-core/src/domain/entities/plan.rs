//! Plan component model: per-service progress milestones.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A plan state the lifecycle wrapper drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Milestone {
    Init,
    Ready,
}

impl Milestone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "ncs:init",
            Self::Ready => "ncs:ready",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of one milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MilestoneStatus {
    NotReached,
    Reached,
    Failed,
}

impl fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReached => write!(f, "not-reached"),
            Self::Reached => write!(f, "reached"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Identity of the plan component the wrapper initialises.
pub const SELF_COMPONENT: &str = "self";
pub const SELF_COMPONENT_TYPE: &str = "ncs:self";
