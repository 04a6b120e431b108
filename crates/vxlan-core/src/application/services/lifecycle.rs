//! Plan lifecycle around a service create.
//!
//! Every create runs inside [`with_lifecycle_tracking`]:
//!
//! 1. `ncs:init` and `ncs:ready` are appended to the `self` plan component
//! 2. `ncs:init` is marked reached
//! 3. the create body runs
//! 4. `ncs:ready` becomes reached on success, failed on a validation error
//!
//! Validation errors are absorbed (logged and recorded on the plan). Any
//! other error, a renderer failure included, aborts the create.

use tracing::{error, info, instrument};

use crate::{
    application::ports::PlanTracker,
    domain::{DomainError, Milestone},
    error::{VxlanError, VxlanResult},
};

/// Result of a tracked create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleOutcome<T> {
    /// Create body succeeded; `ncs:ready` reached.
    Ready(T),
    /// Create body failed validation; `ncs:ready` failed.
    Failed(DomainError),
}

impl<T> LifecycleOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&DomainError> {
        match self {
            Self::Ready(_) => None,
            Self::Failed(e) => Some(e),
        }
    }
}

/// Initialise the `self` plan component.
pub fn init_plan(tracker: &dyn PlanTracker) -> VxlanResult<()> {
    tracker.append_state(Milestone::Init)?;
    tracker.append_state(Milestone::Ready)?;
    tracker.set_reached(Milestone::Init)
}

/// Run `create` with plan bookkeeping and validation-error absorption.
#[instrument(skip(tracker, create))]
pub fn with_lifecycle_tracking<T, F>(
    service_id: &str,
    tracker: &dyn PlanTracker,
    create: F,
) -> VxlanResult<LifecycleOutcome<T>>
where
    F: FnOnce() -> VxlanResult<T>,
{
    info!("Service create(service={})", service_id);

    init_plan(tracker)?;

    match create() {
        Ok(value) => {
            tracker.set_reached(Milestone::Ready)?;
            Ok(LifecycleOutcome::Ready(value))
        }
        Err(VxlanError::Domain(e)) => {
            error!(error = %e, "Service validation failed");
            tracker.set_failed(Milestone::Ready)?;
            Ok(LifecycleOutcome::Failed(e))
        }
        Err(e) => Err(e),
    }
}
