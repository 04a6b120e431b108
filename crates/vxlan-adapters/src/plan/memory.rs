//! In-memory plan tracker.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use vxlan_core::{
    application::{ApplicationError, ports::PlanTracker},
    domain::{Milestone, MilestoneStatus, SELF_COMPONENT, SELF_COMPONENT_TYPE},
    error::{VxlanError, VxlanResult},
};

/// Current status of one milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanState {
    pub milestone: Milestone,
    pub status: MilestoneStatus,
    pub updated_at: DateTime<Utc>,
}

/// One recorded status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanTransition {
    pub milestone: Milestone,
    pub status: MilestoneStatus,
    pub at: DateTime<Utc>,
}

/// Serializable view of the `self` plan component.
#[derive(Debug, Clone, Serialize)]
pub struct PlanSnapshot {
    pub plan_id: Uuid,
    pub component: &'static str,
    pub component_type: &'static str,
    pub states: Vec<PlanState>,
}

#[derive(Debug, Default)]
struct PlanInner {
    states: Vec<PlanState>,
    history: Vec<PlanTransition>,
}

/// Plan tracker for a single service instance. Clones share state.
#[derive(Debug, Clone)]
pub struct InMemoryPlanTracker {
    plan_id: Uuid,
    inner: Arc<RwLock<PlanInner>>,
}

impl InMemoryPlanTracker {
    pub fn new() -> Self {
        Self {
            plan_id: Uuid::new_v4(),
            inner: Arc::new(RwLock::new(PlanInner::default())),
        }
    }

    pub fn plan_id(&self) -> Uuid {
        self.plan_id
    }

    /// `None` when the milestone was never appended.
    pub fn status(&self, milestone: Milestone) -> VxlanResult<Option<MilestoneStatus>> {
        Ok(self
            .read()?
            .states
            .iter()
            .find(|s| s.milestone == milestone)
            .map(|s| s.status))
    }

    /// Every status change, oldest first.
    pub fn history(&self) -> VxlanResult<Vec<PlanTransition>> {
        Ok(self.read()?.history.clone())
    }

    pub fn snapshot(&self) -> VxlanResult<PlanSnapshot> {
        Ok(PlanSnapshot {
            plan_id: self.plan_id,
            component: SELF_COMPONENT,
            component_type: SELF_COMPONENT_TYPE,
            states: self.read()?.states.clone(),
        })
    }

    fn read(&self) -> VxlanResult<RwLockReadGuard<'_, PlanInner>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned { resource: "plan" })?)
    }

    fn write(&self) -> VxlanResult<RwLockWriteGuard<'_, PlanInner>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned { resource: "plan" })?)
    }

    fn transition(&self, milestone: Milestone, status: MilestoneStatus) -> VxlanResult<()> {
        let mut inner = self.write()?;
        let at = Utc::now();

        let state = inner
            .states
            .iter_mut()
            .find(|s| s.milestone == milestone)
            .ok_or_else(|| VxlanError::Internal {
                message: format!("milestone {milestone} was never appended to the plan"),
            })?;
        state.status = status;
        state.updated_at = at;

        inner.history.push(PlanTransition {
            milestone,
            status,
            at,
        });
        debug!(plan = %self.plan_id, %milestone, %status, "Plan state updated");
        Ok(())
    }
}

impl Default for InMemoryPlanTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanTracker for InMemoryPlanTracker {
    /// Appending an existing milestone resets it to not-reached.
    fn append_state(&self, milestone: Milestone) -> VxlanResult<()> {
        {
            let mut inner = self.write()?;
            if !inner.states.iter().any(|s| s.milestone == milestone) {
                inner.states.push(PlanState {
                    milestone,
                    status: MilestoneStatus::NotReached,
                    updated_at: Utc::now(),
                });
            }
        }
        self.transition(milestone, MilestoneStatus::NotReached)
    }

    fn set_reached(&self, milestone: Milestone) -> VxlanResult<()> {
        self.transition(milestone, MilestoneStatus::Reached)
    }

    fn set_failed(&self, milestone: Milestone) -> VxlanResult<()> {
        self.transition(milestone, MilestoneStatus::Failed)
    }
}
