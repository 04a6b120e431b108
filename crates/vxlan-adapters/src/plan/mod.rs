//! Plan tracker adapters.

mod memory;

pub use memory::{InMemoryPlanTracker, PlanSnapshot, PlanState, PlanTransition};
