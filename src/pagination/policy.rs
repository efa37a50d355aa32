//! Handling for unsplittable groups that no page can hold
//!
//! The placement loop asks the policy what to do and carries out the answer, so
//! alternative strategies can be plugged in through
//! [`compose_with_policy`](super::compose_with_policy).

use std::fmt;

use super::types::FlowGroup;

/// What to do with an unsplittable group taller than the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OversizedGroupPlan {
    /// Place the group as if it were splittable
    Split,
    /// Keep the group whole on a page of its own and accept the overflow
    Overflow,
}

/// Strategy for unsplittable groups that exceed the page content height
pub trait OversizedGroupPolicy: fmt::Debug + Send + Sync {
    fn handle(&self, group: &FlowGroup, capacity: f64) -> OversizedGroupPlan;
}

/// Guaranteed placement wins over the author's "never split" preference
#[derive(Debug, Clone, Copy, Default)]
pub struct ForcedSplit;

impl OversizedGroupPolicy for ForcedSplit {
    fn handle(&self, group: &FlowGroup, capacity: f64) -> OversizedGroupPlan {
        log::debug!(
            "forcing split of unsplittable group '{}' ({:.1} > {:.1})",
            group.id,
            group.total_height(),
            capacity
        );
        OversizedGroupPlan::Split
    }
}

/// Keeps the group intact and lets the page overflow visibly
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibleOverflow;

impl OversizedGroupPolicy for VisibleOverflow {
    fn handle(&self, _group: &FlowGroup, _capacity: f64) -> OversizedGroupPlan {
        OversizedGroupPlan::Overflow
    }
}
