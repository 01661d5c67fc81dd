use crate::{
    guard::{dashboard::DashboardDecision, decision::GuardDecision},
    session::SessionSnapshot,
};

/// Decisions that only say "not yet".
pub trait Pending {
    fn is_pending(&self) -> bool;
}

impl Pending for GuardDecision {
    fn is_pending(&self) -> bool {
        matches!(self, GuardDecision::Loading)
    }
}

impl Pending for DashboardDecision {
    fn is_pending(&self) -> bool {
        match self {
            DashboardDecision::Guard(decision) => decision.is_pending(),
            DashboardDecision::AwaitPartnerCode { .. } => true,
            DashboardDecision::ConfigurationError => false,
        }
    }
}

/// Where a guarded route is between mount and its final answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardLifecycle<D> {
    /// Rendering on a cached hint while the session is still being checked.
    Optimistic(D),
    Resolving,
    Resolved(D),
}

impl<D: Pending> GuardLifecycle<D> {
    /// Folds the latest snapshot and the decision derived from it into the lifecycle.
    pub fn advance(self, snapshot: &SessionSnapshot, decision: D) -> Self {
        if let GuardLifecycle::Resolved(_) = self {
            return self;
        }

        if decision.is_pending() {
            GuardLifecycle::Resolving
        } else if snapshot.is_settled() {
            GuardLifecycle::Resolved(decision)
        } else {
            GuardLifecycle::Optimistic(decision)
        }
    }
}
