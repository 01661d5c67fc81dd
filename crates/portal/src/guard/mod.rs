//! Route guards: pure decisions over a [`SessionSnapshot`](crate::session::SessionSnapshot)
//! and the axum middleware that drives them.

mod dashboard;
mod decision;
mod lifecycle;
pub mod middleware;
pub mod paths;

pub use self::dashboard::{DashboardDecision, DashboardInput, dashboard_router};
pub use self::decision::{GuardDecision, GuardInput, protected_route, public_route};
pub use self::lifecycle::{GuardLifecycle, Pending};
