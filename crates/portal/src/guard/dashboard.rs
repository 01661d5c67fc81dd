use crate::{
    guard::{
        decision::{Gate, GuardDecision, GuardInput, session_gate},
        paths::{partner_home, path_only},
    },
    session::{FetchStatus, SessionSnapshot},
};
use shared::domain::{
    ADMIN_DASHBOARD_PATH, AppUser, Role, STUDENT_DASHBOARD_PATH, STUDENT_LOGIN_PATH,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardDecision {
    Guard(GuardDecision),
    /// Partner account without a partner linkage; needs an operator.
    ConfigurationError,
    /// Partner code not known yet. `start_fetch` asks the caller to begin the lookup.
    AwaitPartnerCode { start_fetch: bool },
}

#[derive(Debug, Clone, Copy)]
pub struct DashboardInput<'a> {
    pub snapshot: &'a SessionSnapshot,
    pub path_and_query: &'a str,
}

/// Decision for the generic dashboard entry point.
pub fn dashboard_router(input: &DashboardInput<'_>) -> DashboardDecision {
    let gate = session_gate(&GuardInput {
        snapshot: input.snapshot,
        required_role: None,
        path_and_query: input.path_and_query,
    });

    let app_user = match gate {
        Gate::Decided(decision) => return DashboardDecision::Guard(decision),
        Gate::Optimistic | Gate::AppUserPending => {
            return DashboardDecision::Guard(GuardDecision::RenderChildren);
        }
        Gate::Admitted(app_user) => app_user,
    };

    let Some(app_user) = app_user else {
        if input.snapshot.app_user_unavailable {
            return DashboardDecision::Guard(GuardDecision::RenderChildren);
        }
        return redirect(STUDENT_LOGIN_PATH);
    };

    let path = path_only(input.path_and_query);
    match app_user.role {
        Some(Role::Partner) => partner_destination(input.snapshot, app_user),
        Some(Role::Admin | Role::SuperAdmin) => stay_or_redirect(path, ADMIN_DASHBOARD_PATH),
        Some(Role::Student) => stay_or_redirect(path, STUDENT_DASHBOARD_PATH),
        None => redirect(STUDENT_LOGIN_PATH),
    }
}

fn partner_destination(snapshot: &SessionSnapshot, app_user: &AppUser) -> DashboardDecision {
    let Some(partner_id) = app_user.partner_id else {
        return DashboardDecision::ConfigurationError;
    };

    if let Some(code) = snapshot
        .cached_partner_code
        .as_ref()
        .and_then(|cached| cached.code_for(partner_id))
    {
        return redirect(&partner_home(code));
    }

    match snapshot.partner_code_fetch {
        FetchStatus::Idle => DashboardDecision::AwaitPartnerCode { start_fetch: true },
        FetchStatus::InFlight => DashboardDecision::AwaitPartnerCode { start_fetch: false },
        FetchStatus::Done | FetchStatus::Failed => {
            DashboardDecision::Guard(GuardDecision::RenderChildren)
        }
    }
}

fn stay_or_redirect(path: &str, target: &str) -> DashboardDecision {
    if path == target {
        DashboardDecision::Guard(GuardDecision::RenderChildren)
    } else {
        redirect(target)
    }
}

fn redirect(target: &str) -> DashboardDecision {
    DashboardDecision::Guard(GuardDecision::Redirect(target.to_string()))
}
