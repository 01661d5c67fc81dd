use crate::{guard::paths::login_redirect, session::SessionSnapshot};
use shared::domain::{AppUser, DASHBOARD_PATH, Role, SessionState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    RenderChildren,
    Loading,
    AccountInactive,
    Redirect(String),
}

#[derive(Debug, Clone, Copy)]
pub struct GuardInput<'a> {
    pub snapshot: &'a SessionSnapshot,
    pub required_role: Option<Role>,
    pub path_and_query: &'a str,
}

/// Outcome of the session checks shared by every guard.
#[derive(Debug)]
pub(crate) enum Gate<'a> {
    Decided(GuardDecision),
    /// Stored session still validating; render on the strength of it.
    Optimistic,
    /// User known, AppUser still loading.
    AppUserPending,
    Admitted(Option<&'a AppUser>),
}

pub(crate) fn session_gate<'a>(input: &GuardInput<'a>) -> Gate<'a> {
    let snapshot = input.snapshot;
    let user = snapshot.authenticated_user();
    let login = || login_redirect(input.required_role, input.path_and_query);

    if snapshot.loading && !snapshot.has_stored_session {
        return Gate::Decided(GuardDecision::Loading);
    }

    if snapshot.session_state == SessionState::Expired && user.is_none() {
        return Gate::Decided(GuardDecision::Redirect(login()));
    }

    // checked before any optimistic path: inactive accounts never see content
    if snapshot.app_user.as_ref().is_some_and(|u| !u.is_active) {
        return Gate::Decided(GuardDecision::AccountInactive);
    }

    if snapshot.session_state == SessionState::Validating && snapshot.has_stored_session {
        if input.required_role == Some(Role::Student) && user.is_none() {
            return Gate::Decided(GuardDecision::Loading);
        }
        return Gate::Optimistic;
    }

    if user.is_some() && snapshot.app_user.is_none() && snapshot.loading {
        return Gate::AppUserPending;
    }

    if user.is_none() {
        return Gate::Decided(GuardDecision::Redirect(login()));
    }

    Gate::Admitted(snapshot.app_user.as_ref())
}

/// Decision for a route guarded by an optional required role.
pub fn protected_route(input: &GuardInput<'_>) -> GuardDecision {
    let app_user = match session_gate(input) {
        Gate::Decided(decision) => return decision,
        Gate::Optimistic | Gate::AppUserPending => return GuardDecision::RenderChildren,
        Gate::Admitted(app_user) => app_user,
    };

    let Some(required) = input.required_role else {
        return GuardDecision::RenderChildren;
    };

    match app_user.and_then(|u| u.role) {
        Some(role) if role.satisfies(required) => GuardDecision::RenderChildren,
        // the dashboard router sends each role to its own home
        _ => GuardDecision::Redirect(DASHBOARD_PATH.to_string()),
    }
}

/// Routes that never consult the session.
pub fn public_route() -> GuardDecision {
    GuardDecision::RenderChildren
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::session::SessionSnapshot;
    use chrono::{Duration, Utc};
    use shared::domain::{AppUser, Role, Session, SessionState};
    use uuid::Uuid;

    pub fn session() -> Session {
        Session {
            user_id: Uuid::new_v4(),
            identifier: "priya@example.com".into(),
            session_id: None,
            issued_at: Utc::now(),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    pub fn app_user(role: Option<Role>, partner_id: Option<Uuid>, is_active: bool) -> AppUser {
        AppUser {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role,
            partner_id,
            is_active,
        }
    }

    pub fn resolved(app_user: Option<AppUser>) -> SessionSnapshot {
        SessionSnapshot {
            user: Some(session()),
            app_user,
            loading: false,
            has_stored_session: true,
            session_state: SessionState::Valid,
            ..SessionSnapshot::anonymous()
        }
    }

    pub fn signed_in(role: Role) -> SessionSnapshot {
        let partner_id = (role == Role::Partner).then(Uuid::new_v4);
        resolved(Some(app_user(Some(role), partner_id, true)))
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn decide(
        snapshot: &SessionSnapshot,
        required_role: Option<Role>,
        path: &str,
    ) -> GuardDecision {
        protected_route(&GuardInput {
            snapshot,
            required_role,
            path_and_query: path,
        })
    }

    fn all_states() -> Vec<SessionSnapshot> {
        let mut states = vec![SessionSnapshot::anonymous(), SessionSnapshot::stored()];
        for role in Role::ALL {
            states.push(signed_in(role));
        }
        let mut validating_with_user = SessionSnapshot::stored();
        validating_with_user.user = Some(session());
        states.push(validating_with_user);
        let mut app_user_loading = resolved(None);
        app_user_loading.loading = true;
        states.push(app_user_loading);
        states.push(resolved(None));
        states
    }

    #[test]
    fn loading_without_stored_session_shows_spinner() {
        let mut snapshot = SessionSnapshot::anonymous();
        snapshot.loading = true;
        snapshot.session_state = SessionState::Validating;

        assert_eq!(
            decide(&snapshot, Some(Role::Admin), "/dashboard/admin"),
            GuardDecision::Loading
        );
    }

    #[test]
    fn anonymous_admin_visit_redirects_to_partner_login() {
        assert_eq!(
            decide(&SessionSnapshot::anonymous(), Some(Role::Admin), "/dashboard/admin"),
            GuardDecision::Redirect("/login/partner?returnTo=%2Fdashboard%2Fadmin".into())
        );
    }

    #[test]
    fn expired_redirect_round_trips_path_and_search() {
        let original = "/partner/ABC123/lead/42/documents?tab=kyc&page=2";
        let GuardDecision::Redirect(target) =
            decide(&SessionSnapshot::anonymous(), Some(Role::Partner), original)
        else {
            panic!("expected redirect");
        };

        let (path, query) = target.split_once('?').unwrap();
        assert_eq!(path, "/login/partner");
        assert_eq!(crate::guard::paths::return_to(query).as_deref(), Some(original));
    }

    #[test]
    fn validating_stored_session_renders_optimistically() {
        let snapshot = SessionSnapshot::stored();
        for required in [None, Some(Role::Admin), Some(Role::SuperAdmin), Some(Role::Partner)] {
            assert_eq!(decide(&snapshot, required, "/dashboard"), GuardDecision::RenderChildren);
        }
    }

    #[test]
    fn students_wait_for_a_confirmed_identity() {
        let snapshot = SessionSnapshot::stored();
        assert_eq!(
            decide(&snapshot, Some(Role::Student), "/dashboard/student"),
            GuardDecision::Loading
        );

        let mut with_user = SessionSnapshot::stored();
        with_user.user = Some(session());
        assert_eq!(
            decide(&with_user, Some(Role::Student), "/dashboard/student"),
            GuardDecision::RenderChildren
        );
    }

    #[test]
    fn pending_app_user_renders_children() {
        let mut snapshot = resolved(None);
        snapshot.loading = true;

        assert_eq!(
            decide(&snapshot, Some(Role::Admin), "/dashboard/admin"),
            GuardDecision::RenderChildren
        );
    }

    #[test]
    fn inactive_account_never_renders_children() {
        for role in Role::ALL {
            let inactive = app_user(Some(role), None, false);
            let mut snapshots = vec![resolved(Some(inactive.clone()))];

            let mut validating = SessionSnapshot::stored();
            validating.app_user = Some(inactive.clone());
            snapshots.push(validating);

            let mut still_loading = resolved(Some(inactive.clone()));
            still_loading.loading = true;
            snapshots.push(still_loading);

            for snapshot in &snapshots {
                for required in [
                    None,
                    Some(Role::Admin),
                    Some(Role::SuperAdmin),
                    Some(Role::Partner),
                    Some(Role::Student),
                ] {
                    assert_eq!(
                        decide(snapshot, required, "/dashboard"),
                        GuardDecision::AccountInactive
                    );
                }
            }
        }
    }

    #[test]
    fn role_hierarchy_is_enforced() {
        for required in Role::ALL {
            for actual in Role::ALL {
                let decision = decide(&signed_in(actual), Some(required), "/somewhere");
                if actual.satisfies(required) {
                    assert_eq!(decision, GuardDecision::RenderChildren, "{actual} on {required}");
                } else {
                    assert_eq!(
                        decision,
                        GuardDecision::Redirect("/dashboard".into()),
                        "{actual} on {required}"
                    );
                }
            }
        }
    }

    #[test]
    fn partner_role_accepts_admins() {
        assert_eq!(
            decide(&signed_in(Role::Admin), Some(Role::Partner), "/partner/ABC123"),
            GuardDecision::RenderChildren
        );
    }

    #[test]
    fn student_on_partner_route_goes_to_dashboard() {
        assert_eq!(
            decide(&signed_in(Role::Student), Some(Role::Partner), "/partner/ABC123"),
            GuardDecision::Redirect("/dashboard".into())
        );
    }

    #[test]
    fn unrecognized_role_is_rejected_where_a_role_is_required() {
        let snapshot = resolved(Some(app_user(None, None, true)));
        assert_eq!(
            decide(&snapshot, Some(Role::Partner), "/partner/X"),
            GuardDecision::Redirect("/dashboard".into())
        );
        assert_eq!(decide(&snapshot, None, "/anything"), GuardDecision::RenderChildren);
    }

    #[test]
    fn decisions_are_idempotent() {
        for snapshot in all_states() {
            for required in [
                None,
                Some(Role::Admin),
                Some(Role::SuperAdmin),
                Some(Role::Partner),
                Some(Role::Student),
            ] {
                let first = decide(&snapshot, required, "/partner/ABC123?x=1");
                let second = decide(&snapshot, required, "/partner/ABC123?x=1");
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn public_routes_always_render() {
        assert_eq!(public_route(), GuardDecision::RenderChildren);
    }
}
