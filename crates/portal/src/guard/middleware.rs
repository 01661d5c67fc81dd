use crate::{
    guard::{
        DashboardDecision, DashboardInput, GuardDecision, GuardInput, GuardLifecycle, Pending,
        dashboard_router as decide_dashboard, protected_route as decide_protected,
        public_route as decide_public,
    },
    middleware::token::{
        PARTNER_CODE_COOKIE, cached_partner_code, portal_cookie, stored_access_token,
    },
    session::{SessionSnapshot, SessionStore},
    state::AppState,
    view::{HtmlTemplate, InterstitialTemplate, LoadingTemplate},
};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    domain::{CachedPartnerCode, Role},
    utils::{GuardKind, GuardMode, GuardOutcome},
};
use std::{sync::Arc, time::Duration};
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info};

/// Per-route guard configuration handed to the middleware as state.
#[derive(Clone)]
pub struct GuardContext {
    pub state: Arc<AppState>,
    pub required_role: Option<Role>,
}

impl GuardContext {
    pub fn new(state: Arc<AppState>, required_role: Option<Role>) -> Self {
        Self {
            state,
            required_role,
        }
    }
}

/// The snapshot a guard admitted the request on, for the page handler.
#[derive(Debug, Clone)]
pub struct GuardedSession(pub SessionSnapshot);

struct Mount {
    store: SessionStore,
    jar: CookieJar,
    remembered: Option<CachedPartnerCode>,
    path_and_query: String,
}

impl Mount {
    fn new(state: &AppState, jar: CookieJar, req: &Request) -> Self {
        let token = stored_access_token(&jar, req.headers());
        let remembered = cached_partner_code(&jar);
        let path_and_query = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| req.uri().path().to_string());

        let store = SessionStore::mount(&state.di_container, token, remembered.clone());

        Self {
            store,
            jar,
            remembered,
            path_and_query,
        }
    }

    /// Cookie jar carrying the partner code if this mount learned a new one.
    fn cookies(&self, secure: bool) -> CookieJar {
        match self.store.get_cached_partner_code() {
            Some(cached) if Some(&cached) != self.remembered.as_ref() => self.jar.clone().add(
                portal_cookie(PARTNER_CODE_COOKIE, cached.to_cookie_value(), secure),
            ),
            _ => self.jar.clone(),
        }
    }

    async fn respond(
        self,
        decision: GuardDecision,
        secure: bool,
        mut req: Request,
        next: Next,
    ) -> Response {
        let jar = self.cookies(secure);

        match decision {
            GuardDecision::RenderChildren => {
                req.extensions_mut()
                    .insert(GuardedSession(self.store.snapshot()));
                let response = next.run(req).await;
                (jar, response).into_response()
            }
            GuardDecision::Loading => loading(jar, LoadingTemplate::session()),
            GuardDecision::AccountInactive => (
                StatusCode::FORBIDDEN,
                jar,
                HtmlTemplate(InterstitialTemplate::account_inactive()),
            )
                .into_response(),
            GuardDecision::Redirect(to) => (jar, Redirect::to(&to)).into_response(),
        }
    }
}

fn loading(jar: CookieJar, page: LoadingTemplate) -> Response {
    (StatusCode::OK, jar, [("refresh", "1")], HtmlTemplate(page)).into_response()
}

/// Drives the lifecycle until it resolves or `wait` elapses.
///
/// On timeout an optimistic decision stands; anything else falls back to the
/// last decision computed.
async fn settle<D, F>(store: &SessionStore, wait: Duration, mut decide: F) -> (D, GuardMode)
where
    D: Pending + Clone,
    F: FnMut(&SessionSnapshot) -> D,
{
    let deadline = Instant::now() + wait;
    let mut rx = store.subscribe();
    let mut lifecycle = GuardLifecycle::Resolving;

    loop {
        let snapshot = rx.borrow_and_update().clone();
        let decision = decide(&snapshot);
        lifecycle = lifecycle.advance(&snapshot, decision.clone());

        if let GuardLifecycle::Resolved(resolved) = &lifecycle {
            return (resolved.clone(), GuardMode::Resolved);
        }

        if !matches!(timeout_at(deadline, rx.changed()).await, Ok(Ok(()))) {
            return match lifecycle {
                GuardLifecycle::Optimistic(optimistic) => (optimistic, GuardMode::Optimistic),
                _ => (decision, GuardMode::TimedOut),
            };
        }
    }
}

fn outcome(decision: &GuardDecision) -> GuardOutcome {
    match decision {
        GuardDecision::RenderChildren => GuardOutcome::Children,
        GuardDecision::Loading => GuardOutcome::Loading,
        GuardDecision::AccountInactive => GuardOutcome::Inactive,
        GuardDecision::Redirect(_) => GuardOutcome::Redirect,
    }
}

/// Admits the request only for a signed-in, active user holding the route's role.
pub async fn protected_route(
    State(ctx): State<GuardContext>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let state = &ctx.state;
    let mount = Mount::new(state, jar, &req);

    let (decision, mode) = settle(&mount.store, state.guard.resolve_wait, |snapshot| {
        decide_protected(&GuardInput {
            snapshot,
            required_role: ctx.required_role,
            path_and_query: &mount.path_and_query,
        })
    })
    .await;

    debug!(
        "Guard for {} ({:?}) decided {:?} [{:?}]",
        mount.path_and_query, ctx.required_role, decision, mode
    );
    state
        .guard_metrics
        .record(GuardKind::Protected, outcome(&decision), mode);

    mount
        .respond(decision, state.guard.secure_cookies, req, next)
        .await
}

/// Sends each signed-in user to the home that matches their role.
pub async fn dashboard_router(
    State(ctx): State<GuardContext>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let state = &ctx.state;
    let mount = Mount::new(state, jar, &req);

    let (decision, mode) = settle(&mount.store, state.guard.resolve_wait, |snapshot| {
        let decision = decide_dashboard(&DashboardInput {
            snapshot,
            path_and_query: &mount.path_and_query,
        });

        if let DashboardDecision::AwaitPartnerCode { start_fetch: true } = decision
            && let Some(partner_id) = snapshot.app_user.as_ref().and_then(|u| u.partner_id)
            && mount.store.request_partner_code(partner_id)
        {
            info!("🔎 Looking up partner code for {partner_id}");
        }

        decision
    })
    .await;

    debug!(
        "Dashboard router for {} decided {:?} [{:?}]",
        mount.path_and_query, decision, mode
    );

    let secure = state.guard.secure_cookies;
    match decision {
        DashboardDecision::Guard(decision) => {
            state
                .guard_metrics
                .record(GuardKind::Dashboard, outcome(&decision), mode);
            mount.respond(decision, secure, req, next).await
        }
        DashboardDecision::ConfigurationError => {
            state.guard_metrics.record(
                GuardKind::Dashboard,
                GuardOutcome::ConfigurationError,
                mode,
            );
            (
                StatusCode::CONFLICT,
                mount.cookies(secure),
                HtmlTemplate(InterstitialTemplate::configuration_error()),
            )
                .into_response()
        }
        DashboardDecision::AwaitPartnerCode { .. } => {
            state
                .guard_metrics
                .record(GuardKind::Dashboard, GuardOutcome::Loading, mode);
            loading(mount.cookies(secure), LoadingTemplate::partner_workspace())
        }
    }
}

/// Login and error pages: always rendered, whatever the session holds.
pub async fn public_route(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let decision = decide_public();
    state
        .guard_metrics
        .record(GuardKind::Public, outcome(&decision), GuardMode::Resolved);

    next.run(req).await
}
