use crate::{
    guard::middleware::{
        GuardContext, GuardedSession, dashboard_router, protected_route, public_route,
    },
    state::AppState,
    view::{HtmlTemplate, InterstitialTemplate, LoginTemplate, PageLink, PageTemplate},
};
use axum::{
    Extension, Router,
    extract::{Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use shared::domain::{
    ADMIN_DASHBOARD_PATH, ADMIN_LOGIN_PATH, DASHBOARD_PATH, PARTNER_DASHBOARD_PATH,
    PARTNER_LOGIN_PATH, Role, STUDENT_DASHBOARD_PATH, STUDENT_LOGIN_PATH,
};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(rename = "returnTo")]
    pub return_to: Option<String>,
}

impl LoginQuery {
    /// Only same-site paths are honoured.
    fn safe_return_to(self) -> Option<String> {
        self.return_to
            .filter(|to| to.starts_with('/') && !to.starts_with("//"))
    }
}

fn identity(session: &GuardedSession) -> Option<String> {
    session
        .0
        .authenticated_user()
        .map(|user| user.identifier.clone())
}

fn page(
    session: &GuardedSession,
    title: &str,
    message: &str,
    links: Vec<PageLink>,
) -> HtmlTemplate<PageTemplate> {
    HtmlTemplate(PageTemplate {
        title: title.to_string(),
        heading: title.to_string(),
        message: message.to_string(),
        identity: identity(session),
        links,
    })
}

pub async fn student_login(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    HtmlTemplate(LoginTemplate {
        title: "Student Login",
        audience: "student",
        return_to: query.safe_return_to(),
    })
}

pub async fn partner_login(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    HtmlTemplate(LoginTemplate {
        title: "Partner Login",
        audience: "partner",
        return_to: query.safe_return_to(),
    })
}

pub async fn admin_login(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    HtmlTemplate(LoginTemplate {
        title: "Admin Login",
        audience: "admin",
        return_to: query.safe_return_to(),
    })
}

pub async fn unauthorized() -> impl IntoResponse {
    (
        StatusCode::FORBIDDEN,
        HtmlTemplate(InterstitialTemplate::unauthorized()),
    )
}

/// Reached only when the dashboard router could not pick a home.
pub async fn dashboard_home(Extension(session): Extension<GuardedSession>) -> impl IntoResponse {
    page(
        &session,
        "Dashboard",
        "We could not open your workspace just yet. Please refresh in a moment.",
        vec![],
    )
}

pub async fn admin_dashboard(Extension(session): Extension<GuardedSession>) -> impl IntoResponse {
    page(&session, "Admin Dashboard", "Manage partners, lenders and students.", vec![])
}

pub async fn student_dashboard(
    Extension(session): Extension<GuardedSession>,
) -> impl IntoResponse {
    page(&session, "Student Dashboard", "Track your loan applications.", vec![])
}

pub async fn partner_home(
    Extension(session): Extension<GuardedSession>,
    Path(partner_code): Path<String>,
) -> impl IntoResponse {
    page(
        &session,
        &format!("Partner {partner_code}"),
        "Your leads and applications.",
        vec![PageLink::new(
            format!("/partner/{partner_code}/new-lead"),
            "New lead",
        )],
    )
}

pub async fn partner_new_lead(
    Extension(session): Extension<GuardedSession>,
    Path(partner_code): Path<String>,
) -> impl IntoResponse {
    page(
        &session,
        "New Lead",
        "Capture a new student lead.",
        vec![PageLink::new(format!("/partner/{partner_code}"), "Back")],
    )
}

pub async fn partner_lead_documents(
    Extension(session): Extension<GuardedSession>,
    Path((partner_code, lead_id)): Path<(String, String)>,
) -> impl IntoResponse {
    page(
        &session,
        &format!("Lead {lead_id} documents"),
        "Documents submitted for this lead.",
        vec![PageLink::new(format!("/partner/{partner_code}"), "Back")],
    )
}

pub fn page_routes(app_state: Arc<AppState>) -> Router {
    let guard = |required_role| GuardContext::new(app_state.clone(), required_role);

    let public_routes = Router::new()
        .route(STUDENT_LOGIN_PATH, get(student_login))
        .route(PARTNER_LOGIN_PATH, get(partner_login))
        .route(ADMIN_LOGIN_PATH, get(admin_login))
        .route("/unauthorized", get(unauthorized))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), public_route));

    let dashboard_routes = Router::new()
        .route(DASHBOARD_PATH, get(dashboard_home))
        .route(PARTNER_DASHBOARD_PATH, get(dashboard_home))
        .route_layer(middleware::from_fn_with_state(guard(None), dashboard_router));

    let admin_routes = Router::new()
        .route(ADMIN_DASHBOARD_PATH, get(admin_dashboard))
        .route_layer(middleware::from_fn_with_state(
            guard(Some(Role::Admin)),
            protected_route,
        ));

    let student_routes = Router::new()
        .route(STUDENT_DASHBOARD_PATH, get(student_dashboard))
        .route_layer(middleware::from_fn_with_state(
            guard(Some(Role::Student)),
            protected_route,
        ));

    let partner_routes = Router::new()
        .route("/partner/{partner_code}", get(partner_home))
        .route("/partner/{partner_code}/new-lead", get(partner_new_lead))
        .route(
            "/partner/{partner_code}/lead/{lead_id}/documents",
            get(partner_lead_documents),
        )
        .route_layer(middleware::from_fn_with_state(
            guard(Some(Role::Partner)),
            protected_route,
        ));

    public_routes
        .merge(dashboard_routes)
        .merge(admin_routes)
        .merge(student_routes)
        .merge(partner_routes)
}
