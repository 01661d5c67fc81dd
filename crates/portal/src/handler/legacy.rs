use axum::{
    Router,
    http::Uri,
    response::{IntoResponse, Redirect},
    routing::{MethodRouter, get},
};
use shared::domain::{
    ADMIN_DASHBOARD_PATH, PARTNER_LOGIN_PATH, STUDENT_DASHBOARD_PATH, STUDENT_LOGIN_PATH,
};

/// Old paths and where they live now.
pub const LEGACY_REDIRECTS: &[(&str, &str)] = &[
    ("/admin", ADMIN_DASHBOARD_PATH),
    ("/admin/v2", ADMIN_DASHBOARD_PATH),
    ("/student", STUDENT_DASHBOARD_PATH),
    ("/login", STUDENT_LOGIN_PATH),
    ("/partner/login", PARTNER_LOGIN_PATH),
    ("/student/auth", STUDENT_LOGIN_PATH),
    ("/student/landing", STUDENT_LOGIN_PATH),
];

fn with_query(target: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{target}?{query}"),
        _ => target.to_string(),
    }
}

fn permanent(target: &'static str) -> MethodRouter {
    get(move |uri: Uri| async move {
        Redirect::permanent(&with_query(target, uri.query())).into_response()
    })
}

pub fn legacy_routes() -> Router {
    LEGACY_REDIRECTS
        .iter()
        .fold(Router::new(), |router, (from, to)| {
            router.route(from, permanent(to))
        })
}
