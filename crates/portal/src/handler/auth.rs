use crate::{
    config::GuardConfig,
    di::DependenciesInject,
    domain::{
        requests::session::CreateSessionRequest,
        response::{
            api::ApiResponse,
            session::{SessionResponse, SessionStateResponse},
        },
    },
    middleware::{
        token::{
            ACCESS_TOKEN_COOKIE, PARTNER_CODE_COOKIE, cached_partner_code, portal_cookie,
            removal_cookie, stored_access_token,
        },
        validate::ValidatedJson,
    },
    session::SessionStore,
    state::AppState,
};
use axum::{
    Extension, Json,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use shared::{abstract_trait::DynAuthProvider, errors::HttpError};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{info, warn};
use utoipa_axum::router::OpenApiRouter;

pub async fn health_checker_handler() -> Result<impl IntoResponse, HttpError> {
    const MESSAGE: &str = "Education loan portal is up";

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "success",
            "message": MESSAGE
        })),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/session",
    request_body = CreateSessionRequest,
    responses(
        (status = 200, description = "Session stored", body = ApiResponse<SessionResponse>),
        (status = 400, description = "Missing access token"),
        (status = 401, description = "Invalid, expired or revoked token")
    ),
    tag = "Auth"
)]
pub async fn create_session_handler(
    Extension(auth): Extension<DynAuthProvider>,
    Extension(guard): Extension<GuardConfig>,
    jar: CookieJar,
    ValidatedJson(body): ValidatedJson<CreateSessionRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let session = auth.validate_session(&body.access_token).await?;

    info!("🔐 Session stored for user {}", session.user_id);

    let jar = jar
        .add(portal_cookie(
            ACCESS_TOKEN_COOKIE,
            body.access_token,
            guard.secure_cookies,
        ))
        .remove(removal_cookie(PARTNER_CODE_COOKIE));

    Ok((
        StatusCode::OK,
        jar,
        Json(ApiResponse::success(
            "Session stored",
            SessionResponse::from(session),
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    responses(
        (status = 200, description = "Signed out", body = ApiResponse<bool>)
    ),
    tag = "Auth"
)]
pub async fn sign_out_handler(
    Extension(deps): Extension<DependenciesInject>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HttpError> {
    let token = stored_access_token(&jar, &headers);
    let store = SessionStore::mount(&deps, token, None);

    // cookies are cleared even when revocation fails
    if let Err(e) = store.sign_out().await {
        warn!("⚠️ Session revocation failed during sign-out: {e}");
    }

    let jar = jar
        .remove(removal_cookie(ACCESS_TOKEN_COOKIE))
        .remove(removal_cookie(PARTNER_CODE_COOKIE));

    Ok((
        StatusCode::OK,
        jar,
        Json(ApiResponse::success("Signed out", true)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/auth/state",
    responses(
        (status = 200, description = "Resolved session state for the caller", body = ApiResponse<SessionStateResponse>)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Auth"
)]
pub async fn session_state_handler(
    Extension(deps): Extension<DependenciesInject>,
    Extension(guard): Extension<GuardConfig>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HttpError> {
    let store = SessionStore::mount(
        &deps,
        stored_access_token(&jar, &headers),
        cached_partner_code(&jar),
    );

    let snapshot = store.settled(Instant::now() + guard.resolve_wait).await;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Session state",
            SessionStateResponse::from(snapshot),
        )),
    ))
}

pub fn auth_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/auth/session", post(create_session_handler))
        .route("/api/auth/sign-out", post(sign_out_handler))
        .route("/api/auth/state", get(session_state_handler))
        .route("/api/healthchecker", get(health_checker_handler))
        .layer(Extension(app_state.di_container.auth.clone()))
        .layer(Extension(app_state.di_container.clone()))
        .layer(Extension(app_state.guard.clone()))
}
