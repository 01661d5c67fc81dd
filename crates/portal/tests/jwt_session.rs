//! Guards driven by real signed access tokens instead of a fake provider.

mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::{Duration as ChronoDuration, Utc};
use common::*;
use jsonwebtoken::{EncodingKey, Header, encode};
use portal::{config::GuardConfig, di::DependenciesInject, handler::AppRouter, state::AppState};
use shared::{
    abstract_trait::{AppUserDirectoryTrait, DynSessionRevocation, SessionRevocationTrait},
    config::{AccessTokenClaims, DEFAULT_AUDIENCE, JwtConfig},
    domain::{AppUser, Role, Session},
    errors::ServiceError,
    service::JwtAuthProvider,
};
use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};
use uuid::Uuid;

const SECRET: &str = "portal-test-secret";

#[derive(Default)]
struct MemoryRevocations(Mutex<HashSet<Option<String>>>);

#[async_trait]
impl SessionRevocationTrait for MemoryRevocations {
    async fn revoke(&self, session: &Session) -> Result<(), ServiceError> {
        self.0.lock().unwrap().insert(session.session_id.clone());
        Ok(())
    }

    async fn is_revoked(&self, session: &Session) -> Result<bool, ServiceError> {
        Ok(self.0.lock().unwrap().contains(&session.session_id))
    }
}

struct SingleAdmin(Uuid);

#[async_trait]
impl AppUserDirectoryTrait for SingleAdmin {
    async fn find_app_user(&self, user_id: Uuid) -> Result<Option<AppUser>, ServiceError> {
        Ok((user_id == self.0).then(|| AppUser {
            id: Uuid::new_v4(),
            user_id,
            role: Some(Role::Admin),
            partner_id: None,
            is_active: true,
        }))
    }

    async fn find_partner_code(&self, _: Uuid) -> Result<Option<String>, ServiceError> {
        Ok(None)
    }
}

fn token(user_id: Uuid, expires_in: ChronoDuration) -> String {
    let now = Utc::now();
    let claims = AccessTokenClaims {
        sub: user_id.to_string(),
        aud: DEFAULT_AUDIENCE.to_string(),
        exp: (now + expires_in).timestamp(),
        iat: now.timestamp(),
        email: Some("ops@example.com".into()),
        phone: None,
        session_id: Some(Uuid::new_v4().to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn app(admin: Uuid) -> axum::Router {
    let revocations: DynSessionRevocation = Arc::new(MemoryRevocations::default());
    let auth = Arc::new(JwtAuthProvider::new(JwtConfig::new(SECRET), revocations));
    let deps = DependenciesInject::from_services(auth, Arc::new(SingleAdmin(admin)));

    let guard = GuardConfig {
        secure_cookies: false,
        ..GuardConfig::default()
    };
    AppRouter::build(Arc::new(AppState::from_parts(deps, guard)))
}

#[tokio::test]
async fn signed_admin_token_opens_admin_dashboard() {
    let admin = Uuid::new_v4();
    let app = app(admin);
    let token = token(admin, ChronoDuration::hours(1));

    let response = send(&app, get("/dashboard/admin", &format!("access_token={token}"))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("ops@example.com"));
}

#[tokio::test]
async fn expired_token_is_sent_to_login() {
    let admin = Uuid::new_v4();
    let app = app(admin);
    let token = token(admin, ChronoDuration::hours(-1));

    let response = send(&app, get("/dashboard/admin", &format!("access_token={token}"))).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/login/partner?returnTo=%2Fdashboard%2Fadmin"
    );
}

#[tokio::test]
async fn signed_out_token_stops_working() {
    let admin = Uuid::new_v4();
    let app = app(admin);
    let token = token(admin, ChronoDuration::hours(1));
    let cookie = format!("access_token={token}");

    let mut sign_out = get("/api/auth/sign-out", &cookie);
    *sign_out.method_mut() = axum::http::Method::POST;
    assert_eq!(send(&app, sign_out).await.status(), StatusCode::OK);

    let response = send(&app, get("/dashboard/admin", &cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}
