#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, Response, header},
};
use chrono::{Duration as ChronoDuration, Utc};
use portal::{config::GuardConfig, di::DependenciesInject, handler::AppRouter, state::AppState};
use shared::{
    abstract_trait::{AppUserDirectoryTrait, AuthProviderTrait},
    domain::{AppUser, Role, Session},
    errors::ServiceError,
};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tower::ServiceExt;
use uuid::Uuid;

/// Tokens known to the fake auth service.
#[derive(Default)]
pub struct FakeAuth {
    sessions: HashMap<String, Session>,
    pub revoked: Mutex<Vec<String>>,
    delay: Duration,
}

#[async_trait]
impl AuthProviderTrait for FakeAuth {
    async fn validate_session(&self, access_token: &str) -> Result<Session, ServiceError> {
        tokio::time::sleep(self.delay).await;
        if self.revoked.lock().unwrap().iter().any(|t| t == access_token) {
            return Err(ServiceError::SessionRevoked);
        }
        self.sessions
            .get(access_token)
            .cloned()
            .ok_or(ServiceError::TokenExpired)
    }

    async fn revoke_session(&self, access_token: &str) -> Result<(), ServiceError> {
        self.revoked.lock().unwrap().push(access_token.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeDirectory {
    app_users: HashMap<Uuid, AppUser>,
    partner_codes: HashMap<Uuid, String>,
    pub code_lookups: AtomicUsize,
    code_delay: Duration,
}

#[async_trait]
impl AppUserDirectoryTrait for FakeDirectory {
    async fn find_app_user(&self, user_id: Uuid) -> Result<Option<AppUser>, ServiceError> {
        Ok(self.app_users.get(&user_id).cloned())
    }

    async fn find_partner_code(&self, partner_id: Uuid) -> Result<Option<String>, ServiceError> {
        self.code_lookups.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.code_delay).await;
        Ok(self.partner_codes.get(&partner_id).cloned())
    }
}

/// Builds a portal with a handful of signed-in users.
#[derive(Default)]
pub struct Portal {
    auth: FakeAuth,
    directory: FakeDirectory,
    resolve_wait: Option<Duration>,
}

impl Portal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `token` for a user with `role`.
    pub fn user(
        mut self,
        token: &str,
        role: Option<Role>,
        partner_id: Option<Uuid>,
        is_active: bool,
    ) -> Self {
        let user_id = Uuid::new_v4();
        self.auth.sessions.insert(
            token.to_string(),
            Session {
                user_id,
                identifier: format!("{token}@example.com"),
                session_id: Some(format!("session-{token}")),
                issued_at: Utc::now(),
                expires_at: Utc::now() + ChronoDuration::hours(1),
            },
        );
        self.directory.app_users.insert(
            user_id,
            AppUser {
                id: Uuid::new_v4(),
                user_id,
                role,
                partner_id,
                is_active,
            },
        );
        self
    }

    pub fn partner_code(mut self, partner_id: Uuid, code: &str) -> Self {
        self.directory
            .partner_codes
            .insert(partner_id, code.to_string());
        self
    }

    /// Every session check takes `delay` before answering.
    pub fn slow_auth(mut self, delay: Duration) -> Self {
        self.auth.delay = delay;
        self
    }

    pub fn slow_partner_lookup(mut self, delay: Duration) -> Self {
        self.directory.code_delay = delay;
        self
    }

    /// How long a guard waits for the session to settle. Defaults to two seconds.
    pub fn resolve_wait(mut self, wait: Duration) -> Self {
        self.resolve_wait = Some(wait);
        self
    }

    pub fn build(self) -> (Router, Arc<FakeAuth>, Arc<FakeDirectory>) {
        let auth = Arc::new(self.auth);
        let directory = Arc::new(self.directory);

        let deps = DependenciesInject::from_services(auth.clone(), directory.clone());
        let guard = GuardConfig {
            resolve_wait: self.resolve_wait.unwrap_or(Duration::from_secs(2)),
            partner_code_ttl: Duration::from_secs(60),
            secure_cookies: false,
        };
        let state = AppState::from_parts(deps, guard);

        (AppRouter::build(Arc::new(state)), auth, directory)
    }
}

pub fn get(uri: &str, cookies: &str) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if !cookies.is_empty() {
        builder = builder.header(header::COOKIE, cookies);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_owned)
        .collect()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
