use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;
use uuid::Uuid;

/// Read-only copy of the session owned by the hosted auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub user_id: Uuid,
    /// Email address, or phone number for phone sign-ins.
    pub identifier: String,
    pub session_id: Option<String>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Validating,
    Valid,
    Expired,
}

impl SessionState {
    /// Applies `next`, refusing transitions the lifecycle does not allow.
    ///
    /// `Validating -> Valid`, `Validating -> Expired` and `Valid -> Expired`
    /// are the only legal moves; anything else leaves the state untouched.
    pub fn transition(self, next: SessionState) -> SessionState {
        match (self, next) {
            (SessionState::Validating, SessionState::Valid)
            | (SessionState::Validating, SessionState::Expired)
            | (SessionState::Valid, SessionState::Expired) => next,
            (current, next) if current == next => current,
            (current, next) => {
                warn!("Ignoring session state transition {current:?} -> {next:?}");
                current
            }
        }
    }
}
