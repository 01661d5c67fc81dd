use crate::session::SessionSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::domain::{Role, Session, SessionState};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub identifier: String,
    pub expires_at: DateTime<Utc>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            user_id: session.user_id,
            identifier: session.identifier,
            expires_at: session.expires_at,
        }
    }
}

/// What the portal currently knows about the caller.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SessionStateResponse {
    pub state: SessionState,
    pub user: Option<SessionResponse>,
    pub role: Option<Role>,
    pub partner_id: Option<Uuid>,
    pub is_active: Option<bool>,
    pub partner_code: Option<String>,
}

impl From<SessionSnapshot> for SessionStateResponse {
    fn from(snapshot: SessionSnapshot) -> Self {
        let app_user = snapshot.app_user.as_ref();
        let partner_id = app_user.and_then(|u| u.partner_id);
        let partner_code = partner_id.and_then(|id| {
            snapshot
                .cached_partner_code
                .as_ref()
                .and_then(|cached| cached.code_for(id))
                .map(str::to_owned)
        });

        Self {
            state: snapshot.session_state,
            role: app_user.and_then(|u| u.role),
            is_active: app_user.map(|u| u.is_active),
            partner_id,
            partner_code,
            user: snapshot.authenticated_user().cloned().map(SessionResponse::from),
        }
    }
}
