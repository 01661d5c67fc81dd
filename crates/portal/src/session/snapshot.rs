use serde::Serialize;
use shared::domain::{AppUser, CachedPartnerCode, Session, SessionState};
use utoipa::ToSchema;

/// Progress of the background partner-code lookup for one mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    Idle,
    InFlight,
    Done,
    Failed,
}

/// Everything a guard is allowed to look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SessionSnapshot {
    pub user: Option<Session>,
    pub app_user: Option<AppUser>,
    pub loading: bool,
    pub has_stored_session: bool,
    pub session_state: SessionState,
    /// The AppUser lookup failed; the guard must not hard-fail on it.
    pub app_user_unavailable: bool,
    pub cached_partner_code: Option<CachedPartnerCode>,
    pub partner_code_fetch: FetchStatus,
}

impl SessionSnapshot {
    /// No persisted token: nothing to validate.
    pub fn anonymous() -> Self {
        Self {
            user: None,
            app_user: None,
            loading: false,
            has_stored_session: false,
            session_state: SessionState::Expired,
            app_user_unavailable: false,
            cached_partner_code: None,
            partner_code_fetch: FetchStatus::Idle,
        }
    }

    /// A persisted token exists but has not been checked yet.
    pub fn stored() -> Self {
        Self {
            loading: true,
            has_stored_session: true,
            session_state: SessionState::Validating,
            ..Self::anonymous()
        }
    }

    pub fn with_cached_partner_code(mut self, cached: Option<CachedPartnerCode>) -> Self {
        self.cached_partner_code = cached;
        self
    }

    /// The signed-in user for authorization purposes. An expired session has none,
    /// whatever may still be held in memory.
    pub fn authenticated_user(&self) -> Option<&Session> {
        match self.session_state {
            SessionState::Expired => None,
            SessionState::Validating | SessionState::Valid => self.user.as_ref(),
        }
    }

    pub fn is_settled(&self) -> bool {
        !self.loading && self.session_state != SessionState::Validating
    }

    pub(crate) fn expire(&mut self) {
        self.session_state = self.session_state.transition(SessionState::Expired);
        self.user = None;
        self.app_user = None;
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn expired_snapshot_hides_stale_user() {
        let mut snapshot = SessionSnapshot::stored();
        snapshot.user = Some(Session {
            user_id: Uuid::new_v4(),
            identifier: "meera@example.com".into(),
            session_id: None,
            issued_at: Utc::now(),
            expires_at: Utc::now(),
        });
        assert!(snapshot.authenticated_user().is_some());

        snapshot.session_state = SessionState::Expired;
        assert!(snapshot.authenticated_user().is_none());
    }

    #[test]
    fn settled_only_after_validation_and_lookup() {
        assert!(SessionSnapshot::anonymous().is_settled());
        assert!(!SessionSnapshot::stored().is_settled());

        let mut snapshot = SessionSnapshot::stored();
        snapshot.session_state = SessionState::Valid;
        assert!(!snapshot.is_settled());

        snapshot.loading = false;
        assert!(snapshot.is_settled());
    }
}
