use crate::{
    di::DependenciesInject,
    session::{FetchStatus, SessionSnapshot},
};
use shared::{
    domain::{CachedPartnerCode, SessionState},
    errors::ServiceError,
};
use std::sync::{Arc, Weak};
use tokio::{sync::watch, time::Instant};
use tracing::{debug, error, warn};
use uuid::Uuid;

struct StoreInner {
    tx: watch::Sender<SessionSnapshot>,
    deps: DependenciesInject,
    access_token: Option<String>,
}

/// Session state for one mount of a guarded route.
///
/// Background work started by the store only holds a weak reference to it:
/// once the store is dropped, late results are discarded instead of applied.
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl SessionStore {
    pub fn mount(
        deps: &DependenciesInject,
        access_token: Option<String>,
        cached_partner_code: Option<CachedPartnerCode>,
    ) -> Self {
        let initial = match access_token {
            Some(_) => SessionSnapshot::stored(),
            None => SessionSnapshot::anonymous(),
        }
        .with_cached_partner_code(cached_partner_code);

        let (tx, _) = watch::channel(initial);
        let store = Self {
            inner: Arc::new(StoreInner {
                tx,
                deps: deps.clone(),
                access_token,
            }),
        };

        if let Some(token) = store.inner.access_token.clone() {
            store.spawn_validation(token);
        }

        store
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.tx.subscribe()
    }

    pub fn get_cached_partner_code(&self) -> Option<CachedPartnerCode> {
        self.inner.tx.borrow().cached_partner_code.clone()
    }

    pub fn set_cached_partner_code(&self, cached: CachedPartnerCode) {
        self.inner.tx.send_if_modified(|snapshot| {
            if snapshot.cached_partner_code.as_ref() == Some(&cached) {
                return false;
            }
            snapshot.cached_partner_code = Some(cached);
            true
        });
    }

    /// Starts the background partner-code lookup unless a code is already
    /// cached for `partner_id` or this mount has already started one.
    pub fn request_partner_code(&self, partner_id: Uuid) -> bool {
        let mut started = false;
        self.inner.tx.send_if_modified(|snapshot| {
            let cached = snapshot
                .cached_partner_code
                .as_ref()
                .and_then(|c| c.code_for(partner_id))
                .is_some();

            if cached || snapshot.partner_code_fetch != FetchStatus::Idle {
                return false;
            }

            snapshot.partner_code_fetch = FetchStatus::InFlight;
            started = true;
            true
        });

        if started {
            self.spawn_partner_lookup(partner_id);
        }

        started
    }

    /// Re-checks `predicate` on every change until it holds or `deadline`
    /// passes; returns the last snapshot seen either way.
    pub async fn wait_until(
        &self,
        mut predicate: impl FnMut(&SessionSnapshot) -> bool,
        deadline: Instant,
    ) -> SessionSnapshot {
        let mut rx = self.subscribe();
        loop {
            let snapshot = rx.borrow_and_update().clone();
            if predicate(&snapshot) {
                return snapshot;
            }
            if !matches!(tokio::time::timeout_at(deadline, rx.changed()).await, Ok(Ok(()))) {
                return snapshot;
            }
        }
    }

    /// Waits until the session has settled or `deadline` passes.
    pub async fn settled(&self, deadline: Instant) -> SessionSnapshot {
        self.wait_until(SessionSnapshot::is_settled, deadline).await
    }

    pub async fn sign_out(&self) -> Result<(), ServiceError> {
        let result = match &self.inner.access_token {
            Some(token) => self.inner.deps.auth.revoke_session(token).await,
            None => Ok(()),
        };

        self.inner.tx.send_modify(|snapshot| {
            snapshot.expire();
            snapshot.cached_partner_code = None;
        });

        result
    }

    fn spawn_validation(&self, token: String) {
        let weak = Arc::downgrade(&self.inner);
        let deps = self.inner.deps.clone();

        tokio::spawn(async move {
            let session = match deps.auth.validate_session(&token).await {
                Ok(session) => session,
                Err(e) => {
                    if e.is_auth_rejection() {
                        debug!("Stored session rejected: {e}");
                    } else {
                        warn!("⚠️ Session validation failed: {e}");
                    }
                    apply(&weak, SessionSnapshot::expire);
                    return;
                }
            };

            let user_id = session.user_id;
            let live = apply(&weak, |snapshot| {
                snapshot.session_state = snapshot.session_state.transition(SessionState::Valid);
                snapshot.user = Some(session);
            });
            if !live {
                return;
            }

            let lookup = deps.directory.find_app_user(user_id).await;
            apply(&weak, |snapshot| {
                match lookup {
                    Ok(app_user) => snapshot.app_user = app_user,
                    Err(e) => {
                        error!("❌ App user lookup failed for {user_id}: {e}");
                        snapshot.app_user = None;
                        snapshot.app_user_unavailable = true;
                    }
                }
                snapshot.loading = false;
            });
        });
    }

    fn spawn_partner_lookup(&self, partner_id: Uuid) {
        let weak = Arc::downgrade(&self.inner);
        let tenants = self.inner.deps.tenants.clone();

        tokio::spawn(async move {
            let code = tenants.resolve(partner_id).await;
            let Some(inner) = weak.upgrade() else {
                debug!("Guard unmounted before partner code for {partner_id} arrived");
                return;
            };
            let store = SessionStore { inner };

            match code {
                Some(code) => {
                    store.set_cached_partner_code(CachedPartnerCode::new(partner_id, code));
                    store
                        .inner
                        .tx
                        .send_modify(|snapshot| snapshot.partner_code_fetch = FetchStatus::Done);
                }
                None => store
                    .inner
                    .tx
                    .send_modify(|snapshot| snapshot.partner_code_fetch = FetchStatus::Failed),
            }
        });
    }
}

/// Applies `update` if the store is still mounted.
fn apply(weak: &Weak<StoreInner>, update: impl FnOnce(&mut SessionSnapshot)) -> bool {
    match weak.upgrade() {
        Some(inner) => {
            inner.tx.send_modify(update);
            true
        }
        None => {
            debug!("Session store unmounted, dropping late result");
            false
        }
    }
}
