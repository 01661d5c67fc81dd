use crate::{
    abstract_trait::SessionRevocationTrait, domain::Session, errors::ServiceError,
};
use async_trait::async_trait;
use chrono::Utc;
use deadpool_redis::Pool;
use std::sync::Arc;
use tracing::{debug, info};

/// Signed-out sessions, remembered in Redis until their tokens would expire anyway.
#[derive(Clone)]
pub struct SessionRevocationStore {
    pool: Arc<Pool>,
}

impl SessionRevocationStore {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    fn key(session: &Session) -> String {
        match &session.session_id {
            Some(id) => format!("session:revoked:{id}"),
            None => format!(
                "session:revoked:{}:{}",
                session.user_id,
                session.issued_at.timestamp()
            ),
        }
    }
}

#[async_trait]
impl SessionRevocationTrait for SessionRevocationStore {
    async fn revoke(&self, session: &Session) -> Result<(), ServiceError> {
        let ttl = (session.expires_at - Utc::now()).num_seconds();
        if ttl <= 0 {
            debug!("Session for {} already expired, nothing to revoke", session.user_id);
            return Ok(());
        }

        let mut conn = self.pool.get().await?;
        let key = Self::key(session);

        redis::cmd("SET")
            .arg(&key)
            .arg(1)
            .arg("EX")
            .arg(ttl)
            .query_async::<()>(&mut conn)
            .await?;

        info!("🔒 Revoked session {key}");
        Ok(())
    }

    async fn is_revoked(&self, session: &Session) -> Result<bool, ServiceError> {
        let mut conn = self.pool.get().await?;
        let exists: bool = redis::cmd("EXISTS")
            .arg(Self::key(session))
            .query_async(&mut conn)
            .await?;

        Ok(exists)
    }
}
