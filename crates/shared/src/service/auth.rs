use crate::{
    abstract_trait::{AuthProviderTrait, DynSessionRevocation},
    config::JwtConfig,
    domain::Session,
    errors::ServiceError,
};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Validates access tokens locally and consults the revocation list.
pub struct JwtAuthProvider {
    jwt: JwtConfig,
    revocations: DynSessionRevocation,
}

impl JwtAuthProvider {
    pub fn new(jwt: JwtConfig, revocations: DynSessionRevocation) -> Self {
        Self { jwt, revocations }
    }
}

#[async_trait]
impl AuthProviderTrait for JwtAuthProvider {
    async fn validate_session(&self, access_token: &str) -> Result<Session, ServiceError> {
        let session = self.jwt.verify_access_token(access_token).map_err(|e| {
            debug!("Access token rejected: {e}");
            e
        })?;

        if self.revocations.is_revoked(&session).await? {
            warn!("⚠️ Revoked session presented for user {}", session.user_id);
            return Err(ServiceError::SessionRevoked);
        }

        Ok(session)
    }

    async fn revoke_session(&self, access_token: &str) -> Result<(), ServiceError> {
        let session = self.jwt.verify_access_token(access_token)?;
        self.revocations.revoke(&session).await?;

        info!("👋 Signed out user {}", session.user_id);
        Ok(())
    }
}
