use crate::{domain::Session, errors::ServiceError};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynAuthProvider = Arc<dyn AuthProviderTrait + Send + Sync>;
pub type DynSessionRevocation = Arc<dyn SessionRevocationTrait + Send + Sync>;

/// The hosted auth service, seen only through what the portal needs from it.
#[async_trait]
pub trait AuthProviderTrait {
    /// Checks that the persisted access token still describes a live session.
    async fn validate_session(&self, access_token: &str) -> Result<Session, ServiceError>;
    async fn revoke_session(&self, access_token: &str) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait SessionRevocationTrait {
    async fn revoke(&self, session: &Session) -> Result<(), ServiceError>;
    async fn is_revoked(&self, session: &Session) -> Result<bool, ServiceError>;
}
