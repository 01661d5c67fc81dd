use crate::{domain::AppUser, errors::ServiceError};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynAppUserDirectory = Arc<dyn AppUserDirectoryTrait + Send + Sync>;

/// Tenant and user tables of the hosted backend.
#[async_trait]
pub trait AppUserDirectoryTrait {
    async fn find_app_user(&self, user_id: Uuid) -> Result<Option<AppUser>, ServiceError>;
    async fn find_partner_code(&self, partner_id: Uuid) -> Result<Option<String>, ServiceError>;
}
