use crate::{
    errors::RepositoryError,
    model::{AppUserRow, Partner},
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynAppUserRepository = Arc<dyn AppUserRepositoryTrait + Send + Sync>;
pub type DynPartnerRepository = Arc<dyn PartnerRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait AppUserRepositoryTrait {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<AppUserRow>, RepositoryError>;
}

#[async_trait]
pub trait PartnerRepositoryTrait {
    async fn find_by_id(&self, partner_id: Uuid) -> Result<Option<Partner>, RepositoryError>;
}
