use crate::{
    abstract_trait::{AppUserDirectoryTrait, DynAppUserRepository, DynPartnerRepository},
    cache::CacheStore,
    domain::AppUser,
    errors::ServiceError,
};
use async_trait::async_trait;
use chrono::Duration;
use tracing::{info, warn};
use uuid::Uuid;

pub struct DirectoryService {
    app_users: DynAppUserRepository,
    partners: DynPartnerRepository,
    cache: Option<CacheStore>,
    partner_code_ttl: Duration,
}

impl DirectoryService {
    pub fn new(
        app_users: DynAppUserRepository,
        partners: DynPartnerRepository,
        cache: Option<CacheStore>,
        partner_code_ttl: Duration,
    ) -> Self {
        Self {
            app_users,
            partners,
            cache,
            partner_code_ttl,
        }
    }

    fn partner_code_key(partner_id: Uuid) -> String {
        format!("partner_code:{partner_id}")
    }
}

#[async_trait]
impl AppUserDirectoryTrait for DirectoryService {
    async fn find_app_user(&self, user_id: Uuid) -> Result<Option<AppUser>, ServiceError> {
        let row = self.app_users.find_by_user_id(user_id).await?;

        if row.is_none() {
            warn!("⚠️ No app user record for auth user {user_id}");
        }

        Ok(row.map(AppUser::from))
    }

    async fn find_partner_code(&self, partner_id: Uuid) -> Result<Option<String>, ServiceError> {
        let key = Self::partner_code_key(partner_id);

        if let Some(cache) = &self.cache
            && let Some(code) = cache.get_from_cache::<String>(&key).await
        {
            info!("✅ Partner code for {partner_id} served from cache");
            return Ok(Some(code));
        }

        let code = self
            .partners
            .find_by_id(partner_id)
            .await?
            .map(|partner| partner.partner_code)
            .filter(|code| !code.is_empty());

        if let (Some(cache), Some(code)) = (&self.cache, &code) {
            cache.set_to_cache(&key, code, self.partner_code_ttl).await;
        }

        Ok(code)
    }
}
