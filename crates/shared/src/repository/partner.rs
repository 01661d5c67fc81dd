use crate::{
    abstract_trait::PartnerRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::Partner,
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

pub struct PartnerRepository {
    db: ConnectionPool,
}

impl PartnerRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PartnerRepositoryTrait for PartnerRepository {
    async fn find_by_id(&self, partner_id: Uuid) -> Result<Option<Partner>, RepositoryError> {
        info!("🔍 Fetching partner {partner_id}");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let partner = sqlx::query_as::<_, Partner>(
            r#"
            SELECT id, partner_code, name, is_active, created_at
            FROM partners
            WHERE id = $1
            "#,
        )
        .bind(partner_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch partner {partner_id}: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(partner)
    }
}
