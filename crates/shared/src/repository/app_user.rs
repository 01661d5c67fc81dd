use crate::{
    abstract_trait::AppUserRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::AppUserRow,
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

pub struct AppUserRepository {
    db: ConnectionPool,
}

impl AppUserRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AppUserRepositoryTrait for AppUserRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<AppUserRow>, RepositoryError> {
        info!("🔍 Fetching app user for auth user {user_id}");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let row = sqlx::query_as::<_, AppUserRow>(
            r#"
            SELECT id, user_id, role, partner_id, is_active
            FROM app_users
            WHERE user_id = $1
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch app user {user_id}: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(row)
    }
}
