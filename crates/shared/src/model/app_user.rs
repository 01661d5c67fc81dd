use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AppUserRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub partner_id: Option<Uuid>,
    pub is_active: bool,
}
