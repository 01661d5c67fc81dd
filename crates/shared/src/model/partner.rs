use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Partner {
    pub id: Uuid,
    pub partner_code: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: Option<NaiveDateTime>,
}
