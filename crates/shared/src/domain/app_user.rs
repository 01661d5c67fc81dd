use crate::{domain::Role, model::AppUserRow};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;
use uuid::Uuid;

/// Application-level user record, distinct from the bare auth identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppUser {
    pub id: Uuid,
    pub user_id: Uuid,
    /// `None` when the directory holds a role this portal does not know.
    pub role: Option<Role>,
    pub partner_id: Option<Uuid>,
    pub is_active: bool,
}

impl From<AppUserRow> for AppUser {
    fn from(row: AppUserRow) -> Self {
        let role = match row.role.parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => {
                warn!("⚠️ App user {} has {}", row.id, e);
                None
            }
        };

        AppUser {
            id: row.id,
            user_id: row.user_id,
            role,
            partner_id: row.partner_id,
            is_active: row.is_active,
        }
    }
}

/// A partner's tenant code remembered per browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CachedPartnerCode {
    pub partner_id: Uuid,
    pub code: String,
}

impl CachedPartnerCode {
    pub fn new(partner_id: Uuid, code: impl Into<String>) -> Self {
        Self {
            partner_id,
            code: code.into(),
        }
    }

    /// The cached code, only if it was stored for `partner_id`.
    pub fn code_for(&self, partner_id: Uuid) -> Option<&str> {
        (self.partner_id == partner_id).then_some(self.code.as_str())
    }

    pub fn to_cookie_value(&self) -> String {
        format!("{}.{}", self.partner_id, self.code)
    }

    pub fn from_cookie_value(value: &str) -> Option<Self> {
        let (partner_id, code) = value.split_once('.')?;
        let partner_id = Uuid::parse_str(partner_id).ok()?;
        if code.is_empty() {
            return None;
        }
        Some(Self::new(partner_id, code))
    }
}
