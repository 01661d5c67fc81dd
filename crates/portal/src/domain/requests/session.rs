use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct CreateSessionRequest {
    /// Access token issued by the hosted auth service after sign-in.
    #[validate(length(min = 1, message = "Access token is required"))]
    pub access_token: String,
}
