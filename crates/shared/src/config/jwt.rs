use crate::{domain::Session, errors::ServiceError};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_AUDIENCE: &str = "authenticated";

/// Claims carried by access tokens minted by the hosted auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl AccessTokenClaims {
    pub fn into_session(self) -> Result<Session, ServiceError> {
        let user_id = Uuid::parse_str(&self.sub).map_err(|_| ServiceError::InvalidSubject)?;

        let identifier = self
            .email
            .filter(|e| !e.is_empty())
            .or(self.phone.filter(|p| !p.is_empty()))
            .unwrap_or_default();

        let issued_at = DateTime::<Utc>::from_timestamp(self.iat, 0)
            .ok_or_else(|| ServiceError::Internal("iat out of range".into()))?;
        let expires_at = DateTime::<Utc>::from_timestamp(self.exp, 0)
            .ok_or_else(|| ServiceError::Internal("exp out of range".into()))?;

        Ok(Session {
            user_id,
            identifier,
            session_id: self.session_id,
            issued_at,
            expires_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub jwt_secret: String,
    pub audience: String,
}

impl JwtConfig {
    pub fn new(jwt_secret: &str) -> Self {
        JwtConfig {
            jwt_secret: jwt_secret.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        }
    }

    pub fn verify_access_token(&self, token: &str) -> Result<Session, ServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[self.audience.as_str()]);
        validation.leeway = 0;

        let token_data =
            decode::<AccessTokenClaims>(token, &decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                    _ => ServiceError::Jwt(e),
                }
            })?;

        token_data.claims.into_session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &str = "test-secret-with-enough-length";

    fn token(claims: &AccessTokenClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(exp_offset: Duration) -> AccessTokenClaims {
        let now = Utc::now();
        AccessTokenClaims {
            sub: Uuid::new_v4().to_string(),
            aud: DEFAULT_AUDIENCE.into(),
            exp: (now + exp_offset).timestamp(),
            iat: now.timestamp(),
            email: None,
            phone: Some("+919800000000".into()),
            session_id: Some("sess-1".into()),
        }
    }

    #[test]
    fn verifies_valid_token_and_falls_back_to_phone() {
        let claims = claims(Duration::minutes(30));
        let session = JwtConfig::new(SECRET)
            .verify_access_token(&token(&claims, SECRET))
            .unwrap();

        assert_eq!(session.user_id.to_string(), claims.sub);
        assert_eq!(session.identifier, "+919800000000");
        assert_eq!(session.session_id.as_deref(), Some("sess-1"));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let claims = claims(Duration::minutes(-5));
        let err = JwtConfig::new(SECRET)
            .verify_access_token(&token(&claims, SECRET))
            .unwrap_err();

        assert!(matches!(err, ServiceError::TokenExpired));
    }

    #[test]
    fn wrong_secret_or_audience_is_rejected() {
        let claims = claims(Duration::minutes(30));
        let config = JwtConfig::new(SECRET);

        let err = config
            .verify_access_token(&token(&claims, "another-secret-entirely"))
            .unwrap_err();
        assert!(err.is_auth_rejection());

        let service_role = JwtConfig {
            audience: "service_role".into(),
            ..config
        };
        let err = service_role
            .verify_access_token(&token(&claims, SECRET))
            .unwrap_err();
        assert!(err.is_auth_rejection());
    }

    #[test]
    fn non_uuid_subject_is_rejected() {
        let mut claims = claims(Duration::minutes(30));
        claims.sub = "anonymous".into();
        let err = JwtConfig::new(SECRET)
            .verify_access_token(&token(&claims, SECRET))
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidSubject));
    }
}
