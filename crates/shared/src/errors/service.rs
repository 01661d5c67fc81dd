use crate::errors::repository::RepositoryError;
use deadpool_redis::PoolError;
use jsonwebtoken::errors::Error as JwtError;
use redis::RedisError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),

    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),

    #[error("Redis pool error: {0}")]
    RedisPool(#[from] PoolError),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Session has been revoked")]
    SessionRevoked,

    #[error("Token subject is not a valid user id")]
    InvalidSubject,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Errors that mean "this session is not valid" rather than "we could not tell".
    pub fn is_auth_rejection(&self) -> bool {
        matches!(
            self,
            ServiceError::Jwt(_)
                | ServiceError::TokenExpired
                | ServiceError::SessionRevoked
                | ServiceError::InvalidSubject
        )
    }
}
