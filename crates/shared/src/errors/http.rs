use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => {
                HttpError::BadRequest(format!("Validation failed: {errors:?}"))
            }

            ServiceError::Repo(RepositoryError::NotFound) => {
                HttpError::NotFound("Not found".into())
            }
            ServiceError::Repo(_) => HttpError::Internal("Repository error".into()),

            ServiceError::Jwt(err) => HttpError::Unauthorized(format!("JWT error: {err}")),
            ServiceError::TokenExpired => HttpError::Unauthorized("Token expired".into()),
            ServiceError::SessionRevoked => HttpError::Unauthorized("Session revoked".into()),
            ServiceError::InvalidSubject => {
                HttpError::Unauthorized("Invalid token subject".into())
            }

            ServiceError::Redis(err) => {
                HttpError::ServiceUnavailable(format!("Session cache unavailable: {err}"))
            }
            ServiceError::RedisPool(err) => {
                HttpError::ServiceUnavailable(format!("Session cache unavailable: {err}"))
            }

            ServiceError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message: msg,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_map_to_unauthorized() {
        let response = HttpError::from(ServiceError::SessionRevoked).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = HttpError::from(ServiceError::TokenExpired).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn missing_rows_map_to_not_found() {
        let response =
            HttpError::from(ServiceError::Repo(RepositoryError::NotFound)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
