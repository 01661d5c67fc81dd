use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use shared::errors::{HttpError, ServiceError};
use validator::{Validate, ValidationErrors};

/// JSON body that has passed its `validator` rules.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| HttpError::from(ServiceError::Validation(messages(&errors))))?;

        Ok(Self(value))
    }
}

fn messages(errors: &ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| match error.code.as_ref() {
                        "length" => "Invalid length".to_string(),
                        "required" => "Missing value".to_string(),
                        _ => format!("Invalid {field}"),
                    });
                format!("{field}: {message}")
            })
        })
        .collect()
}
