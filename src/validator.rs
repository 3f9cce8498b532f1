use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use schoolhub_core::AppError;
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor that runs `validator` rules after deserializing.
///
/// Every failure, malformed JSON included, becomes a `validation_error` (400)
/// naming the offending field where possible.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

/// Pulls the name out of serde messages such as "missing field `role`".
fn backticked_after<'a>(message: &'a str, marker: &str) -> Option<&'a str> {
    message
        .split(marker)
        .nth(1)
        .and_then(|rest| rest.split('`').next())
}

fn rejection_message(rejection: &JsonRejection) -> String {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return "Missing 'Content-Type: application/json' header".to_string();
    }

    let error_msg = rejection.body_text();

    if let Some(field) = backticked_after(&error_msg, "missing field `") {
        return format!("{} is required", field);
    }

    if let Some(variant) = backticked_after(&error_msg, "unknown variant `") {
        return format!("unknown role '{}'", variant);
    }

    if error_msg.contains("invalid type") || error_msg.contains("invalid length") {
        return "Invalid field type in request".to_string();
    }

    "Invalid request body".to_string()
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(anyhow!(rejection_message(&rejection))))?;

        value
            .validate()
            .map_err(|errors| AppError::from_validation_errors(&errors))?;

        Ok(ValidatedJson(value))
    }
}
