//! Request extractors.

use axum::extract::{FromRequest, Request};
use axum::Json;
use keel_core::validation::RequestSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;

/// JSON body extractor that validates against the payload's [`RequestSchema`].
///
/// The body must be a JSON object. Properties without declared rules are
/// stripped, every rule is evaluated, and any failure rejects the request
/// with a 400 listing each failing field. Only then is `T` deserialized.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: RequestSchema + DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        let Value::Object(mut fields) = body else {
            return Err(AppError::BadRequest(
                "Request body must be a JSON object".to_string(),
            ));
        };

        let schema = T::schema();
        schema.whitelist(&mut fields);
        schema.validate(&fields).into_result()?;

        let payload = serde_json::from_value(Value::Object(fields))
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;

        Ok(Self(payload))
    }
}
