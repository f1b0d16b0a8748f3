//! Validated JSON extractor
//!
//! Deserializes a JSON body and runs the `validator` rules on it before
//! the handler ever sees the value.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

/// JSON body that has passed validation.
///
/// The inner type must implement both `Deserialize` and `Validate`;
/// deserialization and rule failures both surface as 400s.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_query(rejection.body_text()))?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}
