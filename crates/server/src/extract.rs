//! Request extractors that reject with [`JsonApiError`].

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use service::auth::domain::AuthUser;
use service::auth::errors::AuthError;
use service::errors::flatten_validation_errors;

use crate::errors::JsonApiError;

/// JSON body that must deserialize (unknown fields included) and pass `validate()`.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let status = match rejection.status() {
                    StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
                    _ => StatusCode::BAD_REQUEST,
                };
                JsonApiError::new(status, rejection.body_text())
            })?;
        value.validate().map_err(|e| JsonApiError::bad_request(flatten_validation_errors(&e)))?;
        Ok(Self(value))
    }
}

/// Query string counterpart of [`ValidatedJson`].
pub struct ValidatedQuery<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| JsonApiError::bad_request(rejection.body_text()))?;
        value.validate().map_err(|e| JsonApiError::bad_request(flatten_validation_errors(&e)))?;
        Ok(Self(value))
    }
}

/// Single path segment that must be a UUID.
pub struct UuidParam(pub Uuid);

#[axum::async_trait]
impl<S> FromRequestParts<S> for UuidParam
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| JsonApiError::bad_request(rejection.body_text()))?;
        Uuid::parse_str(&raw)
            .map(Self)
            .map_err(|_| JsonApiError::bad_request("Validation failed (uuid is expected)"))
    }
}

/// The user placed in request extensions by [`crate::guards::require_auth`].
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(Self)
            .ok_or_else(|| AuthError::MissingUser.into())
    }
}
