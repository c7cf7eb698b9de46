//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use chirp_common::AppError;

/// Name of the credential header.
pub const API_KEY_HEADER: &str = "api-key";

/// The caller-supplied API key.
///
/// Rejects the request with a 403 JSON error when the `api-key` header is
/// absent or empty. The key is not validated beyond that; it doubles as
/// the identity lookup key downstream.
#[derive(Debug, Clone)]
pub struct ApiKey(pub String);

impl<S> FromRequestParts<S> for ApiKey
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|key| !key.is_empty())
            .map(|key| Self(key.to_string()))
            .ok_or(AppError::MissingApiKey)
    }
}
