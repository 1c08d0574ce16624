//! # Identity Extraction
//!
//! The auth layer in front of this service verifies credentials and
//! forwards the resolved identity as `X-User-ID` and `X-User-Role`
//! headers. This extractor turns them into a typed [`Identity`] once, so
//! handlers never touch raw headers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shop_core::{Identity, Role, ShopError};

use crate::response::ApiError;

const USER_ID_HEADER: &str = "x-user-id";
const USER_ROLE_HEADER: &str = "x-user-role";

/// Extractor for the resolved caller identity
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Identity);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError(ShopError::validation("X-User-ID header is required!")))?
            .parse::<u64>()
            .map_err(|_| ApiError(ShopError::validation("X-User-ID header is invalid!")))?;

        // Absent role means a plain user; an unknown role string is an error.
        let role = match parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            Some(raw) => raw.parse::<Role>().map_err(ApiError)?,
            None => Role::default(),
        };

        Ok(Caller(Identity::new(user_id, role)))
    }
}
