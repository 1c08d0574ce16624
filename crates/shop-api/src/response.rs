//! # Response Envelope
//!
//! Every endpoint replies with the same envelope:
//! `{ message, status_code, status, data }`, where `status` is one of
//! `success`, `error`, or `unauthorized`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use shop_core::ShopError;

/// Uniform response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub message: String,
    pub status_code: u16,
    pub status: &'static str,
    pub data: Value,
}

impl ApiResponse {
    /// 200 envelope with no payload
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: 200,
            status: "success",
            data: Value::Null,
        }
    }

    /// 200 envelope carrying `data`
    pub fn success_with<T: Serialize>(message: impl Into<String>, data: &T) -> Self {
        Self {
            message: message.into(),
            status_code: 200,
            status: "success",
            data: serde_json::to_value(data).unwrap_or(Value::Null),
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let code =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (code, Json(self)).into_response()
    }
}

/// Error half of every handler result; wraps a `ShopError` into the
/// envelope with its mapped status
#[derive(Debug)]
pub struct ApiError(pub ShopError);

impl From<ShopError> for ApiError {
    fn from(err: ShopError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let envelope = ApiResponse {
            message: err.to_string(),
            status_code: err.status_code(),
            status: err.status_label(),
            data: Value::Null,
        };
        envelope.into_response()
    }
}

/// Result type alias for handlers
pub type ApiResult = Result<ApiResponse, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let envelope = ApiResponse::success("Cart dropped successfully!");
        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.status, "success");
        assert_eq!(envelope.data, Value::Null);
    }

    #[test]
    fn error_envelope_carries_the_mapped_status() {
        let err = ApiError::from(ShopError::forbidden("You can only delete your order!"));
        assert_eq!(err.0.status_code(), 401);
        assert_eq!(err.0.status_label(), "unauthorized");
        assert_eq!(err.0.to_string(), "You can only delete your order!");
    }
}
