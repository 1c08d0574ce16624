//! # Error Types
//!
//! Typed error handling for the checkout core.
//! All cart, order, and payment operations return `Result<T, ShopError>`.

use thiserror::Error;

/// Core error type for all shop operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Session, order, item, or provider absent
    #[error("{0}")]
    NotFound(String),

    /// Caller does not own the resource it is mutating
    #[error("{0}")]
    Forbidden(String),

    /// Invalid state transition (e.g. paying an already paid order)
    #[error("{0}")]
    Conflict(String),

    /// A dependent service call failed or errored
    #[error("upstream {service} call failed: {message}")]
    Upstream { service: String, message: String },
}

impl ShopError {
    pub fn validation(message: impl Into<String>) -> Self {
        ShopError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ShopError::NotFound(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ShopError::Forbidden(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ShopError::Conflict(message.into())
    }

    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        ShopError::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Re-brand a failure from a dependent call as an upstream failure,
    /// keeping the original attribution when it already is one.
    pub fn upstream_from(service: &str, err: ShopError) -> Self {
        match err {
            upstream @ ShopError::Upstream { .. } => upstream,
            other => ShopError::upstream(service, other.to_string()),
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ShopError::Validation(_) => 400,
            ShopError::NotFound(_) => 404,
            ShopError::Forbidden(_) => 401,
            ShopError::Conflict(_) => 409,
            ShopError::Upstream { .. } => 502,
        }
    }

    /// Returns the envelope status label for this error
    pub fn status_label(&self) -> &'static str {
        match self {
            ShopError::Forbidden(_) => "unauthorized",
            _ => "error",
        }
    }
}

/// Result type alias for shop operations
pub type ShopResult<T> = Result<T, ShopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ShopError::validation("bad input").status_code(), 400);
        assert_eq!(ShopError::not_found("missing").status_code(), 404);
        assert_eq!(ShopError::forbidden("not yours").status_code(), 401);
        assert_eq!(ShopError::conflict("already paid").status_code(), 409);
        assert_eq!(ShopError::upstream("payment", "down").status_code(), 502);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ShopError::forbidden("not yours").status_label(), "unauthorized");
        assert_eq!(ShopError::not_found("missing").status_label(), "error");
        assert_eq!(ShopError::upstream("product", "down").status_label(), "error");
    }

    #[test]
    fn test_upstream_from_keeps_attribution() {
        let already = ShopError::upstream("payment", "timeout");
        match ShopError::upstream_from("order", already) {
            ShopError::Upstream { service, .. } => assert_eq!(service, "payment"),
            other => panic!("unexpected error: {other:?}"),
        }

        let wrapped = ShopError::upstream_from("product", ShopError::not_found("Product not found!"));
        match wrapped {
            ShopError::Upstream { service, message } => {
                assert_eq!(service, "product");
                assert_eq!(message, "Product not found!");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
