//! Error taxonomy shared by every handler.
//!
//! Four classes cross the HTTP boundary: validation failures (400), missing
//! documents (404), checkout against an empty cart (400), and storage faults
//! (500). Storage faults keep their detail in the logs and expose only a
//! generic message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::api::Envelope;
use crate::domain::{CartError, OrderError};

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Server Error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::EmptyCart => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::LineNotFound => Self::NotFound("Product not in cart"),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::EmptyCart => Self::EmptyCart,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errs: ValidationErrors) -> Self {
        let message = errs
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .next()
            .unwrap_or_else(|| "Invalid request body".to_string());
        Self::Validation(message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Database(inner) = &self {
            tracing::error!(error = %inner, "request failed");
        }
        (self.status(), Json(Envelope::<()>::error(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::Validation("bad".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("Cart not found").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::EmptyCart.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Database(sqlx::Error::PoolClosed).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_storage_detail_not_leaked() {
        let err = ApiError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.to_string(), "Server Error");
    }

    #[test]
    fn test_domain_error_conversions() {
        let err: ApiError = CartError::LineNotFound.into();
        assert_eq!(err.to_string(), "Product not in cart");
        let err: ApiError = OrderError::EmptyCart.into();
        assert!(matches!(err, ApiError::EmptyCart));
    }
}
