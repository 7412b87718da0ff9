//! HTTP surface: router, response envelope and request plumbing.

use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use validator::ValidationError;

use crate::error::ApiError;
use crate::state::AppState;

pub mod cart;
pub mod orders;
pub mod wishlist;

/// Standard response envelope. Error paths always carry `success: false` and
/// a short human-readable message; `data` is omitted when there is none.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self { success: true, message: message.into(), data: Some(data) }
    }
}

impl Envelope<()> {
    pub fn message_only(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), data: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), data: None }
    }
}

/// `axum::Json` with its rejection converted into the standard envelope, so
/// malformed bodies surface as validation errors rather than plain text.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

pub(crate) fn non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("negative_price"));
    }
    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/cart/add", post(cart::add_to_cart))
        .route("/cart/all", get(cart::all_line_items))
        .route("/cart/update", put(cart::update_quantity))
        .route("/cart/remove", delete(cart::remove_item))
        .route("/cart/clear-all", delete(cart::clear_all))
        .route("/cart/clear/:user_id", delete(cart::clear))
        .route("/cart/:user_id", get(cart::get_cart))
        .route("/wishlist/add", post(wishlist::add_item))
        .route("/wishlist/all", get(wishlist::all_items))
        .route("/wishlist/remove", delete(wishlist::remove_item))
        .route("/wishlist/:user_id", get(wishlist::get_wishlist))
        .route("/order/checkout", post(orders::checkout))
        .route("/order/:user_id", get(orders::by_user))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy", "service": "storefront-api"}))
}

async fn not_found() -> (StatusCode, Json<Envelope<()>>) {
    (StatusCode::NOT_FOUND, Json(Envelope::error("Route not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let ok = serde_json::to_value(Envelope::ok("Cart fetched", 5)).unwrap();
        assert_eq!(ok, serde_json::json!({"success": true, "message": "Cart fetched", "data": 5}));
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let err = serde_json::to_value(Envelope::<()>::error("Cart not found")).unwrap();
        assert_eq!(err, serde_json::json!({"success": false, "message": "Cart not found"}));
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(non_negative_price(&Decimal::new(-1, 2)).is_err());
        assert!(non_negative_price(&Decimal::ZERO).is_ok());
        assert!(non_negative_price(&Decimal::new(100, 0)).is_ok());
    }
}
