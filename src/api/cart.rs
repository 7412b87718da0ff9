//! Cart endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::{Envelope, JsonBody};
use crate::domain::{Cart, CartLine};
use crate::error::Result;
use crate::state::AppState;

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub user_id: Uuid,
    pub product_id: Uuid,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(custom(function = "crate::api::non_negative_price", message = "price must not be negative"))]
    pub price: Decimal,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: u32,
    pub image_ref: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    pub user_id: Uuid,
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveCartItemRequest {
    pub user_id: Uuid,
    pub product_id: Uuid,
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AddToCartRequest>,
) -> Result<(StatusCode, Json<Envelope<Cart>>)> {
    req.validate()?;
    let line = CartLine {
        product_id: req.product_id,
        name: req.name,
        price: req.price,
        quantity: req.quantity,
        image_ref: req.image_ref,
    };
    let cart = state.carts.add_line(req.user_id, line).await?;
    Ok((StatusCode::CREATED, Json(Envelope::ok("Product added to cart", cart))))
}

pub async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Envelope<Cart>>> {
    let cart = state.carts.fetch(user_id).await?;
    Ok(Json(Envelope::ok("Cart fetched", cart)))
}

pub async fn update_quantity(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateCartItemRequest>,
) -> Result<Json<Envelope<Cart>>> {
    req.validate()?;
    let cart = state.carts.set_quantity(req.user_id, req.product_id, req.quantity).await?;
    Ok(Json(Envelope::ok("Quantity updated", cart)))
}

pub async fn remove_item(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RemoveCartItemRequest>,
) -> Result<Json<Envelope<Cart>>> {
    let cart = state.carts.remove_line(req.user_id, req.product_id).await?;
    Ok(Json(Envelope::ok("Product removed", cart)))
}

pub async fn clear(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Envelope<()>>> {
    state.carts.clear(user_id).await?;
    Ok(Json(Envelope::message_only("Cart cleared")))
}

pub async fn all_line_items(State(state): State<AppState>) -> Result<Json<Envelope<Vec<CartLine>>>> {
    let lines = state.carts.all_lines().await?;
    Ok(Json(Envelope::ok("Cart items fetched", lines)))
}

pub async fn clear_all(State(state): State<AppState>) -> Result<Json<Envelope<()>>> {
    let removed = state.carts.clear_all().await?;
    tracing::info!(removed, "cleared all carts");
    Ok(Json(Envelope::message_only("All cart data cleared successfully.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn add_request(quantity: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "userId": Uuid::new_v4(),
            "productId": Uuid::new_v4(),
            "name": "Widget",
            "price": 100,
            "quantity": quantity,
        })
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let req: AddToCartRequest = serde_json::from_value(add_request(0.into())).unwrap();
        let err: ApiError = req.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "quantity must be at least 1");
    }

    #[test]
    fn test_omitted_quantity_defaults_to_one() {
        let mut body = add_request(1.into());
        body.as_object_mut().unwrap().remove("quantity");
        let req: AddToCartRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.quantity, 1);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut body = add_request(1.into());
        body["price"] = serde_json::json!(-5);
        let req: AddToCartRequest = serde_json::from_value(body).unwrap();
        let err: ApiError = req.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "price must not be negative");
    }
}
