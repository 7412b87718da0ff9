//! Wishlist endpoints.

use axum::extract::{Path, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::{Envelope, JsonBody};
use crate::domain::{Wishlist, WishlistItem};
use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddToWishlistRequest {
    pub user_id: Uuid,
    pub product_id: Uuid,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(custom(function = "crate::api::non_negative_price", message = "price must not be negative"))]
    pub price: Decimal,
    pub image_ref: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveWishlistItemRequest {
    pub user_id: Uuid,
    pub product_id: Uuid,
}

pub async fn add_item(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AddToWishlistRequest>,
) -> Result<Json<Envelope<Wishlist>>> {
    req.validate()?;
    let item = WishlistItem {
        product_id: req.product_id,
        name: req.name,
        price: req.price,
        image_ref: req.image_ref,
    };
    let wishlist = state.wishlists.add_item(req.user_id, item).await?;
    Ok(Json(Envelope::ok("Wishlist updated", wishlist)))
}

pub async fn get_wishlist(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Envelope<Wishlist>>> {
    let wishlist = state.wishlists.fetch(user_id).await?;
    Ok(Json(Envelope::ok("Wishlist fetched", wishlist)))
}

pub async fn remove_item(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RemoveWishlistItemRequest>,
) -> Result<Json<Envelope<Wishlist>>> {
    let wishlist = state.wishlists.remove_item(req.user_id, req.product_id).await?;
    Ok(Json(Envelope::ok("Product removed", wishlist)))
}

pub async fn all_items(State(state): State<AppState>) -> Result<Json<Envelope<Vec<WishlistItem>>>> {
    let items = state.wishlists.all_items().await?;
    Ok(Json(Envelope::ok("Wishlist items fetched", items)))
}
