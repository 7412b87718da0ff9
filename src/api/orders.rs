//! Order endpoints: checkout and per-user history.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::{Envelope, JsonBody};
use crate::domain::events::OrderPlaced;
use crate::domain::Order;
use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub user_id: Uuid,
}

pub async fn checkout(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CheckoutRequest>,
) -> Result<Json<Envelope<Order>>> {
    let order = state.orders.checkout(req.user_id).await?;
    state
        .events
        .order_placed(&OrderPlaced {
            order_id: order.id,
            user_id: order.user_id,
            total_amount: order.total_amount,
        })
        .await;
    Ok(Json(Envelope::ok("Checkout successful. Order placed.", order)))
}

pub async fn by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Envelope<Vec<Order>>>> {
    let orders = state.orders.by_user(user_id).await?;
    Ok(Json(Envelope::ok("Orders fetched successfully", orders)))
}
