//! Domain events
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Raised after a checkout commits. The payload is what downstream consumers
/// (fulfilment, notifications) need without re-reading the order.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlaced {
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub total_amount: Decimal,
}
