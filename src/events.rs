//! Event publishing over NATS.
//!
//! The publisher is optional at runtime: without a configured connection it
//! is a no-op, and a failed publish only logs. Checkout must not fail
//! because a consumer is down.

use crate::domain::events::OrderPlaced;

const ORDER_PLACED_SUBJECT: &str = "storefront.orders.placed";

#[derive(Clone)]
pub struct EventPublisher {
    client: Option<async_nats::Client>,
}

impl EventPublisher {
    pub fn new(client: Option<async_nats::Client>) -> Self {
        Self { client }
    }

    pub async fn order_placed(&self, event: &OrderPlaced) {
        let Some(client) = &self.client else { return };
        let payload = match serde_json::to_vec(event) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(%err, "failed to encode order event");
                return;
            }
        };
        if let Err(err) = client.publish(ORDER_PLACED_SUBJECT.to_string(), payload.into()).await {
            tracing::warn!(%err, order_id = %event.order_id, "failed to publish order event");
        }
    }
}
