//! Shared application state.

use sqlx::PgPool;

use crate::events::EventPublisher;
use crate::store::{CartStore, OrderStore, WishlistStore};

#[derive(Clone)]
pub struct AppState {
    pub carts: CartStore,
    pub wishlists: WishlistStore,
    pub orders: OrderStore,
    pub events: EventPublisher,
}

impl AppState {
    pub fn new(db: PgPool, nats: Option<async_nats::Client>) -> Self {
        Self {
            carts: CartStore::new(db.clone()),
            wishlists: WishlistStore::new(db.clone()),
            orders: OrderStore::new(db),
            events: EventPublisher::new(nats),
        }
    }
}
