//! Order persistence and the checkout transition.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::cart::{save_lines, CartRow, SELECT_CART_FOR_UPDATE};
use crate::domain::{Cart, CartLine, Order};
use crate::error::{ApiError, Result};

#[derive(Clone)]
pub struct OrderStore {
    db: PgPool,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: Uuid,
    lines: Json<Vec<CartLine>>,
    total_amount: Decimal,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            user_id: row.user_id,
            lines: row.lines.0,
            total_amount: row.total_amount,
            created_at: row.created_at,
        }
    }
}

impl OrderStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// The one cross-document transition: create the order and empty the
    /// cart's lines in a single transaction. The cart row stays behind with
    /// zero lines. Concurrent or retried checkouts serialize on the row
    /// lock; the later one observes an empty cart and gets `EmptyCart`, so
    /// one cart emptying can never produce two orders.
    pub async fn checkout(&self, user_id: Uuid) -> Result<Order> {
        let mut tx = self.db.begin().await?;
        let mut cart: Cart = sqlx::query_as::<_, CartRow>(SELECT_CART_FOR_UPDATE)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .map(Cart::from)
            .ok_or(ApiError::EmptyCart)?;
        let order = Order::place(user_id, cart.lines.clone())?;
        sqlx::query("INSERT INTO orders (id, user_id, lines, total_amount, created_at) VALUES ($1, $2, $3, $4, $5)")
            .bind(order.id)
            .bind(order.user_id)
            .bind(Json(&order.lines))
            .bind(order.total_amount)
            .bind(order.created_at)
            .execute(&mut *tx)
            .await?;
        cart.empty_lines();
        save_lines(&mut tx, &cart).await?;
        tx.commit().await?;
        tracing::debug!(order_id = %order.id, user_id = %user_id, total = %order.total_amount, "order placed");
        Ok(order)
    }

    /// Newest-first order history. Zero orders is reported as NotFound, not
    /// an empty list; callers handle both.
    pub async fn by_user(&self, user_id: Uuid) -> Result<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, lines, total_amount, created_at FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        if rows.is_empty() {
            return Err(ApiError::NotFound("No orders found for this user"));
        }
        Ok(rows.into_iter().map(Order::from).collect())
    }
}
