//! Cart persistence.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::{Cart, CartLine};
use crate::error::{ApiError, Result};

const SELECT_CART: &str = "SELECT user_id, lines, created_at, updated_at FROM carts WHERE user_id = $1";
pub(crate) const SELECT_CART_FOR_UPDATE: &str =
    "SELECT user_id, lines, created_at, updated_at FROM carts WHERE user_id = $1 FOR UPDATE";

#[derive(Clone)]
pub struct CartStore {
    db: PgPool,
}

#[derive(sqlx::FromRow)]
pub(crate) struct CartRow {
    user_id: Uuid,
    lines: Json<Vec<CartLine>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        Cart { user_id: row.user_id, lines: row.lines.0, created_at: row.created_at, updated_at: row.updated_at }
    }
}

impl CartStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Creates the cart lazily on first add; merges quantity when a line for
    /// the product already exists.
    pub async fn add_line(&self, user_id: Uuid, line: CartLine) -> Result<Cart> {
        let mut tx = self.db.begin().await?;
        sqlx::query("INSERT INTO carts (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        let mut cart: Cart = sqlx::query_as::<_, CartRow>(SELECT_CART_FOR_UPDATE)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?
            .into();
        cart.add_line(line);
        save_lines(&mut tx, &cart).await?;
        tx.commit().await?;
        Ok(cart)
    }

    /// An empty-but-existing cart resolves successfully; only a missing cart
    /// document is NotFound.
    pub async fn fetch(&self, user_id: Uuid) -> Result<Cart> {
        sqlx::query_as::<_, CartRow>(SELECT_CART)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?
            .map(Cart::from)
            .ok_or(ApiError::NotFound("Cart not found"))
    }

    pub async fn set_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: u32) -> Result<Cart> {
        let mut tx = self.db.begin().await?;
        let mut cart = lock_cart(&mut tx, user_id).await?;
        cart.set_quantity(product_id, quantity)?;
        save_lines(&mut tx, &cart).await?;
        tx.commit().await?;
        Ok(cart)
    }

    pub async fn remove_line(&self, user_id: Uuid, product_id: Uuid) -> Result<Cart> {
        let mut tx = self.db.begin().await?;
        let mut cart = lock_cart(&mut tx, user_id).await?;
        cart.remove_line(product_id);
        save_lines(&mut tx, &cart).await?;
        tx.commit().await?;
        Ok(cart)
    }

    /// Deletes the whole cart document. Succeeds whether or not one existed.
    pub async fn clear(&self, user_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM carts WHERE user_id = $1").bind(user_id).execute(&self.db).await?;
        Ok(())
    }

    /// Flattens every user's lines into one sequence. Full-table scan; this
    /// is an administrative endpoint.
    pub async fn all_lines(&self) -> Result<Vec<CartLine>> {
        let rows: Vec<Json<Vec<CartLine>>> =
            sqlx::query_scalar("SELECT lines FROM carts").fetch_all(&self.db).await?;
        Ok(rows.into_iter().flat_map(|Json(lines)| lines).collect())
    }

    pub async fn clear_all(&self) -> Result<u64> {
        Ok(sqlx::query("DELETE FROM carts").execute(&self.db).await?.rows_affected())
    }
}

async fn lock_cart(tx: &mut Transaction<'_, Postgres>, user_id: Uuid) -> Result<Cart> {
    sqlx::query_as::<_, CartRow>(SELECT_CART_FOR_UPDATE)
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?
        .map(Cart::from)
        .ok_or(ApiError::NotFound("Cart not found"))
}

pub(crate) async fn save_lines(tx: &mut Transaction<'_, Postgres>, cart: &Cart) -> Result<()> {
    sqlx::query("UPDATE carts SET lines = $2, updated_at = $3 WHERE user_id = $1")
        .bind(cart.user_id)
        .bind(Json(&cart.lines))
        .bind(cart.updated_at)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
