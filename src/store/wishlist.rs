//! Wishlist persistence.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::{Wishlist, WishlistItem};
use crate::error::{ApiError, Result};

const SELECT_WISHLIST: &str =
    "SELECT user_id, items, created_at, updated_at FROM wishlists WHERE user_id = $1";
const SELECT_WISHLIST_FOR_UPDATE: &str =
    "SELECT user_id, items, created_at, updated_at FROM wishlists WHERE user_id = $1 FOR UPDATE";

#[derive(Clone)]
pub struct WishlistStore {
    db: PgPool,
}

#[derive(sqlx::FromRow)]
struct WishlistRow {
    user_id: Uuid,
    items: Json<Vec<WishlistItem>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<WishlistRow> for Wishlist {
    fn from(row: WishlistRow) -> Self {
        Wishlist { user_id: row.user_id, items: row.items.0, created_at: row.created_at, updated_at: row.updated_at }
    }
}

impl WishlistStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Creates the wishlist lazily; a duplicate product is left as-is. The
    /// row lock serializes concurrent adds of the same product, so they
    /// converge to a single stored item.
    pub async fn add_item(&self, user_id: Uuid, item: WishlistItem) -> Result<Wishlist> {
        let mut tx = self.db.begin().await?;
        sqlx::query("INSERT INTO wishlists (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        let mut wishlist: Wishlist = sqlx::query_as::<_, WishlistRow>(SELECT_WISHLIST_FOR_UPDATE)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?
            .into();
        if wishlist.add_item(item) {
            save_items(&mut tx, &wishlist).await?;
        }
        tx.commit().await?;
        Ok(wishlist)
    }

    pub async fn fetch(&self, user_id: Uuid) -> Result<Wishlist> {
        sqlx::query_as::<_, WishlistRow>(SELECT_WISHLIST)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?
            .map(Wishlist::from)
            .ok_or(ApiError::NotFound("Wishlist not found"))
    }

    pub async fn remove_item(&self, user_id: Uuid, product_id: Uuid) -> Result<Wishlist> {
        let mut tx = self.db.begin().await?;
        let mut wishlist: Wishlist = sqlx::query_as::<_, WishlistRow>(SELECT_WISHLIST_FOR_UPDATE)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .map(Wishlist::from)
            .ok_or(ApiError::NotFound("Wishlist not found"))?;
        wishlist.remove_item(product_id);
        save_items(&mut tx, &wishlist).await?;
        tx.commit().await?;
        Ok(wishlist)
    }

    /// Flattens every user's saved items into one sequence.
    pub async fn all_items(&self) -> Result<Vec<WishlistItem>> {
        let rows: Vec<Json<Vec<WishlistItem>>> =
            sqlx::query_scalar("SELECT items FROM wishlists").fetch_all(&self.db).await?;
        Ok(rows.into_iter().flat_map(|Json(items)| items).collect())
    }
}

async fn save_items(tx: &mut Transaction<'_, Postgres>, wishlist: &Wishlist) -> Result<()> {
    sqlx::query("UPDATE wishlists SET items = $2, updated_at = $3 WHERE user_id = $1")
        .bind(wishlist.user_id)
        .bind(Json(&wishlist.items))
        .bind(wishlist.updated_at)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
