//! Wishlist Aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved product. Same snapshot fields as a cart line, without quantity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: Uuid,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

/// Per-user set of saved products, keyed by `product_id` (no duplicates).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    pub user_id: Uuid,
    pub items: Vec<WishlistItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wishlist {
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self { user_id, items: vec![], created_at: now, updated_at: now }
    }

    pub fn contains(&self, product_id: Uuid) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }

    /// No merge: adding a product that is already saved is a no-op. Returns
    /// whether the item was inserted.
    pub fn add_item(&mut self, item: WishlistItem) -> bool {
        if self.contains(item.product_id) {
            return false;
        }
        self.items.push(item);
        self.touch();
        true
    }

    /// Filter-based removal: succeeds whether or not the product was present.
    pub fn remove_item(&mut self, product_id: Uuid) {
        self.items.retain(|i| i.product_id != product_id);
        self.touch();
    }

    fn touch(&mut self) { self.updated_at = Utc::now(); }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: Uuid) -> WishlistItem {
        WishlistItem { product_id, name: "Widget".into(), price: Decimal::new(100, 0), image_ref: None }
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let p1 = Uuid::new_v4();
        let mut wishlist = Wishlist::new(Uuid::new_v4());
        assert!(wishlist.add_item(item(p1)));
        assert!(!wishlist.add_item(item(p1)));
        assert_eq!(wishlist.items.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let p1 = Uuid::new_v4();
        let mut wishlist = Wishlist::new(Uuid::new_v4());
        wishlist.add_item(item(p1));
        wishlist.remove_item(p1);
        wishlist.remove_item(p1);
        assert!(wishlist.items.is_empty());
    }
}
