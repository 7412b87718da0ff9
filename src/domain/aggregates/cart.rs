//! Cart Aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// One product line in a cart. `name`, `price` and `image_ref` are snapshots
/// taken when the line was first added; they do not track the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Per-user mutable cart. At most one exists per user; no two lines share a
/// `product_id`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user_id: Uuid,
    pub lines: Vec<CartLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self { user_id, lines: vec![], created_at: now, updated_at: now }
    }

    pub fn is_empty(&self) -> bool { self.lines.is_empty() }
    pub fn line_count(&self) -> usize { self.lines.len() }

    /// Merge-on-insert: an existing line for the product accumulates the
    /// quantity and keeps its original snapshot fields.
    pub fn add_line(&mut self, line: CartLine) {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.product_id == line.product_id) {
            existing.quantity += line.quantity;
        } else {
            self.lines.push(line);
        }
        self.touch();
    }

    /// Sets the line's quantity to exactly `quantity` (absolute, not a delta).
    pub fn set_quantity(&mut self, product_id: Uuid, quantity: u32) -> Result<(), CartError> {
        let line = self.lines.iter_mut().find(|l| l.product_id == product_id).ok_or(CartError::LineNotFound)?;
        line.quantity = quantity;
        self.touch();
        Ok(())
    }

    /// Filter-based removal: succeeds whether or not the product was present.
    pub fn remove_line(&mut self, product_id: Uuid) {
        self.lines.retain(|l| l.product_id != product_id);
        self.touch();
    }

    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Drops every line, keeping the cart itself. Checkout uses this so that
    /// "has an empty cart" stays distinct from "never had a cart".
    pub fn empty_lines(&mut self) {
        self.lines.clear();
        self.touch();
    }

    fn touch(&mut self) { self.updated_at = Utc::now(); }
}

#[derive(Debug, Clone, Error)]
pub enum CartError {
    #[error("Product not in cart")]
    LineNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: Uuid, price: i64, quantity: u32) -> CartLine {
        CartLine { product_id, name: "Widget".into(), price: Decimal::new(price, 0), quantity, image_ref: None }
    }

    #[test]
    fn test_add_merges_same_product() {
        let p1 = Uuid::new_v4();
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_line(line(p1, 100, 2));
        cart.add_line(line(p1, 100, 3));
        assert_eq!(cart.line_count(), 1); // Merged
        assert_eq!(cart.lines[0].quantity, 5);
    }

    #[test]
    fn test_merge_keeps_original_snapshot() {
        let p1 = Uuid::new_v4();
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_line(line(p1, 100, 1));
        let mut later = line(p1, 250, 1);
        later.name = "Renamed Widget".into();
        cart.add_line(later);
        assert_eq!(cart.lines[0].price, Decimal::new(100, 0));
        assert_eq!(cart.lines[0].name, "Widget");
        assert_eq!(cart.lines[0].quantity, 2);
    }

    #[test]
    fn test_set_quantity_is_absolute() {
        let p1 = Uuid::new_v4();
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_line(line(p1, 100, 2));
        cart.set_quantity(p1, 7).unwrap();
        assert_eq!(cart.lines[0].quantity, 7);
    }

    #[test]
    fn test_set_quantity_unknown_product() {
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_line(line(Uuid::new_v4(), 100, 1));
        assert!(cart.set_quantity(Uuid::new_v4(), 3).is_err());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let p1 = Uuid::new_v4();
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_line(line(p1, 100, 1));
        cart.remove_line(Uuid::new_v4());
        assert_eq!(cart.line_count(), 1);
        cart.remove_line(p1);
        cart.remove_line(p1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal() {
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_line(line(Uuid::new_v4(), 100, 5));
        cart.add_line(line(Uuid::new_v4(), 300, 1));
        assert_eq!(cart.subtotal(), Decimal::new(800, 0));
    }

    #[test]
    fn test_empty_lines_keeps_cart() {
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_line(line(Uuid::new_v4(), 100, 1));
        cart.empty_lines();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }
}
