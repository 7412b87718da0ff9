//! Order Aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::cart::CartLine;

/// Immutable record produced by checkout. Owns a verbatim copy of the cart's
/// lines and a total frozen at placement time; never updated or deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lines: Vec<CartLine>,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Places an order over the given cart lines. The total is the sum of
    /// snapshot price x quantity over the lines; prices are never re-fetched
    /// from the catalog, so the price the user saw is the price they pay.
    pub fn place(user_id: Uuid, lines: Vec<CartLine>) -> Result<Self, OrderError> {
        if lines.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let total_amount = lines.iter().map(CartLine::line_total).sum();
        Ok(Self { id: Uuid::now_v7(), user_id, lines, total_amount, created_at: Utc::now() })
    }
}

#[derive(Debug, Clone, Error)]
pub enum OrderError {
    #[error("Cart is empty")]
    EmptyCart,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: i64, quantity: u32) -> CartLine {
        CartLine { product_id: Uuid::new_v4(), name: "Widget".into(), price: Decimal::new(price, 0), quantity, image_ref: None }
    }

    #[test]
    fn test_total_is_sum_of_line_totals() {
        let order = Order::place(Uuid::new_v4(), vec![line(100, 5), line(300, 1)]).unwrap();
        assert_eq!(order.total_amount, Decimal::new(800, 0));
    }

    #[test]
    fn test_total_exact_at_minor_unit() {
        let mut a = line(0, 3);
        a.price = Decimal::new(1999, 2); // 19.99
        let mut b = line(0, 7);
        b.price = Decimal::new(1, 2); // 0.01
        let order = Order::place(Uuid::new_v4(), vec![a, b]).unwrap();
        assert_eq!(order.total_amount, Decimal::new(6004, 2)); // 60.04
    }

    #[test]
    fn test_lines_copied_verbatim() {
        let lines = vec![line(100, 2)];
        let order = Order::place(Uuid::new_v4(), lines.clone()).unwrap();
        assert_eq!(order.lines, lines);
    }

    #[test]
    fn test_empty_lines_rejected() {
        assert!(Order::place(Uuid::new_v4(), vec![]).is_err());
    }
}
