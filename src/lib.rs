//! Storefront Backend
//!
//! REST backend for a small storefront: per-user shopping carts, wishlists
//! and order checkout over PostgreSQL.
//!
//! ## Features
//! - Shopping cart with merge-on-insert line items and snapshot pricing
//! - Wishlist (saved products, no quantities, no duplicates)
//! - Checkout producing immutable orders and emptying the cart atomically
//! - Newest-first order history per user

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{ApiError, Result};
pub use state::AppState;
