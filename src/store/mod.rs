//! Persistence over PostgreSQL.
//!
//! Carts and wishlists are stored as one JSONB document per user. Every
//! mutation runs in its own transaction: lock the row with `FOR UPDATE`,
//! apply the aggregate operation, write the document back. Racing calls for
//! the same user serialize on the row lock, so each call's read-then-write
//! is atomic.

pub mod cart;
pub mod orders;
pub mod wishlist;

pub use cart::CartStore;
pub use orders::OrderStore;
pub use wishlist::WishlistStore;
