//! Domain model: aggregates and the events they give rise to.

pub mod aggregates;
pub mod events;

pub use aggregates::{Cart, CartError, CartLine, Order, OrderError, Wishlist, WishlistItem};
