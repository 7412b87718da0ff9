//! Aggregates module
pub mod cart;
pub mod order;
pub mod wishlist;

pub use cart::{Cart, CartError, CartLine};
pub use order::{Order, OrderError};
pub use wishlist::{Wishlist, WishlistItem};
