//! Domain models for the storefront.

pub mod cart;
pub mod session;

pub use cart::{Cart, CartItem, CartTotals};
pub use session::{CurrentCustomer, keys as session_keys};
