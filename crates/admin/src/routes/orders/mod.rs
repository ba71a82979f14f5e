//! Order management route handlers.

pub mod actions;
pub mod detail;
pub mod list;
