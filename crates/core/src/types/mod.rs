//! Shared type definitions.

mod address;
mod discount;
mod id;
mod order;
mod price;
mod product;
mod status;
mod tax;

pub use address::Address;
pub use discount::Discount;
pub use id::{DiscountId, OrderId, ProductId, RefundId};
pub use order::{
    Logistics, Order, OrderItem, PaymentInfo, PriceBreakdown, RefundInfo, ReturnRequest,
};
pub use price::Price;
pub use product::Product;
pub use status::{
    DiscountType, OrderStatus, PaymentMethod, PaymentStatus, RefundStatus, ReturnStatus,
};
pub use tax::TaxConfig;
