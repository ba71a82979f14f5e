//! Cached catalog response values.

use pawcart_core::Product;

use crate::catalog::ProductPage;

/// Values stored in the catalog cache.
///
/// Products are boxed to keep the enum small; pages are cloned wholesale.
#[derive(Clone)]
pub(crate) enum CacheValue {
    Product(Box<Product>),
    Products(ProductPage),
}
