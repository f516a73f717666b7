//! Products

use serde::{Deserialize, Serialize};

use crate::ids::{CategoryId, SellerId, TypedUuid};

/// Product UUID
pub type ProductId = TypedUuid<Product>;

/// An immutable product snapshot, fetched fresh per computation.
///
/// Price is in minor units. Updates go through `with_*` functions that
/// return a new value rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product UUID
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Category the product is listed under
    pub category_id: CategoryId,

    /// Seller who listed the product
    pub seller_id: SellerId,

    /// Unit price in minor units
    pub price: u64,

    /// Units currently in stock
    pub stock: u32,

    /// Whether the product is purchasable
    pub is_active: bool,
}

impl Product {
    /// Return a copy of this product with the given stock level.
    #[must_use]
    pub fn with_stock(&self, stock: u32) -> Self {
        Self {
            stock,
            ..self.clone()
        }
    }

    /// Return a copy with stock reduced by `quantity`, floored at zero.
    #[must_use]
    pub fn with_stock_reduced_by(&self, quantity: u32) -> Self {
        self.with_stock(self.stock.saturating_sub(quantity))
    }
}
