//! Carts service errors.

use bazaar_engine::products::ProductId;
use thiserror::Error;

use crate::{
    cache::CacheError,
    domain::{
        campaigns::repository::CampaignsRepositoryError, products::ProductsRepositoryError,
    },
};

/// Failures from cart reads and mutations.
#[derive(Debug, Error)]
pub enum CartsServiceError {
    /// The product does not exist or is not purchasable.
    #[error("product not found")]
    ProductNotFound,

    /// Stock cannot cover the requested quantity.
    #[error("insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Product that ran short
        product_id: ProductId,
        /// Units the cart asked for
        requested: u32,
        /// Units actually in stock
        available: u32,
    },

    /// The cart holds no line for the product.
    #[error("cart item not found")]
    CartItemNotFound,

    /// A cached cart entry could not be decoded.
    #[error("corrupt cart entry")]
    Corrupt(#[from] serde_json::Error),

    /// Cache infrastructure failure.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Product store failure during validation.
    #[error(transparent)]
    Products(#[from] ProductsRepositoryError),

    /// Campaign store failure during recomputation.
    #[error(transparent)]
    Campaigns(#[from] CampaignsRepositoryError),
}
