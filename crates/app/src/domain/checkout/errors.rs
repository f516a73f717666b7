//! Checkout errors.

use bazaar_engine::products::ProductId;
use thiserror::Error;

use crate::domain::{
    carts::CartsServiceError,
    orders::OrdersRepositoryError,
    payments::PaymentGatewayError,
    products::ProductsRepositoryError,
};

/// Failures from the checkout flow. Any of these before order creation
/// leaves the cart untouched so the user can retry.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to buy.
    #[error("cart is empty")]
    EmptyCart,

    /// A cart line's product no longer exists.
    #[error("product not found")]
    ProductNotFound,

    /// A cart line's quantity exceeds current stock; the first offending
    /// item is named.
    #[error("insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Product that ran short
        product_id: ProductId,
        /// Units the cart asked for
        requested: u32,
        /// Units actually in stock
        available: u32,
    },

    /// The gateway refused the charge.
    #[error("payment declined: {message}")]
    PaymentDeclined {
        /// Gateway-provided reason
        message: String,
    },

    /// Cart store failure.
    #[error(transparent)]
    Cart(#[from] CartsServiceError),

    /// Product store failure.
    #[error(transparent)]
    Products(#[from] ProductsRepositoryError),

    /// Gateway infrastructure failure, distinct from a decline.
    #[error(transparent)]
    Gateway(#[from] PaymentGatewayError),

    /// Order store failure.
    #[error(transparent)]
    Orders(#[from] OrdersRepositoryError),
}
