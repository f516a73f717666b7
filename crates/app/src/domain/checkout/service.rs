//! Checkout service.
//!
//! Orchestrates `read cart → validate stock → pay → create order →
//! reduce stock → clear cart`. The boundary is deliberately
//! non-transactional: failures before order creation leave the cart
//! untouched; failures after it are logged and do not roll the order
//! back.

use std::sync::Arc;

use async_trait::async_trait;
use bazaar_engine::{cart::Cart, ids::UserId};
use jiff::Timestamp;
use mockall::automock;
use tracing::{error, info};

use crate::domain::{
    carts::CartsService,
    checkout::errors::CheckoutError,
    orders::{
        models::{Order, OrderId, ShippingInfo},
        repository::OrdersRepository,
    },
    payments::{PaymentGateway, PaymentMethod, PaymentOutcome},
    products::ProductsRepository,
};

/// What the buyer gets back from a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    /// The created order
    pub order_id: OrderId,

    /// Amount charged, minor units
    pub total: u64,

    /// Gateway transaction reference
    pub transaction_id: String,
}

/// Turns a cart into an order.
#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Check the user's cart out.
    async fn checkout(
        &self,
        user: UserId,
        shipping: ShippingInfo,
        method: PaymentMethod,
    ) -> Result<CheckoutReceipt, CheckoutError>;
}

/// [`CheckoutService`] over the cart store, product catalogue, payment
/// gateway and order store.
pub struct DefaultCheckoutService {
    carts: Arc<dyn CartsService>,
    products: Arc<dyn ProductsRepository>,
    orders: Arc<dyn OrdersRepository>,
    payments: Arc<dyn PaymentGateway>,
}

impl DefaultCheckoutService {
    /// Wire the service to its collaborators.
    pub fn new(
        carts: Arc<dyn CartsService>,
        products: Arc<dyn ProductsRepository>,
        orders: Arc<dyn OrdersRepository>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            carts,
            products,
            orders,
            payments,
        }
    }

    /// Re-read every product and fail fast on the first line whose
    /// quantity exceeds current stock. No partial orders.
    async fn validate_stock(&self, cart: &Cart) -> Result<(), CheckoutError> {
        for item in &cart.items {
            let product = self
                .products
                .find_by_id(item.product_id)
                .await?
                .ok_or(CheckoutError::ProductNotFound)?;

            if product.stock < item.quantity {
                return Err(CheckoutError::InsufficientStock {
                    product_id: item.product_id,
                    requested: item.quantity,
                    available: product.stock,
                });
            }
        }

        Ok(())
    }

    /// Decrement stock for every ordered line, floored at zero. Runs
    /// after order creation; failures are logged and do not roll the
    /// order back.
    async fn reduce_stock(&self, order: &Order) {
        for item in &order.items {
            let result = async {
                let Some(product) = self.products.find_by_id(item.product_id).await? else {
                    return Ok(());
                };

                self.products
                    .save(product.with_stock_reduced_by(item.quantity))
                    .await
            }
            .await;

            if let Err(err) = result {
                error!(
                    order_id = %order.id,
                    product_id = %item.product_id,
                    error = %err,
                    "stock reduction failed after order creation"
                );
            }
        }
    }
}

#[async_trait]
impl CheckoutService for DefaultCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.checkout",
        skip(self, shipping),
        fields(user_id = %user),
        err
    )]
    async fn checkout(
        &self,
        user: UserId,
        shipping: ShippingInfo,
        method: PaymentMethod,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let cart = self.carts.get_cart(user).await?;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.validate_stock(&cart).await?;

        let transaction_id = match self.payments.charge(cart.total, method).await? {
            PaymentOutcome::Approved { transaction_id } => transaction_id,
            PaymentOutcome::Declined { message } => {
                return Err(CheckoutError::PaymentDeclined { message });
            }
        };

        let order = Order::from_cart(
            OrderId::now_v7(),
            &cart,
            shipping,
            transaction_id.clone(),
            Timestamp::now(),
        );

        self.orders.create(order.clone()).await?;

        info!(order_id = %order.id, total = order.total, "created order");

        self.reduce_stock(&order).await;

        // The cart goes only after the order is durably created; a
        // failure here strands a stale cart, not a lost order.
        if let Err(err) = self.carts.clear_cart(user).await {
            error!(order_id = %order.id, error = %err, "cart clear failed after order creation");
        }

        Ok(CheckoutReceipt {
            order_id: order.id,
            total: order.total,
            transaction_id,
        })
    }
}
