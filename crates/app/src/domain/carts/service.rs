//! Carts service.
//!
//! Carts live only in the TTL cache, keyed by user: they are created
//! lazily on first mutation and expire wholesale when untouched. Every
//! mutation validates stock, recomputes totals against fresh campaign
//! state, and writes the whole snapshot back with the TTL reset — there
//! is no cart-level transaction log.

use std::sync::Arc;

use async_trait::async_trait;
use bazaar_engine::{
    cart::{Cart, CartItem},
    ids::UserId,
    products::{Product, ProductId},
    stacking::recompute_totals,
};
use jiff::Timestamp;
use mockall::automock;
use tracing::debug;

use crate::{
    cache::Cache,
    config::CartStoreConfig,
    domain::{
        campaigns::repository::CampaignsRepository, carts::errors::CartsServiceError,
        products::ProductsRepository,
    },
};

/// Cart reads and mutations, all returning the freshly computed cart.
#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The user's cart; an empty cart when none is stored.
    async fn get_cart(&self, user: UserId) -> Result<Cart, CartsServiceError>;

    /// Add a product, merging quantity into an existing line.
    async fn add_item(
        &self,
        user: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Set a line's quantity; zero removes the line.
    async fn update_item(
        &self,
        user: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove a line entirely.
    async fn remove_item(
        &self,
        user: UserId,
        product_id: ProductId,
    ) -> Result<Cart, CartsServiceError>;

    /// Drop the cart from the store.
    async fn clear_cart(&self, user: UserId) -> Result<(), CartsServiceError>;
}

/// [`CartsService`] over a TTL cache, a product catalogue and a campaign
/// store.
pub struct CachedCartsService {
    cache: Arc<dyn Cache>,
    products: Arc<dyn ProductsRepository>,
    campaigns: Arc<dyn CampaignsRepository>,
    config: CartStoreConfig,
}

impl CachedCartsService {
    /// Wire the service to its collaborators.
    pub fn new(
        cache: Arc<dyn Cache>,
        products: Arc<dyn ProductsRepository>,
        campaigns: Arc<dyn CampaignsRepository>,
        config: CartStoreConfig,
    ) -> Self {
        Self {
            cache,
            products,
            campaigns,
            config,
        }
    }

    fn cart_key(user: UserId) -> String {
        format!("cart:{user}")
    }

    async fn load(&self, user: UserId) -> Result<Cart, CartsServiceError> {
        match self.cache.get(&Self::cart_key(user)).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Cart::empty(user)),
        }
    }

    /// Recompute totals against fresh campaign state and replace the
    /// stored snapshot, resetting the TTL. The write happens only after
    /// the full recompute completes.
    async fn recompute_and_store(&self, cart: Cart) -> Result<Cart, CartsServiceError> {
        let now = Timestamp::now();
        let campaigns = self.campaigns.find_effectively_active(now).await?;

        let cart = recompute_totals(&cart, &campaigns, now);

        let json = serde_json::to_string(&cart)?;
        self.cache
            .set(&Self::cart_key(cart.user_id), json, self.config.ttl)
            .await?;

        debug!(user_id = %cart.user_id, total = cart.total, "stored cart");

        Ok(cart)
    }

    /// A product must exist, be purchasable and cover the requested
    /// quantity before it lands in a cart.
    async fn validated_product(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Product, CartsServiceError> {
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .filter(|product| product.is_active)
            .ok_or(CartsServiceError::ProductNotFound)?;

        if product.stock < quantity {
            return Err(CartsServiceError::InsufficientStock {
                product_id,
                requested: quantity,
                available: product.stock,
            });
        }

        Ok(product)
    }
}

#[async_trait]
impl CartsService for CachedCartsService {
    async fn get_cart(&self, user: UserId) -> Result<Cart, CartsServiceError> {
        self.load(user).await
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self),
        fields(user_id = %user, product_id = %product_id),
        err
    )]
    async fn add_item(
        &self,
        user: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        let mut cart = self.load(user).await?;

        if quantity == 0 {
            return Ok(cart);
        }

        let line_quantity = cart
            .item(product_id)
            .map_or(quantity, |item| item.quantity.saturating_add(quantity));

        let product = self.validated_product(product_id, line_quantity).await?;

        match cart
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            // The snapshot price of an existing line is kept; only the
            // quantity merges.
            Some(item) => item.quantity = line_quantity,
            None => cart.items.push(CartItem::from_product(&product, quantity)),
        }

        self.recompute_and_store(cart).await
    }

    #[tracing::instrument(
        name = "carts.service.update_item",
        skip(self),
        fields(user_id = %user, product_id = %product_id),
        err
    )]
    async fn update_item(
        &self,
        user: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        let mut cart = self.load(user).await?;

        if cart.item(product_id).is_none() {
            return Err(CartsServiceError::CartItemNotFound);
        }

        if quantity == 0 {
            cart.items.retain(|item| item.product_id != product_id);
        } else {
            self.validated_product(product_id, quantity).await?;

            for item in &mut cart.items {
                if item.product_id == product_id {
                    item.quantity = quantity;
                }
            }
        }

        self.recompute_and_store(cart).await
    }

    async fn remove_item(
        &self,
        user: UserId,
        product_id: ProductId,
    ) -> Result<Cart, CartsServiceError> {
        let mut cart = self.load(user).await?;

        if cart.item(product_id).is_none() {
            return Err(CartsServiceError::CartItemNotFound);
        }

        cart.items.retain(|item| item.product_id != product_id);

        self.recompute_and_store(cart).await
    }

    async fn clear_cart(&self, user: UserId) -> Result<(), CartsServiceError> {
        self.cache.delete(&Self::cart_key(user)).await?;

        Ok(())
    }
}
