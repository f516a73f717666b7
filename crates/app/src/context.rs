//! Application context.
//!
//! Owns the wired service graph behind trait objects so callers and
//! tests depend on behaviour, not on concrete storage.

use std::sync::Arc;

use crate::{
    cache::InMemoryCache,
    config::CartStoreConfig,
    domain::{
        campaigns::{
            memory::InMemoryCampaignsRepository, repository::CampaignsRepository,
            service::CampaignAdminService, CampaignsService,
        },
        carts::{service::CachedCartsService, CartsService},
        checkout::{service::DefaultCheckoutService, CheckoutService},
        orders::{memory::InMemoryOrdersRepository, OrdersRepository},
        payments::AlwaysApproveGateway,
        pricing::{service::CampaignPricingService, PricingService},
        products::{memory::InMemoryProductsRepository, ProductsRepository},
    },
};

/// The assembled application.
pub struct AppContext {
    /// Product catalogue
    pub products: Arc<dyn ProductsRepository>,

    /// Campaign storage
    pub campaign_repository: Arc<dyn CampaignsRepository>,

    /// Campaign administration
    pub campaigns: Arc<dyn CampaignsService>,

    /// Cart store
    pub carts: Arc<dyn CartsService>,

    /// Display pricing
    pub pricing: Arc<dyn PricingService>,

    /// Checkout orchestration
    pub checkout: Arc<dyn CheckoutService>,

    /// Order storage
    pub orders: Arc<dyn OrdersRepository>,
}

impl AppContext {
    /// Wire everything to in-memory storage and an auto-approving
    /// payment gateway.
    #[must_use]
    pub fn in_memory(config: CartStoreConfig) -> Self {
        let products: Arc<InMemoryProductsRepository> = Arc::new(InMemoryProductsRepository::new());
        let campaign_repository = Arc::new(InMemoryCampaignsRepository::new());
        let orders = Arc::new(InMemoryOrdersRepository::new());

        let campaigns = Arc::new(CampaignAdminService::new(
            campaign_repository.clone(),
            products.clone(),
        ));

        let carts = Arc::new(CachedCartsService::new(
            Arc::new(InMemoryCache::new()),
            products.clone(),
            campaign_repository.clone(),
            config,
        ));

        let pricing = Arc::new(CampaignPricingService::new(campaign_repository.clone()));

        let checkout = Arc::new(DefaultCheckoutService::new(
            carts.clone(),
            products.clone(),
            orders.clone(),
            Arc::new(AlwaysApproveGateway),
        ));

        Self {
            products,
            campaign_repository,
            campaigns,
            carts,
            pricing,
            checkout,
            orders,
        }
    }
}
