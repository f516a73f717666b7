//! Pricing service.
//!
//! Stateless display pricing for listing and detail pages. Every call
//! re-reads campaign state fresh; any HTTP-level caching belongs to the
//! caller, not this service.

use std::sync::Arc;

use async_trait::async_trait;
use bazaar_engine::{
    pricing::{PricedProduct, price_with_discount},
    products::Product,
};
use jiff::Timestamp;
use mockall::automock;
use thiserror::Error;

use crate::domain::campaigns::repository::{CampaignsRepository, CampaignsRepositoryError};

/// Failures from display pricing.
#[derive(Debug, Error)]
pub enum PricingServiceError {
    /// Campaign store failure.
    #[error(transparent)]
    Campaigns(#[from] CampaignsRepositoryError),
}

/// Display pricing for products.
#[automock]
#[async_trait]
pub trait PricingService: Send + Sync {
    /// Price one product against the currently active campaigns.
    async fn price_product(&self, product: Product)
    -> Result<PricedProduct, PricingServiceError>;

    /// Price a listing page's worth of products against one campaign
    /// read, so all rows see a consistent campaign set.
    async fn price_products(
        &self,
        products: Vec<Product>,
    ) -> Result<Vec<PricedProduct>, PricingServiceError>;
}

/// [`PricingService`] over the campaign store.
pub struct CampaignPricingService {
    campaigns: Arc<dyn CampaignsRepository>,
}

impl CampaignPricingService {
    /// Wire the service to the campaign store.
    pub fn new(campaigns: Arc<dyn CampaignsRepository>) -> Self {
        Self { campaigns }
    }
}

#[async_trait]
impl PricingService for CampaignPricingService {
    async fn price_product(
        &self,
        product: Product,
    ) -> Result<PricedProduct, PricingServiceError> {
        let now = Timestamp::now();
        let campaigns = self.campaigns.find_effectively_active(now).await?;

        Ok(price_with_discount(product, &campaigns, now))
    }

    async fn price_products(
        &self,
        products: Vec<Product>,
    ) -> Result<Vec<PricedProduct>, PricingServiceError> {
        let now = Timestamp::now();
        let campaigns = self.campaigns.find_effectively_active(now).await?;

        Ok(products
            .into_iter()
            .map(|product| price_with_discount(product, &campaigns, now))
            .collect())
    }
}
