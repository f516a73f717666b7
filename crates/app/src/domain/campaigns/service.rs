//! Campaigns service.

use std::sync::Arc;

use async_trait::async_trait;
use bazaar_engine::{
    campaigns::{Campaign, CampaignId, CampaignScope, CampaignValidationError},
    ids::SellerId,
    products::ProductId,
};
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::domain::{
    campaigns::{
        data::{CampaignActor, CampaignDraft, CampaignUpdate},
        errors::CampaignsServiceError,
        repository::CampaignsRepository,
    },
    products::ProductsRepository,
};

/// Campaign administration: creation, updates, toggling and deletion,
/// with ownership and consistency checks.
#[automock]
#[async_trait]
pub trait CampaignsService: Send + Sync {
    /// Create a campaign scoped to the actor.
    async fn create_campaign(
        &self,
        actor: CampaignActor,
        draft: CampaignDraft,
    ) -> Result<Campaign, CampaignsServiceError>;

    /// Apply a partial update to an existing campaign.
    async fn update_campaign(
        &self,
        actor: CampaignActor,
        id: CampaignId,
        update: CampaignUpdate,
    ) -> Result<Campaign, CampaignsServiceError>;

    /// Toggle a campaign on or off.
    async fn set_active(
        &self,
        actor: CampaignActor,
        id: CampaignId,
        is_active: bool,
    ) -> Result<Campaign, CampaignsServiceError>;

    /// Delete a campaign; refused while it is effectively active.
    async fn delete_campaign(
        &self,
        actor: CampaignActor,
        id: CampaignId,
    ) -> Result<(), CampaignsServiceError>;

    /// Campaigns currently in effect.
    async fn list_active(&self, now: Timestamp) -> Result<Vec<Campaign>, CampaignsServiceError>;
}

/// [`CampaignsService`] over a campaign store, with product-ownership
/// checks against the product catalogue.
pub struct CampaignAdminService {
    campaigns: Arc<dyn CampaignsRepository>,
    products: Arc<dyn ProductsRepository>,
}

impl CampaignAdminService {
    /// Wire the service to its stores.
    pub fn new(
        campaigns: Arc<dyn CampaignsRepository>,
        products: Arc<dyn ProductsRepository>,
    ) -> Self {
        Self {
            campaigns,
            products,
        }
    }

    fn scope_for(actor: CampaignActor) -> CampaignScope {
        match actor {
            CampaignActor::Admin => CampaignScope::Platform,
            CampaignActor::Seller(seller_id) => CampaignScope::Seller(seller_id),
        }
    }

    fn ensure_can_manage(
        actor: CampaignActor,
        campaign: &Campaign,
    ) -> Result<(), CampaignsServiceError> {
        match (actor, campaign.scope) {
            (CampaignActor::Admin, _) => Ok(()),
            (CampaignActor::Seller(seller), CampaignScope::Seller(owner)) if seller == owner => {
                Ok(())
            }
            _ => Err(CampaignsServiceError::NotPermitted),
        }
    }

    /// Names are unique per owner, so two sellers may both run a
    /// "Summer sale" without colliding.
    async fn ensure_name_free(
        &self,
        scope: CampaignScope,
        name: &str,
        exclude: Option<CampaignId>,
    ) -> Result<(), CampaignsServiceError> {
        let siblings = self.campaigns.find_by_scope(scope).await?;

        let conflict = siblings
            .iter()
            .any(|existing| existing.name == name && Some(existing.id) != exclude);

        if conflict {
            return Err(CampaignsServiceError::NameConflict);
        }

        Ok(())
    }

    /// A seller campaign may only list that seller's own products. An
    /// unknown product id counts as not owned.
    async fn ensure_products_owned(
        &self,
        seller: SellerId,
        product_ids: &[ProductId],
    ) -> Result<(), CampaignsServiceError> {
        for product_id in product_ids {
            let owned = self
                .products
                .find_by_id(*product_id)
                .await?
                .is_some_and(|product| product.seller_id == seller);

            if !owned {
                return Err(CampaignsServiceError::ProductNotOwnedBySeller);
            }
        }

        Ok(())
    }

    async fn load(&self, id: CampaignId) -> Result<Campaign, CampaignsServiceError> {
        self.campaigns
            .find_by_id(id)
            .await?
            .ok_or(CampaignsServiceError::NotFound)
    }
}

#[async_trait]
impl CampaignsService for CampaignAdminService {
    #[tracing::instrument(
        name = "campaigns.service.create_campaign",
        skip(self, draft),
        fields(campaign_name = %draft.name),
        err
    )]
    async fn create_campaign(
        &self,
        actor: CampaignActor,
        draft: CampaignDraft,
    ) -> Result<Campaign, CampaignsServiceError> {
        if draft.starts_at < Timestamp::now() {
            return Err(CampaignValidationError::InvalidDates.into());
        }

        let scope = Self::scope_for(actor);

        let campaign = Campaign::new(
            CampaignId::now_v7(),
            draft.name.clone(),
            scope,
            draft.discount,
            draft.starts_at,
            draft.ends_at,
        )?;

        self.ensure_name_free(scope, &draft.name, None).await?;

        if let CampaignActor::Seller(seller) = actor {
            self.ensure_products_owned(seller, &draft.product_ids)
                .await?;
        }

        let mut campaign = campaign
            .with_products(draft.product_ids)
            .with_categories(draft.category_ids)
            .with_min_order_amount(draft.min_order_amount);

        if let Some(max) = draft.max_discount_amount {
            campaign = campaign.with_max_discount_amount(max);
        }

        self.campaigns.upsert(campaign.clone()).await?;

        info!(campaign_id = %campaign.id, "created campaign");

        Ok(campaign)
    }

    #[tracing::instrument(
        name = "campaigns.service.update_campaign",
        skip(self, update),
        fields(campaign_id = %id),
        err
    )]
    async fn update_campaign(
        &self,
        actor: CampaignActor,
        id: CampaignId,
        update: CampaignUpdate,
    ) -> Result<Campaign, CampaignsServiceError> {
        let mut campaign = self.load(id).await?;

        Self::ensure_can_manage(actor, &campaign)?;

        if let Some(name) = update.name {
            self.ensure_name_free(campaign.scope, &name, Some(id))
                .await?;
            campaign.name = name;
        }

        if let Some((starts_at, ends_at)) = update.window {
            campaign = campaign.with_window(starts_at, ends_at)?;
        }

        if let Some(discount) = update.discount {
            campaign = campaign.with_discount(discount)?;
        }

        if let Some(product_ids) = update.product_ids {
            if let CampaignScope::Seller(seller) = campaign.scope {
                self.ensure_products_owned(seller, &product_ids).await?;
            }

            campaign = campaign.with_products(product_ids);
        }

        if let Some(category_ids) = update.category_ids {
            campaign = campaign.with_categories(category_ids);
        }

        if let Some(amount) = update.min_order_amount {
            campaign = campaign.with_min_order_amount(amount);
        }

        if let Some(amount) = update.max_discount_amount {
            campaign = campaign.with_max_discount_amount(amount);
        }

        self.campaigns.upsert(campaign.clone()).await?;

        Ok(campaign)
    }

    async fn set_active(
        &self,
        actor: CampaignActor,
        id: CampaignId,
        is_active: bool,
    ) -> Result<Campaign, CampaignsServiceError> {
        let campaign = self.load(id).await?;

        Self::ensure_can_manage(actor, &campaign)?;

        let campaign = campaign.with_active(is_active);
        self.campaigns.upsert(campaign.clone()).await?;

        Ok(campaign)
    }

    #[tracing::instrument(
        name = "campaigns.service.delete_campaign",
        skip(self),
        fields(campaign_id = %id),
        err
    )]
    async fn delete_campaign(
        &self,
        actor: CampaignActor,
        id: CampaignId,
    ) -> Result<(), CampaignsServiceError> {
        let campaign = self.load(id).await?;

        Self::ensure_can_manage(actor, &campaign)?;

        if !campaign.is_deletable(Timestamp::now()) {
            return Err(CampaignsServiceError::CurrentlyActive);
        }

        self.campaigns.delete(id).await?;

        info!(campaign_id = %id, "deleted campaign");

        Ok(())
    }

    async fn list_active(&self, now: Timestamp) -> Result<Vec<Campaign>, CampaignsServiceError> {
        Ok(self.campaigns.find_effectively_active(now).await?)
    }
}
