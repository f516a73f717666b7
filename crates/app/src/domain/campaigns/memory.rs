//! In-memory campaigns repository.

use std::sync::RwLock;

use async_trait::async_trait;
use bazaar_engine::campaigns::{Campaign, CampaignId, CampaignScope};
use jiff::Timestamp;
use rustc_hash::FxHashMap;

use crate::domain::campaigns::repository::{CampaignsRepository, CampaignsRepositoryError};

/// Campaign store backed by a hash map; used for wiring and tests.
#[derive(Default)]
pub struct InMemoryCampaignsRepository {
    campaigns: RwLock<FxHashMap<CampaignId, Campaign>>,
}

impl InMemoryCampaignsRepository {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> CampaignsRepositoryError {
        CampaignsRepositoryError::Storage("campaign store lock poisoned".to_string())
    }
}

#[async_trait]
impl CampaignsRepository for InMemoryCampaignsRepository {
    async fn find_by_id(
        &self,
        id: CampaignId,
    ) -> Result<Option<Campaign>, CampaignsRepositoryError> {
        let campaigns = self.campaigns.read().map_err(|_| Self::poisoned())?;

        Ok(campaigns.get(&id).cloned())
    }

    async fn find_effectively_active(
        &self,
        now: Timestamp,
    ) -> Result<Vec<Campaign>, CampaignsRepositoryError> {
        let campaigns = self.campaigns.read().map_err(|_| Self::poisoned())?;

        Ok(campaigns
            .values()
            .filter(|campaign| campaign.is_effectively_active(now))
            .cloned()
            .collect())
    }

    async fn find_by_scope(
        &self,
        scope: CampaignScope,
    ) -> Result<Vec<Campaign>, CampaignsRepositoryError> {
        let campaigns = self.campaigns.read().map_err(|_| Self::poisoned())?;

        Ok(campaigns
            .values()
            .filter(|campaign| campaign.scope == scope)
            .cloned()
            .collect())
    }

    async fn upsert(&self, campaign: Campaign) -> Result<(), CampaignsRepositoryError> {
        let mut campaigns = self.campaigns.write().map_err(|_| Self::poisoned())?;
        campaigns.insert(campaign.id, campaign);

        Ok(())
    }

    async fn delete(&self, id: CampaignId) -> Result<(), CampaignsRepositoryError> {
        let mut campaigns = self.campaigns.write().map_err(|_| Self::poisoned())?;
        campaigns.remove(&id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bazaar_engine::campaigns::DiscountRule;
    use bazaar_engine::ids::SellerId;
    use testresult::TestResult;

    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap_or_default()
    }

    fn campaign(scope: CampaignScope, is_active: bool) -> Campaign {
        Campaign::new(
            CampaignId::now_v7(),
            "Sale",
            scope,
            DiscountRule::Percentage(10),
            ts("2026-01-01T00:00:00Z"),
            ts("2026-02-01T00:00:00Z"),
        )
        .map(|c| c.with_active(is_active))
        .unwrap_or_else(|_| unreachable!("fixture campaign is valid"))
    }

    #[tokio::test]
    async fn effectively_active_honours_toggle_and_window() -> TestResult {
        let repo = InMemoryCampaignsRepository::new();

        repo.upsert(campaign(CampaignScope::Platform, true)).await?;
        repo.upsert(campaign(CampaignScope::Platform, false)).await?;

        let inside = repo
            .find_effectively_active(ts("2026-01-15T00:00:00Z"))
            .await?;
        let outside = repo
            .find_effectively_active(ts("2026-06-01T00:00:00Z"))
            .await?;

        assert_eq!(inside.len(), 1);
        assert!(outside.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn find_by_scope_separates_owners() -> TestResult {
        let repo = InMemoryCampaignsRepository::new();
        let seller = SellerId::now_v7();

        repo.upsert(campaign(CampaignScope::Platform, true)).await?;
        repo.upsert(campaign(CampaignScope::Seller(seller), true))
            .await?;

        let platform = repo.find_by_scope(CampaignScope::Platform).await?;
        let sellers = repo.find_by_scope(CampaignScope::Seller(seller)).await?;

        assert_eq!(platform.len(), 1);
        assert_eq!(sellers.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_the_campaign() -> TestResult {
        let repo = InMemoryCampaignsRepository::new();
        let value = campaign(CampaignScope::Platform, true);
        let id = value.id;

        repo.upsert(value).await?;
        repo.delete(id).await?;

        assert_eq!(repo.find_by_id(id).await?, None);

        Ok(())
    }
}
