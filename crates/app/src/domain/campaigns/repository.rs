//! Campaigns repository seam.

use async_trait::async_trait;
use bazaar_engine::campaigns::{Campaign, CampaignId, CampaignScope};
use jiff::Timestamp;
use mockall::automock;
use thiserror::Error;

/// Infrastructure failures from a campaign store.
#[derive(Debug, Error)]
pub enum CampaignsRepositoryError {
    /// The backing store failed; surfaced, never swallowed.
    #[error("campaign storage error: {0}")]
    Storage(String),
}

/// Store of campaign values.
///
/// Reads are eventually consistent with campaign administration; every
/// pricing computation re-reads campaign state fresh rather than holding
/// it across requests.
#[automock]
#[async_trait]
pub trait CampaignsRepository: Send + Sync {
    /// Look a campaign up by id.
    async fn find_by_id(
        &self,
        id: CampaignId,
    ) -> Result<Option<Campaign>, CampaignsRepositoryError>;

    /// Campaigns that are toggled active and inside their window.
    async fn find_effectively_active(
        &self,
        now: Timestamp,
    ) -> Result<Vec<Campaign>, CampaignsRepositoryError>;

    /// All campaigns belonging to one owner (platform or a seller).
    async fn find_by_scope(
        &self,
        scope: CampaignScope,
    ) -> Result<Vec<Campaign>, CampaignsRepositoryError>;

    /// Insert or replace a campaign value.
    async fn upsert(&self, campaign: Campaign) -> Result<(), CampaignsRepositoryError>;

    /// Remove a campaign.
    async fn delete(&self, id: CampaignId) -> Result<(), CampaignsRepositoryError>;
}
