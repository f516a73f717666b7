//! Campaigns service errors.

use bazaar_engine::campaigns::CampaignValidationError;
use thiserror::Error;

use crate::domain::{
    campaigns::repository::CampaignsRepositoryError, products::ProductsRepositoryError,
};

/// Failures from campaign administration.
#[derive(Debug, Error)]
pub enum CampaignsServiceError {
    /// No campaign with the given id visible to the actor.
    #[error("campaign not found")]
    NotFound,

    /// Invalid dates or discount value, from the engine's validation.
    #[error(transparent)]
    Validation(#[from] CampaignValidationError),

    /// Another campaign of the same owner already carries this name.
    #[error("a campaign with this name already exists for this owner")]
    NameConflict,

    /// A seller tried to scope a campaign to a product they do not own.
    #[error("campaign scope includes a product not owned by the seller")]
    ProductNotOwnedBySeller,

    /// The actor may not manage this campaign.
    #[error("actor is not permitted to manage this campaign")]
    NotPermitted,

    /// Deletion refused while the campaign is effectively active.
    #[error("campaign is currently in its active window")]
    CurrentlyActive,

    /// Campaign store failure.
    #[error(transparent)]
    Storage(#[from] CampaignsRepositoryError),

    /// Product store failure during ownership checks.
    #[error(transparent)]
    Products(#[from] ProductsRepositoryError),
}
