//! Campaign administration inputs.

use bazaar_engine::{
    campaigns::DiscountRule,
    ids::{CategoryId, SellerId},
    products::ProductId,
};
use jiff::Timestamp;

/// Who is administering a campaign.
///
/// Admins create platform-wide campaigns and may manage any campaign;
/// sellers create campaigns scoped to themselves and manage only those.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignActor {
    /// Platform administrator.
    Admin,

    /// A seller acting on their own behalf.
    Seller(SellerId),
}

/// Input for creating a campaign. The scope comes from the actor, not
/// the draft.
#[derive(Debug, Clone)]
pub struct CampaignDraft {
    /// Display name, unique per owner
    pub name: String,

    /// Discount rule
    pub discount: DiscountRule,

    /// Window start; must not be in the past at creation
    pub starts_at: Timestamp,

    /// Window end; must fall after the start
    pub ends_at: Timestamp,

    /// Explicit product scope; empty means unrestricted
    pub product_ids: Vec<ProductId>,

    /// Explicit category scope; empty means unrestricted
    pub category_ids: Vec<CategoryId>,

    /// Minimum applicable subtotal in minor units
    pub min_order_amount: u64,

    /// Cap on the discount contribution in minor units
    pub max_discount_amount: Option<u64>,
}

impl CampaignDraft {
    /// A draft with an unrestricted scope and no thresholds.
    pub fn new(
        name: impl Into<String>,
        discount: DiscountRule,
        starts_at: Timestamp,
        ends_at: Timestamp,
    ) -> Self {
        Self {
            name: name.into(),
            discount,
            starts_at,
            ends_at,
            product_ids: Vec::new(),
            category_ids: Vec::new(),
            min_order_amount: 0,
            max_discount_amount: None,
        }
    }
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct CampaignUpdate {
    /// New display name
    pub name: Option<String>,

    /// New discount rule
    pub discount: Option<DiscountRule>,

    /// New window, start and end together
    pub window: Option<(Timestamp, Timestamp)>,

    /// Replacement product scope
    pub product_ids: Option<Vec<ProductId>>,

    /// Replacement category scope
    pub category_ids: Option<Vec<CategoryId>>,

    /// New minimum applicable subtotal
    pub min_order_amount: Option<u64>,

    /// New discount cap
    pub max_discount_amount: Option<u64>,
}
