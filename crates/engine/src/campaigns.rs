//! Campaigns
//!
//! A campaign is a time-boxed promotional rule producing a discount on a
//! scoped set of products. Campaigns are immutable values: updates go
//! through `with_*` functions returning new instances, and the active
//! window is derived from the stored dates rather than stored itself.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::CartItem,
    ids::{CategoryId, SellerId, TypedUuid},
    products::{Product, ProductId},
};

/// Campaign UUID
pub type CampaignId = TypedUuid<Campaign>;

/// Errors raised when constructing or updating a campaign.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CampaignValidationError {
    /// The end date does not fall after the start date.
    #[error("campaign end date must be after its start date")]
    InvalidDates,

    /// Percentage out of `1..=100`, or a zero fixed amount.
    #[error("campaign discount value is out of range")]
    InvalidDiscountValue,
}

/// Who a campaign belongs to, and therefore which products it may cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignScope {
    /// Platform-wide campaign, created by an admin.
    Platform,

    /// Campaign restricted to one seller's own products.
    Seller(SellerId),
}

/// How a campaign's discount is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountRule {
    /// Percent off, in whole percentage points (`1..=100`).
    Percentage(u8),

    /// Fixed amount off, in minor units (`> 0`).
    Fixed(u64),
}

impl DiscountRule {
    /// Check the discount value is within its legal range.
    ///
    /// # Errors
    ///
    /// Returns [`CampaignValidationError::InvalidDiscountValue`] for a
    /// percentage outside `1..=100` or a zero fixed amount.
    pub fn validate(&self) -> Result<(), CampaignValidationError> {
        match self {
            DiscountRule::Percentage(value) if (1..=100).contains(value) => Ok(()),
            DiscountRule::Fixed(value) if *value > 0 => Ok(()),
            DiscountRule::Percentage(_) | DiscountRule::Fixed(_) => {
                Err(CampaignValidationError::InvalidDiscountValue)
            }
        }
    }
}

/// A promotional campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Campaign UUID
    pub id: CampaignId,

    /// Display name, unique per seller
    pub name: String,

    /// Platform or seller scope
    pub scope: CampaignScope,

    /// Discount rule applied to eligible items
    pub discount: DiscountRule,

    /// Start of the campaign window
    pub starts_at: Timestamp,

    /// End of the campaign window
    pub ends_at: Timestamp,

    /// Manual toggle; the derived window still applies
    pub is_active: bool,

    /// Explicit product scope; empty means unrestricted
    pub product_ids: Vec<ProductId>,

    /// Explicit category scope; empty means unrestricted
    pub category_ids: Vec<CategoryId>,

    /// Minimum applicable subtotal (minor units) for the campaign to count
    pub min_order_amount: u64,

    /// Cap on the discount this campaign may contribute (minor units)
    pub max_discount_amount: Option<u64>,
}

impl Campaign {
    /// Create a new active campaign with an unrestricted scope.
    ///
    /// # Errors
    ///
    /// Returns a [`CampaignValidationError`] when the window or discount
    /// value is invalid.
    pub fn new(
        id: CampaignId,
        name: impl Into<String>,
        scope: CampaignScope,
        discount: DiscountRule,
        starts_at: Timestamp,
        ends_at: Timestamp,
    ) -> Result<Self, CampaignValidationError> {
        if ends_at <= starts_at {
            return Err(CampaignValidationError::InvalidDates);
        }

        discount.validate()?;

        Ok(Self {
            id,
            name: name.into(),
            scope,
            discount,
            starts_at,
            ends_at,
            is_active: true,
            product_ids: Vec::new(),
            category_ids: Vec::new(),
            min_order_amount: 0,
            max_discount_amount: None,
        })
    }

    /// Return a copy scoped to the given products.
    #[must_use]
    pub fn with_products(mut self, product_ids: impl Into<Vec<ProductId>>) -> Self {
        self.product_ids = product_ids.into();
        self
    }

    /// Return a copy scoped to the given categories.
    #[must_use]
    pub fn with_categories(mut self, category_ids: impl Into<Vec<CategoryId>>) -> Self {
        self.category_ids = category_ids.into();
        self
    }

    /// Return a copy with the given minimum applicable subtotal.
    #[must_use]
    pub fn with_min_order_amount(mut self, amount: u64) -> Self {
        self.min_order_amount = amount;
        self
    }

    /// Return a copy with the given discount cap.
    #[must_use]
    pub fn with_max_discount_amount(mut self, amount: u64) -> Self {
        self.max_discount_amount = Some(amount);
        self
    }

    /// Return a copy with the active toggle set.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Return a copy with a new window.
    ///
    /// # Errors
    ///
    /// Returns [`CampaignValidationError::InvalidDates`] when the end does
    /// not fall after the start.
    pub fn with_window(
        mut self,
        starts_at: Timestamp,
        ends_at: Timestamp,
    ) -> Result<Self, CampaignValidationError> {
        if ends_at <= starts_at {
            return Err(CampaignValidationError::InvalidDates);
        }

        self.starts_at = starts_at;
        self.ends_at = ends_at;

        Ok(self)
    }

    /// Return a copy with a new discount rule.
    ///
    /// # Errors
    ///
    /// Returns [`CampaignValidationError::InvalidDiscountValue`] when the
    /// value is out of range.
    pub fn with_discount(mut self, discount: DiscountRule) -> Result<Self, CampaignValidationError> {
        discount.validate()?;
        self.discount = discount;

        Ok(self)
    }

    /// Whether the campaign is active *and* inside its window right now.
    ///
    /// The window is derived, not stored: a campaign toggled active but
    /// not yet started, or already ended, is not effectively active.
    pub fn is_effectively_active(&self, now: Timestamp) -> bool {
        self.is_active && self.starts_at <= now && self.ends_at >= now
    }

    /// Whether the campaign names no explicit products or categories.
    ///
    /// An open scope covers every product the campaign's scope can reach.
    pub fn is_open_scope(&self) -> bool {
        self.product_ids.is_empty() && self.category_ids.is_empty()
    }

    /// Whether the campaign may be deleted at this moment.
    ///
    /// Deletion is refused only while the campaign is effectively active;
    /// a campaign toggled inactive may be deleted inside its window.
    pub fn is_deletable(&self, now: Timestamp) -> bool {
        !self.is_effectively_active(now)
    }

    /// Whether this campaign discounts the given product right now.
    pub fn applies_to_product(&self, product: &Product, now: Timestamp) -> bool {
        if !self.is_effectively_active(now) {
            return false;
        }

        if self.is_open_scope() {
            return match self.scope {
                CampaignScope::Platform => true,
                CampaignScope::Seller(seller_id) => product.seller_id == seller_id,
            };
        }

        self.product_ids.contains(&product.id) || self.category_ids.contains(&product.category_id)
    }

    /// Whether this campaign discounts the given cart item right now.
    ///
    /// Items carry only a product id, so category scope cannot be checked
    /// here; an open scope is honoured for platform campaigns only, since
    /// a seller campaign's product list *is* its scope in the cart.
    pub fn applies_to_item(&self, item: &CartItem, now: Timestamp) -> bool {
        if !self.is_effectively_active(now) {
            return false;
        }

        if self.is_open_scope() {
            return matches!(self.scope, CampaignScope::Platform);
        }

        self.product_ids.contains(&item.product_id)
    }
}
