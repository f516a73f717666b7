//! Carts
//!
//! A cart is a per-user mutable aggregate whose totals are only ever
//! produced by [`crate::stacking::recompute_totals`]; nothing else writes
//! the computed fields, which keeps `total == max(0, subtotal -
//! total_discount)` an invariant rather than a convention.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    campaigns::{CampaignId, DiscountRule},
    ids::{SellerId, UserId},
    products::{Product, ProductId},
};

/// One line in a cart.
///
/// The unit price is a snapshot taken when the line was added; later
/// product price changes do not move existing cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product this line refers to
    pub product_id: ProductId,

    /// Units of the product in the cart
    pub quantity: u32,

    /// Unit price in minor units, snapshotted at add time
    pub unit_price: u64,

    /// Product name at add time
    pub name: String,

    /// Seller who listed the product
    pub seller_id: SellerId,
}

impl CartItem {
    /// Build a cart line from a product snapshot.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            quantity,
            unit_price: product.price,
            name: product.name.clone(),
            seller_id: product.seller_id,
        }
    }

    /// Price times quantity, in minor units.
    pub fn line_total(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }
}

/// How much discount one campaign contributed to a cart.
///
/// These records are copied verbatim into order snapshots at checkout,
/// so they must stand on their own once the campaign itself changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedCampaign {
    /// Campaign that produced the discount
    pub campaign_id: CampaignId,

    /// Campaign name at application time
    pub campaign_name: String,

    /// Discount contributed, in minor units
    pub amount: u64,

    /// Rule the campaign carried when applied
    pub rule: DiscountRule,
}

/// Applied campaigns per cart; small enough to keep inline.
pub type AppliedCampaigns = SmallVec<[AppliedCampaign; 4]>;

/// A user's shopping cart with computed totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// User the cart belongs to
    pub user_id: UserId,

    /// Cart lines
    pub items: Vec<CartItem>,

    /// Sum of line totals, minor units
    pub subtotal: u64,

    /// Total discount across applied campaigns, minor units
    pub total_discount: u64,

    /// Amount payable: `max(0, subtotal - total_discount)`
    pub total: u64,

    /// Per-campaign discount records for the current totals
    pub applied_campaigns: AppliedCampaigns,
}

impl Cart {
    /// A cart with no items and zeroed totals.
    #[must_use]
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            items: Vec::new(),
            subtotal: 0,
            total_discount: 0,
            total: 0,
            applied_campaigns: SmallVec::new(),
        }
    }

    /// Whether the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the line for a product, if present.
    pub fn item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// Sum of line totals, computed from the items.
    pub fn computed_subtotal(&self) -> u64 {
        self.items.iter().map(CartItem::line_total).sum()
    }
}
