//! Pricing
//!
//! Display pricing for product listings and detail pages: the single
//! best campaign's price, never a stacked one. Stateless; callers pass
//! the current campaign set and clock on every call.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{campaigns::Campaign, discounts::best_discounted_price, products::Product};

/// A product together with its display discount, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedProduct {
    /// The product being priced
    pub product: Product,

    /// Best single-campaign price in minor units, when a campaign applies
    pub discounted_price: Option<u64>,

    /// Whether any campaign currently discounts this product
    pub has_discount: bool,

    /// Relative saving in percentage points, rounded to 2 dp
    pub discount_percentage: Option<Decimal>,
}

/// Price a product for display against the given campaign set.
///
/// The percentage is computed in decimal space from the actual saving,
/// so a fixed-amount campaign still reports a meaningful percentage.
#[must_use]
pub fn price_with_discount(product: Product, campaigns: &[Campaign], now: Timestamp) -> PricedProduct {
    let discounted_price = best_discounted_price(&product, campaigns, now);

    let discount_percentage = discounted_price
        .filter(|_| product.price > 0)
        .map(|discounted| {
            let saving = Decimal::from(product.price.saturating_sub(discounted));
            let original = Decimal::from(product.price);

            (saving / original * Decimal::ONE_HUNDRED).round_dp(2)
        });

    PricedProduct {
        has_discount: discounted_price.is_some(),
        discounted_price,
        discount_percentage,
        product,
    }
}
