//! Discounts

use jiff::Timestamp;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

use crate::{
    campaigns::{Campaign, DiscountRule},
    products::Product,
};

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// Calculate `percent` of `minor` in minor units.
///
/// Rounds to whole minor units, midpoint away from zero, so a 10%
/// discount on 2.05 is 0.21 rather than 0.20.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] when the multiplication
/// cannot be represented or the result does not fit in `u64`.
pub fn percent_of_minor(percent: u8, minor: u64) -> Result<u64, DiscountError> {
    let Some(minor) = Decimal::from_u64(minor) else {
        return Err(DiscountError::PercentConversion);
    };

    let Some(applied) = minor.checked_mul(Decimal::from(percent)) else {
        return Err(DiscountError::PercentConversion);
    };

    let fraction = applied / Decimal::ONE_HUNDRED;
    let rounded = fraction.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    rounded.to_u64().ok_or(DiscountError::PercentConversion)
}

/// The price a single campaign would charge for a product, floored at 0.
///
/// Returns `None` when the campaign does not apply to the product, or
/// when its percent math cannot be computed; a malformed campaign never
/// aborts pricing, it simply contributes no candidate.
pub fn candidate_price(campaign: &Campaign, product: &Product, now: Timestamp) -> Option<u64> {
    if !campaign.applies_to_product(product, now) {
        return None;
    }

    match campaign.discount {
        DiscountRule::Percentage(percent) => percent_of_minor(percent, product.price)
            .ok()
            .map(|discount| product.price.saturating_sub(discount)),
        DiscountRule::Fixed(amount) => Some(product.price.saturating_sub(amount)),
    }
}

/// The best (lowest) discounted price any single campaign offers.
///
/// The single best-for-customer campaign wins at display time; multiple
/// campaigns are never combined here. Returns `None` when no campaign
/// applies, meaning the product shows its full price.
pub fn best_discounted_price(
    product: &Product,
    campaigns: &[Campaign],
    now: Timestamp,
) -> Option<u64> {
    campaigns
        .iter()
        .filter_map(|campaign| candidate_price(campaign, product, now))
        .min()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        campaigns::{CampaignId, CampaignScope, CampaignValidationError},
        ids::{CategoryId, SellerId},
        products::ProductId,
    };

    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap_or_default()
    }

    fn now() -> Timestamp {
        ts("2026-01-15T00:00:00Z")
    }

    fn test_product(price: u64) -> Product {
        Product {
            id: ProductId::now_v7(),
            name: "Lamp".to_string(),
            category_id: CategoryId::now_v7(),
            seller_id: SellerId::now_v7(),
            price,
            stock: 5,
            is_active: true,
        }
    }

    fn platform_campaign(discount: DiscountRule) -> Result<Campaign, CampaignValidationError> {
        Campaign::new(
            CampaignId::now_v7(),
            "Sale",
            CampaignScope::Platform,
            discount,
            ts("2026-01-01T00:00:00Z"),
            ts("2026-02-01T00:00:00Z"),
        )
    }

    #[test]
    fn percent_of_minor_rounds_midpoint_away_from_zero() -> TestResult {
        assert_eq!(percent_of_minor(10, 2_05)?, 21);
        assert_eq!(percent_of_minor(10, 2_04)?, 20);
        assert_eq!(percent_of_minor(25, 1_00)?, 25);

        Ok(())
    }

    #[test]
    fn candidate_price_for_percentage_and_fixed() -> TestResult {
        let product = test_product(100_00);

        let percentage = platform_campaign(DiscountRule::Percentage(10))?;
        let fixed = platform_campaign(DiscountRule::Fixed(30_00))?;

        assert_eq!(candidate_price(&percentage, &product, now()), Some(90_00));
        assert_eq!(candidate_price(&fixed, &product, now()), Some(70_00));

        Ok(())
    }

    #[test]
    fn candidate_price_floors_at_zero() -> TestResult {
        let product = test_product(10_00);
        let fixed = platform_campaign(DiscountRule::Fixed(25_00))?;

        assert_eq!(candidate_price(&fixed, &product, now()), Some(0));

        Ok(())
    }

    #[test]
    fn candidate_price_is_none_when_not_applicable() -> TestResult {
        let product = test_product(10_00);
        let campaign = platform_campaign(DiscountRule::Percentage(10))?
            .with_products(vec![ProductId::now_v7()]);

        assert_eq!(candidate_price(&campaign, &product, now()), None);

        Ok(())
    }

    #[test]
    fn best_price_takes_the_minimum_candidate_not_the_sum() -> TestResult {
        // 100 with a 10% campaign (-> 90) and a fixed 30 campaign (-> 70):
        // the display price is 70, not 60.
        let product = test_product(100_00);

        let campaigns = vec![
            platform_campaign(DiscountRule::Percentage(10))?,
            platform_campaign(DiscountRule::Fixed(30_00))?,
        ];

        assert_eq!(
            best_discounted_price(&product, &campaigns, now()),
            Some(70_00)
        );

        Ok(())
    }

    #[test]
    fn best_price_is_none_with_no_eligible_campaigns() -> TestResult {
        let product = test_product(100_00);

        let expired = platform_campaign(DiscountRule::Percentage(10))?;

        assert_eq!(
            best_discounted_price(&product, &[expired], ts("2026-06-01T00:00:00Z")),
            None
        );
        assert_eq!(best_discounted_price(&product, &[], now()), None);

        Ok(())
    }
}
