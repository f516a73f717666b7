//! Cart stacking
//!
//! Combines multiple campaigns' discounts on one cart in a fixed priority
//! order: platform campaigns before seller campaigns, ascending campaign
//! id within each group. The ordering makes totals deterministic no
//! matter how the backing store returned the campaigns.

use jiff::Timestamp;
use smallvec::SmallVec;

use crate::{
    campaigns::{Campaign, CampaignScope, DiscountRule},
    cart::{AppliedCampaign, Cart, CartItem},
    discounts::percent_of_minor,
};

/// Recompute a cart's subtotal, discounts and total against the given
/// campaign set.
///
/// Pure: the same cart items, campaigns and `now` always produce the
/// same totals and the same applied-campaign records. Campaigns are
/// processed with a running total discount; each campaign's contribution
/// is clamped first to its own `max_discount_amount`, then to
/// `applicable_subtotal - running_total`. The second clamp deliberately
/// mixes a campaign-local subtotal with the cart-global running discount;
/// see the crate tests for the pinned behaviour.
#[must_use]
pub fn recompute_totals(cart: &Cart, campaigns: &[Campaign], now: Timestamp) -> Cart {
    let subtotal = cart.computed_subtotal();

    let mut total_discount: u64 = 0;
    let mut applied = SmallVec::new();

    for campaign in ordered_campaigns(campaigns, now) {
        let applicable_subtotal = applicable_subtotal(campaign, &cart.items, now);

        if applicable_subtotal < campaign.min_order_amount {
            continue;
        }

        let raw = match campaign.discount {
            DiscountRule::Percentage(percent) => {
                match percent_of_minor(percent, applicable_subtotal) {
                    Ok(amount) => amount,
                    // A malformed campaign contributes nothing rather than
                    // aborting pricing for the rest of the cart.
                    Err(_) => continue,
                }
            }
            DiscountRule::Fixed(amount) => amount,
        };

        let capped = match campaign.max_discount_amount {
            Some(max) => raw.min(max),
            None => raw,
        };

        let discount = capped.min(applicable_subtotal.saturating_sub(total_discount));

        if discount > 0 {
            applied.push(AppliedCampaign {
                campaign_id: campaign.id,
                campaign_name: campaign.name.clone(),
                amount: discount,
                rule: campaign.discount,
            });

            total_discount += discount;
        }
    }

    Cart {
        user_id: cart.user_id,
        items: cart.items.clone(),
        subtotal,
        total_discount,
        total: subtotal.saturating_sub(total_discount),
        applied_campaigns: applied,
    }
}

/// Effectively active campaigns, platform group first, ascending id
/// within each group.
fn ordered_campaigns<'a>(campaigns: &'a [Campaign], now: Timestamp) -> Vec<&'a Campaign> {
    let mut active: Vec<&Campaign> = campaigns
        .iter()
        .filter(|campaign| campaign.is_effectively_active(now))
        .collect();

    active.sort_by_key(|campaign| {
        let group = match campaign.scope {
            CampaignScope::Platform => 0_u8,
            CampaignScope::Seller(_) => 1,
        };

        (group, campaign.id)
    });

    active
}

/// Sum of line totals over the items this campaign covers.
fn applicable_subtotal(campaign: &Campaign, items: &[CartItem], now: Timestamp) -> u64 {
    items
        .iter()
        .filter(|item| campaign.applies_to_item(item, now))
        .map(CartItem::line_total)
        .sum()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        campaigns::{CampaignId, CampaignValidationError},
        ids::{SellerId, UserId},
        products::ProductId,
    };

    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap_or_default()
    }

    fn now() -> Timestamp {
        ts("2026-01-15T00:00:00Z")
    }

    fn item(product_id: ProductId, unit_price: u64, quantity: u32) -> CartItem {
        CartItem {
            product_id,
            quantity,
            unit_price,
            name: "Item".to_string(),
            seller_id: SellerId::now_v7(),
        }
    }

    fn cart_with(items: Vec<CartItem>) -> Cart {
        Cart {
            items,
            ..Cart::empty(UserId::now_v7())
        }
    }

    fn campaign(
        name: &str,
        scope: CampaignScope,
        discount: DiscountRule,
    ) -> Result<Campaign, CampaignValidationError> {
        Campaign::new(
            CampaignId::now_v7(),
            name,
            scope,
            discount,
            ts("2026-01-01T00:00:00Z"),
            ts("2026-02-01T00:00:00Z"),
        )
    }

    #[test]
    fn no_campaigns_leaves_total_at_subtotal() {
        let cart = cart_with(vec![item(ProductId::now_v7(), 100_00, 2)]);

        let result = recompute_totals(&cart, &[], now());

        assert_eq!(result.subtotal, 200_00);
        assert_eq!(result.total_discount, 0);
        assert_eq!(result.total, 200_00);
        assert!(result.applied_campaigns.is_empty());
    }

    #[test]
    fn platform_then_seller_with_running_clamp() -> TestResult {
        // Cart: 100 x2 + 50 x1 = 250 subtotal. A platform "10% off
        // everything", then a seller "fixed 20 off" scoped to the 50
        // item with a minimum applicable subtotal of 40.
        let item_a = ProductId::now_v7();
        let item_b = ProductId::now_v7();

        let cart = cart_with(vec![item(item_a, 100_00, 2), item(item_b, 50_00, 1)]);

        let seller = SellerId::now_v7();

        let platform = campaign(
            "10% off everything",
            CampaignScope::Platform,
            DiscountRule::Percentage(10),
        )?;

        let seller_fixed = campaign(
            "20 off item B",
            CampaignScope::Seller(seller),
            DiscountRule::Fixed(20_00),
        )?
        .with_products(vec![item_b])
        .with_min_order_amount(40_00);

        let result = recompute_totals(&cart, &[seller_fixed, platform], now());

        assert_eq!(result.subtotal, 250_00);
        assert_eq!(result.total_discount, 45_00);
        assert_eq!(result.total, 205_00);
        assert_eq!(result.applied_campaigns.len(), 2);

        // Platform first regardless of input order.
        let first = result.applied_campaigns.first();
        assert_eq!(first.map(|a| a.amount), Some(25_00));
        assert_eq!(
            first.map(|a| a.campaign_name.as_str()),
            Some("10% off everything")
        );

        Ok(())
    }

    #[test]
    fn below_minimum_order_amount_contributes_nothing() -> TestResult {
        let product = ProductId::now_v7();
        let cart = cart_with(vec![item(product, 30_00, 1)]);

        let gated = campaign(
            "Big spender",
            CampaignScope::Platform,
            DiscountRule::Fixed(10_00),
        )?
        .with_min_order_amount(50_00);

        let result = recompute_totals(&cart, &[gated], now());

        assert_eq!(result.total_discount, 0);
        assert!(result.applied_campaigns.is_empty());

        Ok(())
    }

    #[test]
    fn max_discount_amount_caps_the_contribution() -> TestResult {
        let cart = cart_with(vec![item(ProductId::now_v7(), 100_00, 1)]);

        let capped = campaign(
            "50% capped at 20",
            CampaignScope::Platform,
            DiscountRule::Percentage(50),
        )?
        .with_max_discount_amount(20_00);

        let result = recompute_totals(&cart, &[capped], now());

        assert_eq!(result.total_discount, 20_00);

        Ok(())
    }

    #[test]
    fn disjoint_scopes_sum_their_independent_discounts() -> TestResult {
        let item_a = ProductId::now_v7();
        let item_b = ProductId::now_v7();

        let cart = cart_with(vec![item(item_a, 40_00, 1), item(item_b, 60_00, 1)]);

        let on_a = campaign(
            "A only",
            CampaignScope::Platform,
            DiscountRule::Fixed(5_00),
        )?
        .with_products(vec![item_a]);

        let on_b = campaign(
            "B only",
            CampaignScope::Platform,
            DiscountRule::Percentage(10),
        )?
        .with_products(vec![item_b]);

        let together = recompute_totals(&cart, &[on_a.clone(), on_b.clone()], now());
        let only_a = recompute_totals(&cart, &[on_a], now());
        let only_b = recompute_totals(&cart, &[on_b], now());

        assert_eq!(
            together.total_discount,
            only_a.total_discount + only_b.total_discount
        );

        Ok(())
    }

    #[test]
    fn recompute_is_idempotent() -> TestResult {
        let cart = cart_with(vec![item(ProductId::now_v7(), 100_00, 2)]);

        let campaigns = vec![campaign(
            "Sale",
            CampaignScope::Platform,
            DiscountRule::Percentage(15),
        )?];

        let once = recompute_totals(&cart, &campaigns, now());
        let twice = recompute_totals(&once, &campaigns, now());

        assert_eq!(once.total_discount, twice.total_discount);
        assert_eq!(once.applied_campaigns, twice.applied_campaigns);
        assert_eq!(once.total, twice.total);

        Ok(())
    }

    #[test]
    fn running_clamp_never_exceeds_applicable_subtotal() -> TestResult {
        // Two open platform campaigns both discounting the whole cart;
        // the second is clamped so the combined discount cannot pass the
        // applicable subtotal.
        let cart = cart_with(vec![item(ProductId::now_v7(), 10_00, 1)]);

        let first = campaign(
            "Whole cart off",
            CampaignScope::Platform,
            DiscountRule::Percentage(100),
        )?;

        let second = campaign(
            "Extra fixed 5",
            CampaignScope::Platform,
            DiscountRule::Fixed(5_00),
        )?;

        let result = recompute_totals(&cart, &[first, second], now());

        assert_eq!(result.total_discount, 10_00);
        assert_eq!(result.total, 0);
        assert_eq!(result.applied_campaigns.len(), 1);

        Ok(())
    }

    #[test]
    fn inactive_and_out_of_window_campaigns_are_ignored() -> TestResult {
        let cart = cart_with(vec![item(ProductId::now_v7(), 100_00, 1)]);

        let toggled_off = campaign(
            "Off",
            CampaignScope::Platform,
            DiscountRule::Percentage(10),
        )?
        .with_active(false);

        let not_started = campaign(
            "Future",
            CampaignScope::Platform,
            DiscountRule::Percentage(10),
        )?
        .with_window(ts("2026-06-01T00:00:00Z"), ts("2026-07-01T00:00:00Z"))?;

        let result = recompute_totals(&cart, &[toggled_off, not_started], now());

        assert_eq!(result.total_discount, 0);

        Ok(())
    }
}
