//! Order models.

use bazaar_engine::{
    cart::{AppliedCampaigns, Cart, CartItem},
    ids::{TypedUuid, UserId},
};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Order UUID
pub type OrderId = TypedUuid<Order>;

/// Where an order ships to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    /// Recipient name
    pub recipient: String,

    /// Street address
    pub address: String,

    /// City
    pub city: String,

    /// Postal code
    pub postal_code: String,
}

/// An immutable purchase snapshot.
///
/// Items, totals and applied campaigns are copied from the cart at the
/// moment of purchase and must never be recomputed from live campaign
/// state afterward — campaigns may change or expire without altering
/// past orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order UUID
    pub id: OrderId,

    /// Buyer
    pub user_id: UserId,

    /// Purchased lines, with their snapshot prices
    pub items: Vec<CartItem>,

    /// Subtotal at purchase, minor units
    pub subtotal: u64,

    /// Total discount at purchase, minor units
    pub total_discount: u64,

    /// Amount charged, minor units
    pub total: u64,

    /// Per-campaign discount records at purchase
    pub applied_campaigns: AppliedCampaigns,

    /// Gateway transaction reference
    pub transaction_id: String,

    /// Delivery details
    pub shipping: ShippingInfo,

    /// When the order was placed
    pub placed_at: Timestamp,
}

impl Order {
    /// Snapshot a cart into an order, copying its computed fields
    /// verbatim.
    #[must_use]
    pub fn from_cart(
        id: OrderId,
        cart: &Cart,
        shipping: ShippingInfo,
        transaction_id: String,
        placed_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id: cart.user_id,
            items: cart.items.clone(),
            subtotal: cart.subtotal,
            total_discount: cart.total_discount,
            total: cart.total,
            applied_campaigns: cart.applied_campaigns.clone(),
            transaction_id,
            shipping,
            placed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use bazaar_engine::{
        cart::AppliedCampaign,
        campaigns::{CampaignId, DiscountRule},
        ids::SellerId,
        products::ProductId,
    };
    use smallvec::smallvec;

    use super::*;

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            recipient: "A. Buyer".to_string(),
            address: "1 High Street".to_string(),
            city: "London".to_string(),
            postal_code: "N1 1AA".to_string(),
        }
    }

    #[test]
    fn from_cart_copies_computed_fields_verbatim() {
        let cart = Cart {
            user_id: UserId::now_v7(),
            items: vec![CartItem {
                product_id: ProductId::now_v7(),
                quantity: 2,
                unit_price: 40_00,
                name: "Vase".to_string(),
                seller_id: SellerId::now_v7(),
            }],
            subtotal: 80_00,
            total_discount: 8_00,
            total: 72_00,
            applied_campaigns: smallvec![AppliedCampaign {
                campaign_id: CampaignId::now_v7(),
                campaign_name: "Sale".to_string(),
                amount: 8_00,
                rule: DiscountRule::Percentage(10),
            }],
        };

        let order = Order::from_cart(
            OrderId::now_v7(),
            &cart,
            shipping(),
            "txn-1".to_string(),
            Timestamp::UNIX_EPOCH,
        );

        assert_eq!(order.subtotal, cart.subtotal);
        assert_eq!(order.total_discount, cart.total_discount);
        assert_eq!(order.total, cart.total);
        assert_eq!(order.applied_campaigns, cart.applied_campaigns);
        assert_eq!(order.items, cart.items);
        assert_eq!(order.user_id, cart.user_id);
    }
}
