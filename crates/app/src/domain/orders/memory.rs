//! In-memory orders repository.

use std::sync::RwLock;

use async_trait::async_trait;
use bazaar_engine::ids::UserId;
use rustc_hash::FxHashMap;

use crate::domain::orders::{
    models::{Order, OrderId},
    repository::{OrdersRepository, OrdersRepositoryError},
};

/// Order store backed by a hash map; used for wiring and tests.
#[derive(Default)]
pub struct InMemoryOrdersRepository {
    orders: RwLock<FxHashMap<OrderId, Order>>,
}

impl InMemoryOrdersRepository {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> OrdersRepositoryError {
        OrdersRepositoryError::Storage("order store lock poisoned".to_string())
    }
}

#[async_trait]
impl OrdersRepository for InMemoryOrdersRepository {
    async fn create(&self, order: Order) -> Result<(), OrdersRepositoryError> {
        let mut orders = self.orders.write().map_err(|_| Self::poisoned())?;
        orders.insert(order.id, order);

        Ok(())
    }

    async fn find_by_user(&self, user: UserId) -> Result<Vec<Order>, OrdersRepositoryError> {
        let orders = self.orders.read().map_err(|_| Self::poisoned())?;

        let mut found: Vec<Order> = orders
            .values()
            .filter(|order| order.user_id == user)
            .cloned()
            .collect();

        found.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use bazaar_engine::cart::Cart;
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::domain::orders::models::ShippingInfo;

    use super::*;

    fn order_for(user: UserId, placed_at: Timestamp) -> Order {
        Order::from_cart(
            OrderId::now_v7(),
            &Cart::empty(user),
            ShippingInfo {
                recipient: "A. Buyer".to_string(),
                address: "1 High Street".to_string(),
                city: "London".to_string(),
                postal_code: "N1 1AA".to_string(),
            },
            "txn".to_string(),
            placed_at,
        )
    }

    #[tokio::test]
    async fn find_by_user_returns_newest_first() -> TestResult {
        let repo = InMemoryOrdersRepository::new();
        let user = UserId::now_v7();

        let older = order_for(user, "2026-01-01T00:00:00Z".parse()?);
        let newer = order_for(user, "2026-02-01T00:00:00Z".parse()?);
        let other = order_for(UserId::now_v7(), "2026-03-01T00:00:00Z".parse()?);

        repo.create(older.clone()).await?;
        repo.create(newer.clone()).await?;
        repo.create(other).await?;

        let found = repo.find_by_user(user).await?;

        assert_eq!(found.len(), 2);
        assert_eq!(found.first().map(|o| o.id), Some(newer.id));

        Ok(())
    }
}
