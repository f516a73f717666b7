//! Orders repository seam.

use async_trait::async_trait;
use bazaar_engine::ids::UserId;
use mockall::automock;
use thiserror::Error;

use crate::domain::orders::models::Order;

/// Infrastructure failures from an order store.
#[derive(Debug, Error)]
pub enum OrdersRepositoryError {
    /// The backing store failed; surfaced, never swallowed.
    #[error("order storage error: {0}")]
    Storage(String),
}

/// Durable store of order snapshots.
#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Persist an order snapshot.
    async fn create(&self, order: Order) -> Result<(), OrdersRepositoryError>;

    /// A user's past orders, newest first.
    async fn find_by_user(&self, user: UserId) -> Result<Vec<Order>, OrdersRepositoryError>;
}
