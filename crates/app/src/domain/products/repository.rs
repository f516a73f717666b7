//! Products repository seam.

use async_trait::async_trait;
use bazaar_engine::products::{Product, ProductId};
use mockall::automock;

use crate::domain::products::errors::ProductsRepositoryError;

/// Read contract over the product catalogue.
///
/// Stock fields are mutable only via checkout's `save`; everything else
/// in the catalogue is managed elsewhere.
#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// Look a product up by id.
    async fn find_by_id(
        &self,
        id: ProductId,
    ) -> Result<Option<Product>, ProductsRepositoryError>;

    /// All currently purchasable products.
    async fn list_active(&self) -> Result<Vec<Product>, ProductsRepositoryError>;

    /// Write a product snapshot back (checkout stock reduction only).
    async fn save(&self, product: Product) -> Result<(), ProductsRepositoryError>;
}
