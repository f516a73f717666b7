//! In-memory products repository.

use std::sync::RwLock;

use async_trait::async_trait;
use bazaar_engine::products::{Product, ProductId};
use rustc_hash::FxHashMap;

use crate::domain::products::{errors::ProductsRepositoryError, repository::ProductsRepository};

/// Product store backed by a hash map; used for wiring and tests.
#[derive(Default)]
pub struct InMemoryProductsRepository {
    products: RwLock<FxHashMap<ProductId, Product>>,
}

impl InMemoryProductsRepository {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> ProductsRepositoryError {
        ProductsRepositoryError::Storage("product store lock poisoned".to_string())
    }
}

#[async_trait]
impl ProductsRepository for InMemoryProductsRepository {
    async fn find_by_id(
        &self,
        id: ProductId,
    ) -> Result<Option<Product>, ProductsRepositoryError> {
        let products = self.products.read().map_err(|_| Self::poisoned())?;

        Ok(products.get(&id).cloned())
    }

    async fn list_active(&self) -> Result<Vec<Product>, ProductsRepositoryError> {
        let products = self.products.read().map_err(|_| Self::poisoned())?;

        Ok(products
            .values()
            .filter(|product| product.is_active)
            .cloned()
            .collect())
    }

    async fn save(&self, product: Product) -> Result<(), ProductsRepositoryError> {
        let mut products = self.products.write().map_err(|_| Self::poisoned())?;
        products.insert(product.id, product);

        Ok(())
    }
}
