//! Products

pub mod errors;
pub mod memory;
pub mod repository;

pub use errors::ProductsRepositoryError;
pub use memory::InMemoryProductsRepository;
pub use repository::{MockProductsRepository, ProductsRepository};
