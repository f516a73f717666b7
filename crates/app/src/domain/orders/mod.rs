//! Orders

pub mod memory;
pub mod models;
pub mod repository;

pub use memory::InMemoryOrdersRepository;
pub use models::{Order, OrderId, ShippingInfo};
pub use repository::{MockOrdersRepository, OrdersRepository, OrdersRepositoryError};
