//! Products repository errors.

use thiserror::Error;

/// Infrastructure failures from a product store.
#[derive(Debug, Error)]
pub enum ProductsRepositoryError {
    /// The backing store failed; surfaced, never swallowed.
    #[error("product storage error: {0}")]
    Storage(String),
}
