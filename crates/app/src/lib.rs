//! Cart, campaign and checkout services over the pricing engine.
//!
//! All collaborators (product and campaign stores, TTL cache, payment
//! gateway, order store) are trait seams with in-memory implementations;
//! the pricing logic itself lives in `bazaar-engine` and is pure.

pub mod cache;
pub mod config;
pub mod context;
pub mod domain;
