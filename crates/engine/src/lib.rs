//! Bazaar Engine
//!
//! A pure campaign discount and cart pricing engine: campaign applicability,
//! single-item display pricing, and running-discount cart stacking. All
//! monetary values are minor units (cents); all functions are pure with
//! respect to their inputs.

pub mod campaigns;
pub mod cart;
pub mod discounts;
pub mod ids;
pub mod pricing;
pub mod products;
pub mod stacking;
