//! Domain services and collaborator seams.

pub mod campaigns;
pub mod carts;
pub mod checkout;
pub mod orders;
pub mod payments;
pub mod pricing;
pub mod products;
