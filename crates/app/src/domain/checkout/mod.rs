//! Checkout

pub mod errors;
pub mod service;

pub use errors::CheckoutError;
pub use service::{CheckoutReceipt, CheckoutService, DefaultCheckoutService, MockCheckoutService};
