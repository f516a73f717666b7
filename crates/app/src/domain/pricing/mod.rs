//! Pricing

pub mod service;

pub use service::{CampaignPricingService, MockPricingService, PricingService,
    PricingServiceError};
