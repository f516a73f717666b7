//! Campaigns

pub mod data;
pub mod errors;
pub mod memory;
pub mod repository;
pub mod service;

pub use data::{CampaignActor, CampaignDraft, CampaignUpdate};
pub use errors::CampaignsServiceError;
pub use memory::InMemoryCampaignsRepository;
pub use repository::{CampaignsRepository, CampaignsRepositoryError, MockCampaignsRepository};
pub use service::{CampaignAdminService, CampaignsService, MockCampaignsService};
