//! REST client for the ad-platform API.
//!
//! Wraps token exchange, paginated campaign listing and the per-campaign
//! sync trigger behind typed request/response structs.

pub mod api;
pub mod types;

pub use api::{AdPlatformApi, AdPlatformApiError};
pub use types::{CampaignPage, Pagination, TokenResponse};
