//! Error types for the sync pipeline.
//!
//! Phase-level errors ([`ConfigError`], [`AuthError`], [`FetchError`])
//! abort the run and surface as [`SyncError`]. Item-level errors
//! ([`SyncItemError`], [`PersistenceError`]) never leave the per-campaign
//! boundary; they are logged and recorded in the report.

use mixoads_adplatform::AdPlatformApiError;
use mixoads_core::error::CoreError;

/// Missing or unparseable configuration. Raised before any I/O.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Token exchange failed.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The token endpoint answered with a non-2xx status.
    #[error("Authentication failed with status {0}")]
    Status(u16),

    /// A 2xx answer without a usable `access_token`.
    #[error("Authentication response did not include access token")]
    TokenMissing,

    /// Transport failure, timeout or malformed body.
    #[error(transparent)]
    Api(AdPlatformApiError),
}

/// A listing page could not be retrieved. The whole fetch phase fails.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Campaign listing page {page} returned HTTP {status}")]
    Status { page: u32, status: u16 },

    #[error("Campaign listing page {page} failed: {source}")]
    Request {
        page: u32,
        #[source]
        source: AdPlatformApiError,
    },

    #[error("Campaign listing did not finish within {max_pages} pages")]
    PageLimitExceeded { max_pages: u32 },
}

/// A storage write failed for one campaign.
#[derive(Debug, thiserror::Error)]
#[error("Database error while saving campaign {campaign_id}: {source}")]
pub struct PersistenceError {
    pub campaign_id: String,
    #[source]
    pub source: sqlx::Error,
}

/// Why a single campaign was skipped.
#[derive(Debug, thiserror::Error)]
pub enum SyncItemError {
    #[error("Sync trigger timed out")]
    Timeout,

    #[error("Sync trigger failed: {0}")]
    Trigger(#[source] AdPlatformApiError),

    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl From<AdPlatformApiError> for SyncItemError {
    fn from(err: AdPlatformApiError) -> Self {
        match err {
            AdPlatformApiError::Timeout => Self::Timeout,
            other => Self::Trigger(other),
        }
    }
}

/// Fatal error for a whole run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("{0}")]
    Authentication(#[from] AuthError),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// Opening the persistence handle failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The HTTP client could not be constructed.
    #[error("Ad platform client error: {0}")]
    Client(#[source] AdPlatformApiError),
}
