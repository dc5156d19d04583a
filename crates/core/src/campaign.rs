//! Campaign records as reported by the ad platform.
//!
//! A [`Campaign`] is read-only from our side: it is fetched, checked and
//! written to the local store, never created or edited upstream.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Campaign lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
    Archived,
}

impl CampaignStatus {
    /// The lowercase wire/storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Campaign
// ---------------------------------------------------------------------------

/// A single advertising campaign. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Campaign {
    #[validate(length(min = 1, message = "campaign id must not be empty"))]
    pub id: String,
    pub name: String,
    pub status: CampaignStatus,
    #[validate(range(min = 0.0, message = "budget must be non-negative"))]
    pub budget: f64,
    #[validate(range(min = 0, message = "impressions must be non-negative"))]
    pub impressions: i64,
    #[validate(range(min = 0, message = "clicks must be non-negative"))]
    pub clicks: i64,
    #[validate(range(min = 0, message = "conversions must be non-negative"))]
    pub conversions: i64,
    /// Set by the ad platform; some listings omit it.
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Campaign {
    /// Check value constraints (non-empty id, non-negative amounts).
    ///
    /// The funnel ordering `conversions <= clicks <= impressions` is
    /// expected but deliberately not enforced; see [`Campaign::has_funnel_inversion`].
    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(format!("campaign '{}': {e}", self.id)))
    }

    /// True when the counters are out of the usual funnel order.
    pub fn has_funnel_inversion(&self) -> bool {
        self.conversions > self.clicks || self.clicks > self.impressions
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
