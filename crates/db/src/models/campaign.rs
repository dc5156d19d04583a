//! Campaign row model.

use std::str::FromStr;

use mixoads_core::campaign::CampaignStatus;
use mixoads_core::error::CoreError;
use mixoads_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `campaigns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CampaignRow {
    pub id: String,
    pub name: String,
    pub status: String,
    pub budget: f64,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: i64,
    pub created_at: Option<Timestamp>,
    /// Time of the last successful local write.
    pub synced_at: Timestamp,
}

impl CampaignRow {
    /// Parse the stored status string.
    pub fn status(&self) -> Result<CampaignStatus, CoreError> {
        CampaignStatus::from_str(&self.status)
    }
}
