//! Repository for the `campaigns` table.

use mixoads_core::campaign::Campaign;
use sqlx::PgPool;

use crate::models::campaign::CampaignRow;

/// Column list for `campaigns` queries.
const COLUMNS: &str = "\
    id, name, status, budget, impressions, clicks, conversions, \
    created_at, synced_at";

/// Provides the upsert path and read-back helpers for synced campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a campaign or overwrite the existing row with the same `id`.
    ///
    /// All mutable fields are replaced (last write wins) and `synced_at`
    /// is refreshed on both paths. `created_at` is immutable upstream, so
    /// an existing value is kept. `clock_timestamp()` is used instead of
    /// `NOW()` so two writes in one transaction still get distinct times.
    pub async fn upsert(pool: &PgPool, campaign: &Campaign) -> Result<CampaignRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaigns \
                 (id, name, status, budget, impressions, clicks, conversions, created_at, synced_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, clock_timestamp()) \
             ON CONFLICT (id) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 status = EXCLUDED.status, \
                 budget = EXCLUDED.budget, \
                 impressions = EXCLUDED.impressions, \
                 clicks = EXCLUDED.clicks, \
                 conversions = EXCLUDED.conversions, \
                 created_at = COALESCE(campaigns.created_at, EXCLUDED.created_at), \
                 synced_at = clock_timestamp() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignRow>(&query)
            .bind(&campaign.id)
            .bind(&campaign.name)
            .bind(campaign.status.as_str())
            .bind(campaign.budget)
            .bind(campaign.impressions)
            .bind(campaign.clicks)
            .bind(campaign.conversions)
            .bind(campaign.created_at)
            .fetch_one(pool)
            .await
    }

    /// Find a campaign row by its remote id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<CampaignRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, CampaignRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total number of stored campaigns.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM campaigns")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
