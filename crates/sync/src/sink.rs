//! Persistence sinks for synced campaigns.
//!
//! The pipeline writes through the [`CampaignSink`] trait so the storage
//! handle is constructed explicitly, passed in, and closed when the run
//! ends. [`PgCampaignSink`] upserts into Postgres; [`MockCampaignSink`]
//! only logs (`USE_MOCK_DB=true`).

use async_trait::async_trait;
use mixoads_core::campaign::Campaign;
use mixoads_db::repositories::CampaignRepo;
use mixoads_db::DbPool;
use sqlx::postgres::PgConnectOptions;

use crate::config::{DatabaseConfig, SyncConfig};
use crate::error::PersistenceError;

/// Destination for campaign upserts.
#[async_trait]
pub trait CampaignSink: Send + Sync {
    /// Insert or overwrite the stored copy of `campaign`. Must be safe to
    /// call repeatedly with the same id.
    async fn upsert(&self, campaign: &Campaign) -> Result<(), PersistenceError>;

    /// Release underlying resources. Called once at the end of a run.
    async fn close(&self) {}
}

/// Open the sink selected by `config`.
pub async fn open(config: &SyncConfig) -> Result<Box<dyn CampaignSink>, sqlx::Error> {
    if config.use_mock_db {
        tracing::warn!("USE_MOCK_DB is set, campaigns will not be persisted");
        return Ok(Box::new(MockCampaignSink));
    }
    let sink = PgCampaignSink::connect(&config.database).await?;
    Ok(Box::new(sink))
}

// ---------------------------------------------------------------------------
// Postgres
// ---------------------------------------------------------------------------

/// Writes campaigns to the `campaigns` table. Owns its pool.
pub struct PgCampaignSink {
    pool: DbPool,
}

impl PgCampaignSink {
    /// Connect and verify the database is reachable.
    pub async fn connect(database: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = match database {
            DatabaseConfig::Url(url) => mixoads_db::connect(url).await?,
            DatabaseConfig::Parts {
                host,
                port,
                name,
                user,
                password,
            } => {
                let options = PgConnectOptions::new()
                    .host(host)
                    .port(*port)
                    .database(name)
                    .username(user)
                    .password(password);
                mixoads_db::create_pool(options).await?
            }
        };
        mixoads_db::health_check(&pool).await?;
        tracing::info!("Database connection pool created");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl CampaignSink for PgCampaignSink {
    async fn upsert(&self, campaign: &Campaign) -> Result<(), PersistenceError> {
        CampaignRepo::upsert(&self.pool, campaign)
            .await
            .map(|_| ())
            .map_err(|source| PersistenceError {
                campaign_id: campaign.id.clone(),
                source,
            })
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("Database connection pool closed");
    }
}

// ---------------------------------------------------------------------------
// Mock
// ---------------------------------------------------------------------------

/// Accepts every write without storing anything.
pub struct MockCampaignSink;

#[async_trait]
impl CampaignSink for MockCampaignSink {
    async fn upsert(&self, campaign: &Campaign) -> Result<(), PersistenceError> {
        tracing::info!(campaign_id = %campaign.id, "[mock db] Saved campaign");
        Ok(())
    }
}
