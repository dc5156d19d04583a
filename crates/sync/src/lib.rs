//! `mixoads-sync` library crate.
//!
//! Pulls campaigns from the ad platform and mirrors them into Postgres:
//!
//! 1. [`auth::Authenticator`] exchanges credentials for a bearer token.
//! 2. [`fetcher::CampaignFetcher`] pages through the listing endpoint.
//! 3. [`syncer::CampaignSyncer`] triggers a remote sync per campaign and
//!    upserts it through a [`sink::CampaignSink`].
//!
//! The binary entrypoint lives in `main.rs`.

pub mod auth;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod report;
pub mod sink;
pub mod syncer;

use mixoads_adplatform::AdPlatformApi;

use crate::auth::Authenticator;
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::fetcher::CampaignFetcher;
use crate::report::SyncReport;
use crate::sink::CampaignSink;
use crate::syncer::CampaignSyncer;

/// Run one full sync with the sink selected by `config`.
///
/// The sink is opened before any remote call and is always closed,
/// whether the run succeeds or fails.
pub async fn run(config: &SyncConfig) -> Result<SyncReport, SyncError> {
    let api = AdPlatformApi::new(&config.api_base_url, config.request_timeout)
        .map_err(SyncError::Client)?;
    let sink = sink::open(config).await?;

    run_scoped(&api, &*sink, config).await
}

/// [`run_with`], then close `sink` regardless of the outcome.
pub async fn run_scoped(
    api: &AdPlatformApi,
    sink: &dyn CampaignSink,
    config: &SyncConfig,
) -> Result<SyncReport, SyncError> {
    let result = run_with(api, sink, config).await;
    sink.close().await;
    result
}

/// Run one full sync against an already constructed client and sink.
pub async fn run_with(
    api: &AdPlatformApi,
    sink: &dyn CampaignSink,
    config: &SyncConfig,
) -> Result<SyncReport, SyncError> {
    tracing::info!(api_url = %api.base_url(), "Step 1: getting access token");
    let token = Authenticator::new(api, &config.credentials)
        .authenticate()
        .await?;

    tracing::info!("Step 2: fetching campaigns");
    let campaigns = CampaignFetcher::new(api, config.page_size, config.max_pages)
        .fetch_all(&token)
        .await?;

    tracing::info!(
        count = campaigns.len(),
        concurrency = config.concurrency,
        "Step 3: syncing campaigns to database"
    );
    let report = CampaignSyncer::new(api, &token, sink, config.trigger_timeout)
        .with_concurrency(config.concurrency)
        .sync_all(&campaigns)
        .await;

    tracing::info!(
        succeeded = report.succeeded,
        total = report.total,
        failed = report.failures.len(),
        "Sync complete: {report} campaigns synced"
    );
    Ok(report)
}
