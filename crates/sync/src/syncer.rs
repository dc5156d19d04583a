//! Per-campaign sync: trigger the remote refresh, then upsert locally.
//!
//! Each campaign is isolated. A timeout, transport error, malformed
//! trigger body, invalid record or storage failure skips that campaign
//! only; nothing is retried within the run. With the default concurrency
//! of 1 campaigns are processed strictly in fetch order, one at a time.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use mixoads_adplatform::AdPlatformApi;
use mixoads_core::campaign::Campaign;

use crate::auth::AccessToken;
use crate::error::SyncItemError;
use crate::report::SyncReport;
use crate::sink::CampaignSink;

/// Drives the trigger-then-persist step for a batch of campaigns.
pub struct CampaignSyncer<'a> {
    api: &'a AdPlatformApi,
    token: &'a AccessToken,
    sink: &'a dyn CampaignSink,
    trigger_timeout: Duration,
    concurrency: usize,
}

impl<'a> CampaignSyncer<'a> {
    pub fn new(
        api: &'a AdPlatformApi,
        token: &'a AccessToken,
        sink: &'a dyn CampaignSink,
        trigger_timeout: Duration,
    ) -> Self {
        Self {
            api,
            token,
            sink,
            trigger_timeout,
            concurrency: 1,
        }
    }

    /// Allow up to `n` campaigns in flight at once (minimum 1).
    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    /// Sync every campaign and report how many succeeded.
    pub async fn sync_all(&self, campaigns: &[Campaign]) -> SyncReport {
        let mut report = SyncReport::new(campaigns.len());

        let outcomes: Vec<(&Campaign, Result<(), SyncItemError>)> = stream::iter(campaigns)
            .map(|campaign| async move { (campaign, self.sync_one(campaign).await) })
            .buffered(self.concurrency)
            .collect()
            .await;

        for (campaign, outcome) in outcomes {
            match outcome {
                Ok(()) => report.record_success(),
                Err(e) => report.record_failure(&campaign.id, &e),
            }
        }

        report
    }

    /// Trigger the remote sync for one campaign, then persist it.
    ///
    /// The trigger response body is parsed but does not influence the
    /// write; any 2xx JSON answer is treated as success.
    async fn sync_one(&self, campaign: &Campaign) -> Result<(), SyncItemError> {
        tracing::debug!(campaign_id = %campaign.id, name = %campaign.name, "Syncing campaign");

        let result = self.trigger_and_persist(campaign).await;
        match &result {
            Ok(()) => {
                tracing::info!(campaign_id = %campaign.id, name = %campaign.name, "Synced campaign");
            }
            Err(e) => {
                tracing::warn!(
                    campaign_id = %campaign.id,
                    name = %campaign.name,
                    error = %e,
                    "Failed to sync campaign"
                );
            }
        }
        result
    }

    async fn trigger_and_persist(&self, campaign: &Campaign) -> Result<(), SyncItemError> {
        campaign.ensure_valid()?;
        if campaign.has_funnel_inversion() {
            tracing::debug!(
                campaign_id = %campaign.id,
                impressions = campaign.impressions,
                clicks = campaign.clicks,
                conversions = campaign.conversions,
                "Campaign counters out of funnel order"
            );
        }

        let _ack = self
            .api
            .trigger_sync(self.token.as_str(), &campaign.id, self.trigger_timeout)
            .await?;

        self.sink.upsert(campaign).await?;
        Ok(())
    }
}
