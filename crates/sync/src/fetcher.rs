//! Paginated campaign listing.
//!
//! [`CampaignFetcher`] walks `GET /api/campaigns` page by page until the
//! platform reports `has_more: false`, accumulating every item in memory.
//! The result is all-or-nothing: any failed page discards what was
//! collected so far. Memory grows with the total campaign count, which is
//! assumed small; there is no streaming.

use mixoads_adplatform::{AdPlatformApi, AdPlatformApiError};
use mixoads_core::campaign::Campaign;

use crate::auth::AccessToken;
use crate::error::FetchError;

/// Pagination cursor: the next page to request and whether one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub page: u32,
    pub has_more: bool,
}

impl PageCursor {
    pub fn start() -> Self {
        Self {
            page: 1,
            has_more: true,
        }
    }

    /// Record the continuation flag of the page just read and move on.
    pub fn advance(&mut self, has_more: bool) {
        self.has_more = has_more;
        self.page += 1;
    }
}

/// Fetches every campaign across all listing pages.
pub struct CampaignFetcher<'a> {
    api: &'a AdPlatformApi,
    page_size: u32,
    max_pages: u32,
}

impl<'a> CampaignFetcher<'a> {
    /// * `max_pages` - hard cap on requests; exceeding it fails the fetch.
    pub fn new(api: &'a AdPlatformApi, page_size: u32, max_pages: u32) -> Self {
        Self {
            api,
            page_size,
            max_pages,
        }
    }

    /// Return all campaigns in page order, items in the order returned.
    #[tracing::instrument(skip_all, fields(page_size = self.page_size))]
    pub async fn fetch_all(&self, token: &AccessToken) -> Result<Vec<Campaign>, FetchError> {
        let mut cursor = PageCursor::start();
        let mut campaigns = Vec::new();

        while cursor.has_more {
            if cursor.page > self.max_pages {
                tracing::error!(
                    max_pages = self.max_pages,
                    "Platform kept reporting more pages, aborting fetch"
                );
                return Err(FetchError::PageLimitExceeded {
                    max_pages: self.max_pages,
                });
            }

            let page = cursor.page;
            let listing = self
                .api
                .list_campaigns(token.as_str(), page, self.page_size)
                .await
                .map_err(|e| match e {
                    AdPlatformApiError::Status { status, .. } => FetchError::Status { page, status },
                    source => FetchError::Request { page, source },
                })?;

            if listing.pagination.page != page {
                tracing::warn!(
                    requested = page,
                    reported = listing.pagination.page,
                    "Platform reported a different page number than requested"
                );
            }

            tracing::debug!(
                page,
                items = listing.data.len(),
                has_more = listing.pagination.has_more,
                "Fetched campaign page"
            );

            campaigns.extend(listing.data);
            cursor.advance(listing.pagination.has_more);
        }

        tracing::info!(
            count = campaigns.len(),
            pages = cursor.page - 1,
            "Fetched all campaigns"
        );
        Ok(campaigns)
    }
}
