//! HTTP client for the ad-platform endpoints.
//!
//! Every response is read as text and parsed with `serde_json` so that a
//! malformed body becomes a typed [`AdPlatformApiError::Parse`] rather than
//! a generic transport error.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::types::{CampaignPage, TokenResponse, TriggerSyncRequest};

/// HTTP client for a single ad-platform deployment.
#[derive(Clone)]
pub struct AdPlatformApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the ad-platform REST layer.
#[derive(Debug, thiserror::Error)]
pub enum AdPlatformApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The request did not complete within its timeout and was aborted.
    #[error("Request timeout")]
    Timeout,

    /// The ad platform returned a non-2xx status code.
    #[error("Ad platform API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The base URL or a campaign id cannot form a request URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// A 2xx response whose body did not match the expected schema.
    #[error("Malformed {what} response: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl From<reqwest::Error> for AdPlatformApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err)
        }
    }
}

impl AdPlatformApi {
    /// Create a client whose requests time out after `timeout` unless a
    /// call overrides it.
    ///
    /// * `base_url` - e.g. `http://localhost:3001`; a trailing `/` is dropped.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AdPlatformApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange static credentials for a bearer token.
    ///
    /// Sends `POST /auth/token` with HTTP Basic credentials
    /// (`base64(email:password)`).
    pub async fn request_token(
        &self,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, AdPlatformApiError> {
        let response = self
            .client
            .post(format!("{}/auth/token", self.base_url))
            .basic_auth(email, Some(password))
            .send()
            .await?;

        Self::parse_response(response, "token").await
    }

    /// Fetch one page of campaigns.
    ///
    /// Sends `GET /api/campaigns?page={page}&limit={limit}`.
    pub async fn list_campaigns(
        &self,
        token: &str,
        page: u32,
        limit: u32,
    ) -> Result<CampaignPage, AdPlatformApiError> {
        let response = self
            .client
            .get(format!("{}/api/campaigns", self.base_url))
            .query(&[("page", page), ("limit", limit)])
            .bearer_auth(token)
            .send()
            .await?;

        Self::parse_response(response, "campaign listing").await
    }

    /// Ask the platform to refresh its own view of a campaign.
    ///
    /// Sends `POST /api/campaigns/{id}/sync` with `{campaign_id}` as the
    /// body. `timeout` replaces the client default for this request only.
    /// The body must be JSON; its content is returned uninterpreted.
    pub async fn trigger_sync(
        &self,
        token: &str,
        campaign_id: &str,
        timeout: Duration,
    ) -> Result<serde_json::Value, AdPlatformApiError> {
        let url = self.campaign_sync_url(campaign_id)?;
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&TriggerSyncRequest { campaign_id })
            .timeout(timeout)
            .send()
            .await?;

        Self::parse_response(response, "sync trigger").await
    }

    /// Build `{base}/api/campaigns/{id}/sync` with `campaign_id` encoded as
    /// a single path segment (`/`, `?`, `#` and `%` are escaped).
    ///
    /// `.` and `..` are rejected: URL parsing collapses them as dot
    /// segments even when percent-encoded, so they cannot be addressed.
    pub fn campaign_sync_url(&self, campaign_id: &str) -> Result<reqwest::Url, AdPlatformApiError> {
        if campaign_id.is_empty() || campaign_id == "." || campaign_id == ".." {
            return Err(AdPlatformApiError::InvalidUrl(format!(
                "campaign id '{campaign_id}' is not a usable path segment"
            )));
        }

        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| AdPlatformApiError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| AdPlatformApiError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["api", "campaigns", campaign_id, "sync"]);
        Ok(url)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, otherwise capture
    /// the status and body text in [`AdPlatformApiError::Status`].
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, AdPlatformApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AdPlatformApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
        what: &'static str,
    ) -> Result<T, AdPlatformApiError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| AdPlatformApiError::Parse { what, source })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
