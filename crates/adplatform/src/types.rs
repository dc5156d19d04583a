//! Wire types for the ad-platform HTTP API.

use mixoads_core::campaign::Campaign;
use serde::{Deserialize, Serialize};

/// Response body of `POST /auth/token`.
///
/// `access_token` is optional here so that a 2xx response without a
/// token can be reported as such instead of as a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// One page of `GET /api/campaigns`.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignPage {
    pub data: Vec<Campaign>,
    pub pagination: Pagination,
}

/// Pagination metadata attached to every listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub has_more: bool,
}

/// Request body of `POST /api/campaigns/{id}/sync`.
#[derive(Debug, Serialize)]
pub struct TriggerSyncRequest<'a> {
    pub campaign_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_tolerates_missing_token() {
        let parsed: TokenResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.access_token.is_none());
    }

    #[test]
    fn page_requires_pagination_block() {
        let result = serde_json::from_str::<CampaignPage>(r#"{"data": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn empty_page_parses() {
        let page: CampaignPage =
            serde_json::from_str(r#"{"data": [], "pagination": {"page": 1, "has_more": false}}"#)
                .unwrap();
        assert!(page.data.is_empty());
        assert_eq!(
            page.pagination,
            Pagination {
                page: 1,
                has_more: false
            }
        );
    }

    #[test]
    fn trigger_request_serializes_campaign_id() {
        let body = serde_json::to_value(TriggerSyncRequest { campaign_id: "c9" }).unwrap();
        assert_eq!(body, serde_json::json!({ "campaign_id": "c9" }));
    }
}
