//! Shared fixtures: an in-process mock ad platform and a recording sink.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use mixoads_adplatform::AdPlatformApi;
use mixoads_core::campaign::Campaign;
use mixoads_sync::config::{Credentials, DatabaseConfig, SyncConfig};
use mixoads_sync::error::PersistenceError;
use mixoads_sync::sink::CampaignSink;

pub const TEST_EMAIL: &str = "ads@example.com";
pub const TEST_PASSWORD: &str = "secret";
pub const TEST_TOKEN: &str = "test-token";

/// `Basic base64("ads@example.com:secret")`.
const EXPECTED_BASIC: &str = "Basic YWRzQGV4YW1wbGUuY29tOnNlY3JldA==";

/// How long a "slow" sync trigger stalls. Well above the test trigger timeout.
const SLOW_SYNC_DELAY: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// Campaign payloads
// ---------------------------------------------------------------------------

/// A valid listing item with the given id.
pub fn campaign_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Campaign {id}"),
        "status": "active",
        "budget": 100.0,
        "impressions": 1000,
        "clicks": 50,
        "conversions": 5,
        "created_at": "2026-01-15T10:00:00Z"
    })
}

/// `n` pages holding the given number of campaigns each, ids `c1..`.
pub fn pages_of(sizes: &[usize]) -> Vec<Vec<Value>> {
    let mut next = 1;
    sizes
        .iter()
        .map(|&size| {
            (0..size)
                .map(|_| {
                    let item = campaign_json(&format!("c{next}"));
                    next += 1;
                    item
                })
                .collect()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Mock platform
// ---------------------------------------------------------------------------

/// Scripted behaviour of the mock ad platform.
#[derive(Clone)]
pub struct PlatformScript {
    /// Listing pages; page `n` serves `pages[n - 1]`.
    pub pages: Vec<Vec<Value>>,
    /// Status returned by `/auth/token`.
    pub auth_status: StatusCode,
    /// Token body returned on successful auth. `None` omits the field.
    pub token: Option<String>,
    /// A listing page that answers with the given status.
    pub failing_page: Option<(u32, StatusCode)>,
    /// Report `has_more: true` forever.
    pub endless: bool,
    /// Campaign ids whose sync trigger answers 500.
    pub failing_sync: HashSet<String>,
    /// Campaign ids whose sync trigger stalls past the timeout.
    pub slow_sync: HashSet<String>,
    /// Campaign ids whose sync trigger answers 200 with a non-JSON body.
    pub garbage_sync: HashSet<String>,
}

impl Default for PlatformScript {
    fn default() -> Self {
        Self {
            pages: vec![Vec::new()],
            auth_status: StatusCode::OK,
            token: Some(TEST_TOKEN.to_string()),
            failing_page: None,
            endless: false,
            failing_sync: HashSet::new(),
            slow_sync: HashSet::new(),
            garbage_sync: HashSet::new(),
        }
    }
}

impl PlatformScript {
    pub fn with_pages(pages: Vec<Vec<Value>>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }
}

/// Request counters observed by the mock.
#[derive(Default)]
pub struct PlatformCalls {
    pub auth: AtomicUsize,
    pub pages: Mutex<Vec<u32>>,
    pub syncs: Mutex<Vec<String>>,
}

impl PlatformCalls {
    pub fn auth_count(&self) -> usize {
        self.auth.load(Ordering::SeqCst)
    }

    pub fn pages_requested(&self) -> Vec<u32> {
        self.pages.lock().unwrap().clone()
    }

    pub fn syncs_requested(&self) -> Vec<String> {
        self.syncs.lock().unwrap().clone()
    }
}

struct PlatformState {
    script: PlatformScript,
    calls: Arc<PlatformCalls>,
}

/// A running mock platform bound to an ephemeral local port.
pub struct MockPlatform {
    pub base_url: String,
    pub calls: Arc<PlatformCalls>,
}

impl MockPlatform {
    pub async fn start(script: PlatformScript) -> Self {
        let calls = Arc::new(PlatformCalls::default());
        let state = Arc::new(PlatformState {
            script,
            calls: Arc::clone(&calls),
        });

        let app = Router::new()
            .route("/auth/token", post(token_handler))
            .route("/api/campaigns", get(list_handler))
            .route("/api/campaigns/{id}/sync", post(sync_handler))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            calls,
        }
    }

    pub fn api(&self) -> AdPlatformApi {
        AdPlatformApi::new(&self.base_url, Duration::from_secs(5)).unwrap()
    }
}

fn authorization(headers: &HeaderMap) -> &str {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": "unauthorized" }))).into_response()
}

async fn token_handler(State(state): State<Arc<PlatformState>>, headers: HeaderMap) -> Response {
    state.calls.auth.fetch_add(1, Ordering::SeqCst);

    if authorization(&headers) != EXPECTED_BASIC {
        return unauthorized();
    }
    if !state.script.auth_status.is_success() {
        return (state.script.auth_status, "auth failed").into_response();
    }
    match &state.script.token {
        Some(token) => Json(json!({ "access_token": token })).into_response(),
        None => Json(json!({ "token_type": "bearer" })).into_response(),
    }
}

async fn list_handler(
    State(state): State<Arc<PlatformState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if authorization(&headers) != format!("Bearer {TEST_TOKEN}") {
        return unauthorized();
    }
    let page: u32 = query
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(0);
    state.calls.pages.lock().unwrap().push(page);

    if let Some((failing, status)) = state.script.failing_page {
        if failing == page {
            return (status, "listing failed").into_response();
        }
    }

    let index = page.saturating_sub(1) as usize;
    let data = state.script.pages.get(index).cloned().unwrap_or_default();
    let has_more = state.script.endless || index + 1 < state.script.pages.len();

    Json(json!({
        "data": data,
        "pagination": { "page": page, "has_more": has_more }
    }))
    .into_response()
}

async fn sync_handler(
    State(state): State<Arc<PlatformState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if authorization(&headers) != format!("Bearer {TEST_TOKEN}") {
        return unauthorized();
    }
    state.calls.syncs.lock().unwrap().push(id.clone());
    assert_eq!(body["campaign_id"], id, "sync body must name the campaign");

    if state.script.slow_sync.contains(&id) {
        tokio::time::sleep(SLOW_SYNC_DELAY).await;
    }
    if state.script.failing_sync.contains(&id) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "sync failed").into_response();
    }
    if state.script.garbage_sync.contains(&id) {
        return "<html>ok</html>".into_response();
    }
    Json(json!({ "campaign_id": id, "status": "queued" })).into_response()
}

// ---------------------------------------------------------------------------
// Recording sink
// ---------------------------------------------------------------------------

/// Sink that remembers every successful upsert in call order.
#[derive(Default)]
pub struct RecordingSink {
    upserts: Mutex<Vec<Campaign>>,
    fail_ids: HashSet<String>,
    closed: AtomicBool,
}

impl RecordingSink {
    pub fn failing_on(ids: &[&str]) -> Self {
        Self {
            fail_ids: ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn upserts(&self) -> Vec<Campaign> {
        self.upserts.lock().unwrap().clone()
    }

    pub fn upserted_ids(&self) -> Vec<String> {
        self.upserts().into_iter().map(|c| c.id).collect()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CampaignSink for RecordingSink {
    async fn upsert(&self, campaign: &Campaign) -> Result<(), PersistenceError> {
        if self.fail_ids.contains(&campaign.id) {
            return Err(PersistenceError {
                campaign_id: campaign.id.clone(),
                source: sqlx::Error::PoolClosed,
            });
        }
        self.upserts.lock().unwrap().push(campaign.clone());
        Ok(())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Config pointing at `base_url` with a short trigger timeout.
pub fn test_config(base_url: &str) -> SyncConfig {
    SyncConfig {
        api_base_url: base_url.to_string(),
        credentials: Credentials {
            email: TEST_EMAIL.to_string(),
            password: TEST_PASSWORD.to_string(),
        },
        page_size: 2,
        max_pages: 50,
        request_timeout: Duration::from_secs(5),
        trigger_timeout: Duration::from_millis(200),
        concurrency: 1,
        database: DatabaseConfig::Url("postgres://unused".to_string()),
        use_mock_db: true,
    }
}
