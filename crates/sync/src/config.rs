//! Sync configuration loaded from environment variables.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Default ad-platform base URL for local development.
const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Campaigns requested per listing page.
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Hard cap on listing pages per run. Guards against a server that never
/// reports `has_more: false`.
const DEFAULT_MAX_PAGES: u32 = 1000;

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
const DEFAULT_TRIGGER_TIMEOUT_MS: u64 = 1000;

/// Upper bound for `SYNC_CONCURRENCY`.
pub const MAX_CONCURRENCY: usize = 8;

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Ad-platform login. `Debug` never prints the password.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Both values must be present and non-empty.
    pub fn new(email: Option<String>, password: Option<String>) -> Result<Self, ConfigError> {
        let email = non_empty(email).ok_or(ConfigError::Missing("AD_PLATFORM_EMAIL"))?;
        let password = non_empty(password).ok_or(ConfigError::Missing("AD_PLATFORM_PASSWORD"))?;
        Ok(Self { email, password })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Database
// ---------------------------------------------------------------------------

/// Where to persist campaigns.
#[derive(Clone)]
pub enum DatabaseConfig {
    /// A full `postgres://` connection URL (`DATABASE_URL`).
    Url(String),
    /// Discrete `DB_*` settings.
    Parts {
        host: String,
        port: u16,
        name: String,
        user: String,
        password: String,
    },
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(_) => f.write_str("Url(<redacted>)"),
            Self::Parts {
                host,
                port,
                name,
                user,
                ..
            } => f
                .debug_struct("Parts")
                .field("host", host)
                .field("port", port)
                .field("name", name)
                .field("user", user)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// SyncConfig
// ---------------------------------------------------------------------------

/// Everything one sync run needs.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub api_base_url: String,
    pub credentials: Credentials,
    pub page_size: u32,
    pub max_pages: u32,
    /// Default timeout for token and listing calls.
    pub request_timeout: Duration,
    /// Shorter timeout for each per-campaign sync trigger.
    pub trigger_timeout: Duration,
    /// Number of campaigns synced at once (1 = strictly sequential).
    pub concurrency: usize,
    pub database: DatabaseConfig,
    /// Replace the database with a logging no-op sink.
    pub use_mock_db: bool,
}

impl SyncConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                   | Default                  |
    /// |---------------------------|--------------------------|
    /// | `AD_PLATFORM_API_URL`     | `http://localhost:3001`  |
    /// | `AD_PLATFORM_EMAIL`       | required                 |
    /// | `AD_PLATFORM_PASSWORD`    | required                 |
    /// | `SYNC_PAGE_SIZE`          | `10`                     |
    /// | `SYNC_MAX_PAGES`          | `1000`                   |
    /// | `REQUEST_TIMEOUT_MS`      | `5000`                   |
    /// | `SYNC_TRIGGER_TIMEOUT_MS` | `1000`                   |
    /// | `SYNC_CONCURRENCY`        | `1` (clamped to 1..=8)   |
    /// | `DATABASE_URL`            | built from `DB_*`        |
    /// | `DB_HOST` / `DB_PORT`     | `localhost` / `5432`     |
    /// | `DB_NAME`                 | `mixoads`                |
    /// | `DB_USER` / `DB_PASSWORD` | `postgres` / `postgres`  |
    /// | `USE_MOCK_DB`             | `false`                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from a fixed map, e.g. in tests.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_vars(|key| vars.get(key).cloned())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::new(
            lookup("AD_PLATFORM_EMAIL"),
            lookup("AD_PLATFORM_PASSWORD"),
        )?;

        let api_base_url =
            non_empty(lookup("AD_PLATFORM_API_URL")).unwrap_or_else(|| DEFAULT_API_URL.into());

        let page_size = parse_or(&lookup, "SYNC_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConfigError::Invalid {
                var: "SYNC_PAGE_SIZE",
                value: "0".into(),
            });
        }

        let max_pages = parse_or(&lookup, "SYNC_MAX_PAGES", DEFAULT_MAX_PAGES)?;
        if max_pages == 0 {
            return Err(ConfigError::Invalid {
                var: "SYNC_MAX_PAGES",
                value: "0".into(),
            });
        }

        let request_timeout = Duration::from_millis(parse_or(
            &lookup,
            "REQUEST_TIMEOUT_MS",
            DEFAULT_REQUEST_TIMEOUT_MS,
        )?);
        let trigger_timeout = Duration::from_millis(parse_or(
            &lookup,
            "SYNC_TRIGGER_TIMEOUT_MS",
            DEFAULT_TRIGGER_TIMEOUT_MS,
        )?);
        // A zero trigger timeout fails every item; one at or above the
        // client timeout never fires before the client gives up.
        if trigger_timeout.is_zero() || trigger_timeout >= request_timeout {
            return Err(ConfigError::Invalid {
                var: "SYNC_TRIGGER_TIMEOUT_MS",
                value: trigger_timeout.as_millis().to_string(),
            });
        }

        let concurrency = parse_or(&lookup, "SYNC_CONCURRENCY", 1usize)?.clamp(1, MAX_CONCURRENCY);

        let database = match non_empty(lookup("DATABASE_URL")) {
            Some(url) => DatabaseConfig::Url(url),
            None => DatabaseConfig::Parts {
                host: lookup("DB_HOST").unwrap_or_else(|| "localhost".into()),
                port: parse_or(&lookup, "DB_PORT", 5432u16)?,
                name: lookup("DB_NAME").unwrap_or_else(|| "mixoads".into()),
                user: lookup("DB_USER").unwrap_or_else(|| "postgres".into()),
                password: lookup("DB_PASSWORD").unwrap_or_else(|| "postgres".into()),
            },
        };

        let use_mock_db = lookup("USE_MOCK_DB").is_some_and(|v| v.eq_ignore_ascii_case("true"));

        Ok(Self {
            api_base_url,
            credentials,
            page_size,
            max_pages,
            request_timeout,
            trigger_timeout,
            concurrency,
            database,
            use_mock_db,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match non_empty(lookup(var)) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
