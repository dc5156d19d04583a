//! `mixoads-sync` -- one-shot campaign sync from the ad platform.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                 | Description                      |
//! |------------------------|----------|-------------------------|----------------------------------|
//! | `AD_PLATFORM_EMAIL`    | yes      | --                      | Ad-platform login                |
//! | `AD_PLATFORM_PASSWORD` | yes      | --                      | Ad-platform password             |
//! | `AD_PLATFORM_API_URL`  | no       | `http://localhost:3001` | Ad-platform base URL             |
//! | `DATABASE_URL`         | no       | built from `DB_*`       | Postgres connection URL          |
//! | `USE_MOCK_DB`          | no       | `false`                 | Log writes instead of storing    |
//!
//! See [`SyncConfig::from_env`] for the full list.
//!
//! # Exit status
//!
//! `0` when every campaign synced, `2` when some were skipped, `1` when
//! configuration, authentication, listing or the database connection
//! failed.

use std::process::ExitCode;

use mixoads_sync::config::SyncConfig;
use mixoads_sync::error::SyncError;
use mixoads_sync::report::EXIT_FATAL;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mixoads_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match SyncConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %SyncError::from(e), "Refusing to start");
            return ExitCode::from(EXIT_FATAL);
        }
    };

    tracing::info!(
        api_url = %config.api_base_url,
        page_size = config.page_size,
        mock_db = config.use_mock_db,
        "Syncing campaigns from ad platform"
    );

    match mixoads_sync::run(&config).await {
        Ok(report) => ExitCode::from(report.exit_code()),
        Err(e) => {
            tracing::error!(error = %e, "Sync aborted");
            ExitCode::from(EXIT_FATAL)
        }
    }
}
