//! `canvass-watch` -- election-day dashboard refresh daemon.
//!
//! Fetches the campaign backend's dashboard summary on a fixed
//! interval and logs each snapshot. Exits cleanly on ctrl-c.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default | Description                              |
//! |------------------------|----------|---------|------------------------------------------|
//! | `CANVASS_API_URL`      | yes      | --      | Backend base URL, e.g. `http://host:8000`|
//! | `CANVASS_REFRESH_SECS` | no       | `30`    | Seconds between dashboard refreshes      |

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use canvass_client::CampaignApi;
use canvass_core::config::{DASHBOARD_REFRESH_INTERVAL, ENV_API_URL, ENV_REFRESH_SECS};
use canvass_watch::refresh;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "canvass_watch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_url = std::env::var(ENV_API_URL).unwrap_or_else(|_| {
        tracing::error!("{ENV_API_URL} environment variable is required");
        std::process::exit(1);
    });

    let interval_secs: u64 = std::env::var(ENV_REFRESH_SECS)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DASHBOARD_REFRESH_INTERVAL.as_secs());

    let interval = Duration::from_secs(interval_secs);

    let api = match CampaignApi::new(api_url.clone()) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            std::process::exit(1);
        }
    };

    tracing::info!(
        api_url = %api_url,
        interval_secs,
        "Starting canvass-watch",
    );

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received ctrl-c, shutting down");
            signal_cancel.cancel();
        }
    });

    refresh::run(&api, interval, &cancel).await;

    tracing::info!("canvass-watch stopped");
}
