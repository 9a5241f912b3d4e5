//! Dashboard refresh loop.
//!
//! Unlike a comparison-job poll session, the dashboard path is a
//! recurring refresh with no terminal state: a failed fetch logs a
//! warning and waits for the next tick instead of ending the loop. The
//! loop exits only when the cancellation token fires.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use canvass_client::CampaignApi;

/// Refresh the dashboard summary every `interval` until cancelled.
pub async fn run(api: &CampaignApi, interval: Duration, cancel: &CancellationToken) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Dashboard refresh cancelled");
                return;
            }
            _ = ticker.tick() => {}
        }

        match api.dashboard_summary().await {
            Ok(summary) => {
                let turnout = if summary.total_voters > 0 {
                    (summary.voted as f64 / summary.total_voters as f64) * 100.0
                } else {
                    0.0
                };
                tracing::info!(
                    total_voters = summary.total_voters,
                    voted = summary.voted,
                    turnout_percent = format!("{turnout:.1}"),
                    wards_reporting = summary.wards_reporting,
                    wards_total = summary.wards_total,
                    "Dashboard refreshed",
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dashboard refresh failed, retrying on next tick");
            }
        }
    }
}
