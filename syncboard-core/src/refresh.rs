// File: syncboard-core/src/refresh.rs
//
// Optional periodic re-poll of a mounted status view.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::view::StatusView;

/// Re-run `fetch_status` every `every` until the view is torn down.
///
/// The first tick is skipped since mounting already polled once. Failures
/// are left on the view as `Error` labels; the loop keeps its schedule.
pub fn spawn_refresh(view: StatusView, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Refreshing sync status every {:?}", every);
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;
                _ = view.closed() => {
                    debug!("Refresh task stopping, view torn down");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = view.fetch_status().await {
                        debug!("Periodic status refresh failed: {}", e);
                    }
                }
            }
        }
    })
}
