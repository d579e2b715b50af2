// File: syncboard-core/src/view.rs
//
// View-model behind the status table: owns the display labels, runs the
// initial poll and the link flow, and renders rows for a front end.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use syncboard_common::error::Error;
use syncboard_common::models::{DisplayStatus, Integration, LinkLabel, SyncStatus};
use syncboard_common::traits::Navigator;
use crate::client::StatusClient;

#[derive(Debug, Default)]
struct ViewState {
    display: DisplayStatus,
    /// Integrations with a link request outstanding; their controls are
    /// disabled until it settles.
    in_flight: HashSet<Integration>,
    updated_at: Option<DateTime<Utc>>,
}

/// Clears an integration's in-flight marker when dropped, so the control is
/// re-enabled even if the caller abandons `initiate_link` mid-request.
struct InFlightGuard {
    state: Arc<Mutex<ViewState>>,
    integration: Integration,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .in_flight
            .remove(&self.integration);
    }
}

/// Cloneable handle to one mounted status view. All clones share state.
#[derive(Clone)]
pub struct StatusView {
    client: Arc<StatusClient>,
    navigator: Arc<dyn Navigator>,
    state: Arc<Mutex<ViewState>>,
    cancel: CancellationToken,
    mounted_at: DateTime<Utc>,
}

impl StatusView {
    /// A view showing `Loading` everywhere, with no request issued yet.
    pub fn new(client: Arc<StatusClient>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            client,
            navigator,
            state: Arc::new(Mutex::new(ViewState::default())),
            cancel: CancellationToken::new(),
            mounted_at: Utc::now(),
        }
    }

    /// Create the view and immediately start the one status poll in the
    /// background. The returned handle resolves when that poll settles.
    pub fn mount(
        client: Arc<StatusClient>,
        navigator: Arc<dyn Navigator>,
    ) -> (Self, JoinHandle<Result<SyncStatus, Error>>) {
        let view = Self::new(client, navigator);
        let poller = view.clone();
        let handle = tokio::spawn(async move { poller.fetch_status().await });
        (view, handle)
    }

    /// Poll `syncStatus` and replace the display labels with the result.
    ///
    /// Any failure turns both labels into `Error`. Results that arrive after
    /// [`teardown`](Self::teardown) are dropped without touching state.
    pub async fn fetch_status(&self) -> Result<SyncStatus, Error> {
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Error::Cancelled),
            res = self.client.fetch_status() => res,
        };
        if self.cancel.is_cancelled() {
            debug!("Status view torn down, ignoring status response");
            return Err(Error::Cancelled);
        }

        let mut state = self.state();
        state.updated_at = Some(Utc::now());
        match result {
            Ok(status) => {
                state.display = DisplayStatus::from(status);
                info!(
                    "Sync status: nokia={} fatsecret={}",
                    state.display.nokia, state.display.fatsecret
                );
                Ok(status)
            }
            Err(e) => {
                warn!("Failed to fetch sync status: {}", e);
                state.display = DisplayStatus::errored();
                Err(e)
            }
        }
    }

    /// Ask the server where to send the user to link `integration` and
    /// navigate there. Returns the URL navigated to.
    pub async fn initiate_link(&self, integration: Integration) -> Result<String, Error> {
        if !integration.linkable() {
            return Err(Error::NotLinkable(integration.to_string()));
        }
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let started = self.state().in_flight.insert(integration);
        if !started {
            debug!("Ignoring repeated link request for {}", integration);
            return Err(Error::LinkInProgress(integration.to_string()));
        }
        let in_flight = InFlightGuard {
            state: self.state.clone(),
            integration,
        };

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Error::Cancelled),
            res = self.client.fetch_link_target(integration) => res,
        };
        drop(in_flight);
        if self.cancel.is_cancelled() {
            debug!("Status view torn down, dropping {} link response", integration);
            return Err(Error::Cancelled);
        }

        let target = match result {
            Ok(target) => target,
            Err(e) => {
                warn!("Failed to start {} linking: {}", integration, e);
                if e.is_request_failure() {
                    self.state().display.set(integration, LinkLabel::Error);
                }
                return Err(e);
            }
        };

        info!("Navigating to {} authorization page: {}", integration, target.url);
        self.navigator.navigate(&target.url)?;
        Ok(target.url)
    }

    pub fn render(&self) -> StatusTable {
        let state = self.state();
        let rows = Integration::ALL
            .iter()
            .map(|&integration| StatusRow {
                integration,
                name: integration.display_name(),
                label: state.display.get(integration),
                control: if !integration.linkable() {
                    LinkControl::Disabled
                } else if state.in_flight.contains(&integration) {
                    LinkControl::Busy
                } else {
                    LinkControl::Enabled
                },
            })
            .collect();
        StatusTable {
            rows,
            updated_at: state.updated_at,
        }
    }

    pub fn display(&self) -> DisplayStatus {
        self.state().display
    }

    pub fn mounted_at(&self) -> DateTime<Utc> {
        self.mounted_at
    }

    /// Stop the view. Outstanding requests are abandoned and any late
    /// response is ignored.
    pub fn teardown(&self) {
        if !self.cancel.is_cancelled() {
            debug!("Tearing down status view mounted at {}", self.mounted_at);
        }
        self.cancel.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves once the view has been torn down.
    pub async fn closed(&self) {
        self.cancel.cancelled().await
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// State of a row's link button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkControl {
    Enabled,
    /// A link request is outstanding.
    Busy,
    /// Linking isn't wired up for this integration.
    Disabled,
}

impl LinkControl {
    pub fn is_clickable(&self) -> bool {
        matches!(self, LinkControl::Enabled)
    }

    pub fn caption(&self) -> &'static str {
        match self {
            LinkControl::Enabled => "[Link]",
            LinkControl::Busy => "[Linking...]",
            LinkControl::Disabled => "[Link] (not available)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    pub integration: Integration,
    pub name: &'static str,
    pub label: LinkLabel,
    pub control: LinkControl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTable {
    pub rows: Vec<StatusRow>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl fmt::Display for StatusTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<12} {:<12} {}", "Integration", "Status", "Action")?;
        for row in &self.rows {
            writeln!(f, "{:<12} {:<12} {}", row.name, row.label.as_str(), row.control.caption())?;
        }
        Ok(())
    }
}
