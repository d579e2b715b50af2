use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
    Mutex,
};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use syncboard_common::models::SyncStatus;
use syncboard_common::traits::Navigator;
use syncboard_core::refresh::spawn_refresh;
use syncboard_core::{Error, StatusClient, StatusView};

/// Holds the currently mounted view plus what is needed to remount it.
pub struct TuiModule {
    client: Arc<StatusClient>,
    navigator: Arc<dyn Navigator>,
    refresh_every: Option<Duration>,
    view: Mutex<Option<StatusView>>,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
    shutdown_flag: Arc<AtomicBool>,
}

impl TuiModule {
    pub fn new(client: Arc<StatusClient>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            client,
            navigator,
            refresh_every: None,
            view: Mutex::new(None),
            refresh_task: Mutex::new(None),
            shutdown_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_refresh(mut self, every: Duration) -> Self {
        self.refresh_every = Some(every);
        self
    }

    pub fn client(&self) -> &Arc<StatusClient> {
        &self.client
    }

    /// Tear down whatever is shown, mount a fresh view, and wait for its
    /// initial poll. This is the terminal counterpart of a page reload.
    pub async fn mount(&self) -> Result<SyncStatus, Error> {
        self.unmount();

        let (view, initial_poll) = StatusView::mount(self.client.clone(), self.navigator.clone());
        *self.view.lock().unwrap_or_else(|p| p.into_inner()) = Some(view.clone());

        if let Some(every) = self.refresh_every {
            let task = spawn_refresh(view.clone(), every);
            *self.refresh_task.lock().unwrap_or_else(|p| p.into_inner()) = Some(task);
        }

        match initial_poll.await {
            Ok(result) => result,
            Err(join_err) => {
                warn!("Initial status poll task failed: {}", join_err);
                Err(Error::Cancelled)
            }
        }
    }

    /// The mounted view, if any.
    pub fn view(&self) -> Option<StatusView> {
        self.view.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    fn unmount(&self) {
        if let Some(old) = self.view.lock().unwrap_or_else(|p| p.into_inner()).take() {
            info!("Unmounting status view");
            old.teardown();
        }
        if let Some(task) = self.refresh_task.lock().unwrap_or_else(|p| p.into_inner()).take() {
            task.abort();
        }
    }

    pub fn prompt_string(&self) -> String {
        match self.client.session().user_id() {
            Some(user) => format!("syncboard({})> ", user),
            None => "syncboard> ".to_string(),
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown_flag.load(Ordering::SeqCst)
    }

    pub fn shutdown(&self) {
        self.unmount();
        self.shutdown_flag.store(true, Ordering::SeqCst);
    }
}
