use std::sync::Arc;
use tracing::{info, warn};

use super::page_head::PageHead;
use super::state::SharedDashboard;
use crate::server::config::DashboardConfig;
use crate::services::node_loader::{spawn_loader, LoaderHandle, NodeSource};

/// The top-level dashboard view. Mounting installs the page head and starts
/// the one fetch for this mount; unmounting removes the head and aborts a
/// fetch that is still pending.
pub struct DashboardView {
    state: SharedDashboard,
    source: Arc<dyn NodeSource>,
    public_url: Option<String>,
    sample_on_failure: bool,
    mounted: bool,
    loader: Option<LoaderHandle>,
}

impl DashboardView {
    pub fn new(state: SharedDashboard, source: Arc<dyn NodeSource>, config: &DashboardConfig) -> Self {
        Self {
            state,
            source,
            public_url: config.public_url.clone(),
            sample_on_failure: config.sample_on_failure,
            mounted: false,
            loader: None,
        }
    }

    pub fn state(&self) -> SharedDashboard {
        self.state.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub async fn mount(&mut self) {
        if self.mounted {
            warn!("Dashboard view is already mounted.");
            return;
        }

        let mount_id = {
            let mut dashboard = self.state.lock().await;
            dashboard.activate(PageHead::new(self.public_url.clone()))
        };
        info!(mount_id, "Mounting dashboard view.");
        self.mounted = true;

        self.loader = Some(spawn_loader(
            self.source.clone(),
            self.state.clone(),
            mount_id,
            self.sample_on_failure,
        ));
    }

    /// Waits until the load started by [`Self::mount`] has been applied.
    pub async fn wait_for_load(&mut self) {
        if let Some(loader) = self.loader.take() {
            loader.join().await;
        }
    }

    pub async fn unmount(&mut self) {
        // Deactivate first so a result racing the cancel signal is dropped.
        self.state.lock().await.deactivate();
        self.mounted = false;

        if let Some(loader) = self.loader.take() {
            if !loader.is_finished() {
                info!("Unmounting dashboard view with a pending node request.");
            }
            loader.cancel().await;
        }
    }
}
