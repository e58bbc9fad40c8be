//! Fetches the node list once per dashboard mount.
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::dashboard::state::{LoadOutcome, MountId, SharedDashboard};
use crate::models::MediaNode;
use crate::services::sample_data::sample_nodes;

#[derive(Error, Debug)]
pub enum LoadFailure {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Upstream returned non-success status: {0}")]
    BadStatus(StatusCode),
    #[error("Failed to decode node list: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Something that can produce the node list.
#[async_trait]
pub trait NodeSource: Send + Sync {
    async fn fetch_nodes(&self) -> Result<Vec<MediaNode>, LoadFailure>;
}

/// Reads the node list from the uptime API with a single GET.
pub struct HttpNodeSource {
    client: Client,
    endpoint: String,
}

impl HttpNodeSource {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, LoadFailure> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl NodeSource for HttpNodeSource {
    async fn fetch_nodes(&self) -> Result<Vec<MediaNode>, LoadFailure> {
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadFailure::BadStatus(status));
        }

        let body = response.bytes().await?;
        let nodes: Vec<MediaNode> = serde_json::from_slice(&body)?;
        Ok(nodes)
    }
}

/// An in-flight load bound to one mount.
pub struct LoaderHandle {
    cancel_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl LoaderHandle {
    /// Aborts the request if it is still pending and waits for the task to exit.
    pub async fn cancel(self) {
        // The task may already be done; a closed receiver is fine.
        let _ = self.cancel_tx.send(());
        if let Err(e) = self.task.await {
            warn!(error = %e, "Node loader task ended abnormally.");
        }
    }

    /// Waits for the load to finish without cancelling it.
    pub async fn join(self) {
        let LoaderHandle { cancel_tx, task } = self;
        if let Err(e) = task.await {
            warn!(error = %e, "Node loader task ended abnormally.");
        }
        drop(cancel_tx);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawns the load for `mount_id`. The result is written into `state` unless
/// the handle is cancelled (or dropped) first.
pub fn spawn_loader(
    source: Arc<dyn NodeSource>,
    state: SharedDashboard,
    mount_id: MountId,
    sample_on_failure: bool,
) -> LoaderHandle {
    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let outcome = tokio::select! {
            biased;

            _ = cancel_rx => {
                info!(mount_id, "Dashboard torn down before the node list resolved. Request aborted.");
                return;
            }

            result = source.fetch_nodes() => match result {
                Ok(nodes) => LoadOutcome::Loaded(nodes),
                Err(e) => {
                    warn!(mount_id, error = %e, "Failed to load node list.");
                    LoadOutcome::Failed {
                        fallback: sample_on_failure.then(sample_nodes),
                    }
                }
            },
        };

        let mut dashboard = state.lock().await;
        if !dashboard.apply_load(mount_id, outcome) {
            debug!(mount_id, "Discarding node list for an inactive mount.");
        }
    });

    LoaderHandle { cancel_tx, task }
}
