use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::page_head::PageHead;
use crate::models::{MediaNode, RecordSet, SortDirection, SortField, ViewMode};
use crate::notifications::{Toast, ToastKind, ToastQueue};
use crate::services::aggregate::average_uptime;
use crate::services::sort_engine::{SortState, SortedProjection};

pub type SharedDashboard = Arc<Mutex<DashboardState>>;

/// Identifies one activation of the dashboard view.
pub type MountId = u64;

/// What the loader hands back to the view.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(Vec<MediaNode>),
    /// The fetch failed. `fallback` is the demo dataset when sample mode is on.
    Failed { fallback: Option<Vec<MediaNode>> },
}

/// UI state owned by the dashboard view: the loaded records, the sort and
/// view selections, pending toasts and the page head.
#[derive(Debug, Default)]
pub struct DashboardState {
    records: Option<RecordSet>,
    avg_uptime: i64,
    is_sample: bool,
    sort: SortState,
    view_mode: ViewMode,
    toasts: ToastQueue,
    head: Option<PageHead>,
    mount_id: Option<MountId>,
    last_mount_id: MountId,
    projection: SortedProjection,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub loading: bool,
    pub is_sample: bool,
    pub avg_uptime: i64,
    pub node_count: usize,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub view_mode: ViewMode,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedDashboard {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Installs the page head and starts a new mount.
    pub fn activate(&mut self, head: PageHead) -> MountId {
        self.last_mount_id += 1;
        self.mount_id = Some(self.last_mount_id);
        self.head = Some(head);
        debug!(mount_id = self.last_mount_id, "Dashboard view activated.");
        self.last_mount_id
    }

    /// Removes the page head. Loads still in flight for the old mount are ignored.
    pub fn deactivate(&mut self) {
        if let Some(mount_id) = self.mount_id.take() {
            debug!(mount_id, "Dashboard view torn down.");
        }
        self.head = None;
    }

    pub fn is_mounted_as(&self, mount_id: MountId) -> bool {
        self.mount_id == Some(mount_id)
    }

    /// Stores a load result. Returns `false` (and changes nothing) when the
    /// mount it belongs to is no longer active.
    pub fn apply_load(&mut self, mount_id: MountId, outcome: LoadOutcome) -> bool {
        if !self.is_mounted_as(mount_id) {
            return false;
        }

        match outcome {
            LoadOutcome::Loaded(nodes) => {
                info!(node_count = nodes.len(), "Node list loaded.");
                self.set_records(nodes);
                self.is_sample = false;
            }
            LoadOutcome::Failed { fallback: None } => {
                self.set_records(Vec::new());
                self.is_sample = false;
                self.toasts.push(ToastKind::LoadFailed);
            }
            LoadOutcome::Failed { fallback: Some(sample) } => {
                info!(node_count = sample.len(), "Showing sample nodes in place of live data.");
                self.set_records(sample);
                self.is_sample = true;
                self.toasts.push(ToastKind::LoadFailed);
            }
        }
        true
    }

    fn set_records(&mut self, nodes: Vec<MediaNode>) {
        let records = RecordSet::new(nodes);
        self.avg_uptime = average_uptime(records.nodes());
        self.records = Some(records);
    }

    pub fn records(&self) -> Option<&RecordSet> {
        self.records.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.records.is_none()
    }

    pub fn is_sample(&self) -> bool {
        self.is_sample
    }

    pub fn avg_uptime(&self) -> i64 {
        self.avg_uptime
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn head(&self) -> Option<&PageHead> {
        self.head.as_ref()
    }

    /// Sorted projection of the current records, `None` while loading.
    pub fn sorted_nodes(&mut self) -> Option<Arc<[MediaNode]>> {
        self.projection.get(self.records.as_ref(), self.sort)
    }

    pub fn projection_recomputations(&self) -> u64 {
        self.projection.recomputations()
    }

    pub fn toggle_sort(&mut self, field: SortField) -> SortState {
        self.sort.toggle(field);
        self.sort
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn pending_toasts(&self) -> usize {
        self.toasts.len()
    }

    pub fn take_toasts(&mut self) -> Vec<Toast> {
        self.toasts.drain()
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            loading: self.is_loading(),
            is_sample: self.is_sample,
            avg_uptime: self.avg_uptime,
            node_count: self.records.as_ref().map_or(0, RecordSet::len),
            sort_field: self.sort.field,
            sort_direction: self.sort.direction,
            view_mode: self.view_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, uptime: f64) -> MediaNode {
        MediaNode {
            node_id: id.to_string(),
            uptime_percent: uptime,
            ..Default::default()
        }
    }

    #[test]
    fn test_loaded_nodes_default_to_uptime_descending() {
        let mut state = DashboardState::new();
        let mount = state.activate(PageHead::new(None));
        assert!(state.is_loading());

        assert!(state.apply_load(mount, LoadOutcome::Loaded(vec![node("b", 40.0), node("a", 97.0)])));

        let sorted = state.sorted_nodes().unwrap();
        assert_eq!(sorted[0].node_id, "a");
        assert_eq!(sorted[1].node_id, "b");
        assert_eq!(state.avg_uptime(), 69);
        assert_eq!(state.view_mode(), ViewMode::Table);
        assert_eq!(state.pending_toasts(), 0);
    }

    #[test]
    fn test_failed_load_yields_empty_set_and_one_toast() {
        let mut state = DashboardState::new();
        let mount = state.activate(PageHead::new(None));

        state.apply_load(mount, LoadOutcome::Failed { fallback: None });

        assert!(!state.is_loading());
        assert!(state.records().unwrap().is_empty());
        assert!(!state.is_sample());
        assert_eq!(state.avg_uptime(), 0);
        assert_eq!(state.pending_toasts(), 1);
    }

    #[test]
    fn test_failed_load_with_sample_fallback() {
        let mut state = DashboardState::new();
        let mount = state.activate(PageHead::new(None));

        state.apply_load(mount, LoadOutcome::Failed { fallback: Some(vec![node("demo", 80.0)]) });

        assert!(state.is_sample());
        assert_eq!(state.records().unwrap().len(), 1);
        assert_eq!(state.pending_toasts(), 1);
    }

    #[test]
    fn test_load_for_stale_mount_is_discarded() {
        let mut state = DashboardState::new();
        let mount = state.activate(PageHead::new(None));
        state.deactivate();

        assert!(!state.apply_load(mount, LoadOutcome::Failed { fallback: None }));
        assert!(state.is_loading());
        assert_eq!(state.pending_toasts(), 0);
        assert!(state.head().is_none());
    }

    #[test]
    fn test_view_toggle_keeps_sort_and_records() {
        let mut state = DashboardState::new();
        let mount = state.activate(PageHead::new(None));
        state.apply_load(mount, LoadOutcome::Loaded(vec![node("a", 10.0), node("b", 20.0)]));
        state.toggle_sort(SortField::NodeId);
        let before = state.sorted_nodes().unwrap();
        let generation = state.records().unwrap().generation();

        state.set_view_mode(ViewMode::Cards);
        state.set_view_mode(ViewMode::Table);

        assert_eq!(state.sort(), SortState { field: SortField::NodeId, direction: SortDirection::Desc });
        assert_eq!(state.records().unwrap().generation(), generation);
        assert!(Arc::ptr_eq(&before, &state.sorted_nodes().unwrap()));
        assert_eq!(state.projection_recomputations(), 1);
    }

    #[test]
    fn test_head_follows_mount_lifecycle() {
        let mut state = DashboardState::new();
        assert!(state.head().is_none());

        state.activate(PageHead::new(None));
        assert_eq!(state.head().unwrap().title, "Media-Node Uptime Tracker by Daksha");

        state.deactivate();
        assert!(state.head().is_none());
    }
}
