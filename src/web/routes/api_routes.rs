//! JSON view of the dashboard state.
use axum::{
    extract::{Extension, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::dashboard::state::DashboardSummary;
use crate::models::{MediaNode, SortField, ViewMode};
use crate::notifications::ToastView;
use crate::services::sort_engine::SortState;
use crate::web::{middleware::i18n::Locale, AppState};

#[derive(Deserialize)]
pub struct SortRequest {
    pub field: SortField,
}

#[derive(Deserialize)]
pub struct ViewRequest {
    pub mode: ViewMode,
}

pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check_handler))
        .route("/nodes", get(list_nodes))
        .route("/dashboard", get(get_summary))
        .route("/sort", post(toggle_sort))
        .route("/view", put(set_view))
        .route("/notifications", get(take_notifications))
}

async fn health_check_handler() -> &'static str {
    "OK"
}

/// The sorted projection, or `null` while the list is still loading.
async fn list_nodes(State(app_state): State<Arc<AppState>>) -> Json<Option<Vec<MediaNode>>> {
    let nodes = app_state.dashboard.lock().await.sorted_nodes();
    Json(nodes.map(|nodes| nodes.to_vec()))
}

async fn get_summary(State(app_state): State<Arc<AppState>>) -> Json<DashboardSummary> {
    Json(app_state.dashboard.lock().await.summary())
}

async fn toggle_sort(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<SortRequest>,
) -> Json<SortState> {
    Json(app_state.dashboard.lock().await.toggle_sort(payload.field))
}

async fn set_view(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<ViewRequest>,
) -> Json<DashboardSummary> {
    let mut dashboard = app_state.dashboard.lock().await;
    dashboard.set_view_mode(payload.mode);
    Json(dashboard.summary())
}

async fn take_notifications(
    State(app_state): State<Arc<AppState>>,
    Extension(Locale(locale)): Extension<Locale>,
) -> Json<Vec<ToastView>> {
    let toasts = app_state.dashboard.lock().await.take_toasts();
    Json(toasts.iter().map(|toast| toast.localize(&locale)).collect())
}
