//! Server-rendered dashboard page and its form interactions.
use axum::{
    extract::{Extension, OriginalUri, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::models::{SortField, ViewMode};
use crate::web::{error::AppError, middleware::i18n::Locale, AppState};

#[derive(Deserialize)]
pub struct SortQuery {
    pub field: String,
}

#[derive(Deserialize)]
pub struct ViewQuery {
    pub mode: String,
}

pub fn create_dashboard_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/sort", post(sort_column))
        .route("/view", post(select_view))
}

async fn dashboard_page(
    State(app_state): State<Arc<AppState>>,
    Extension(Locale(locale)): Extension<Locale>,
    OriginalUri(uri): OriginalUri,
) -> Result<Html<String>, AppError> {
    let html = app_state
        .renderer
        .render_shared(&app_state.dashboard, &locale, uri.path())
        .await?;
    Ok(Html(html))
}

async fn sort_column(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<SortQuery>,
) -> Result<Redirect, AppError> {
    let field: SortField = query.field.parse().map_err(AppError::InvalidInput)?;
    let sort = app_state.dashboard.lock().await.toggle_sort(field);
    debug!(field = %sort.field, direction = ?sort.direction, "Sort changed.");
    Ok(Redirect::to("/"))
}

async fn select_view(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> Result<Redirect, AppError> {
    let mode: ViewMode = query.mode.parse().map_err(AppError::InvalidInput)?;
    app_state.dashboard.lock().await.set_view_mode(mode);
    debug!(mode = ?mode, "View mode changed.");
    Ok(Redirect::to("/"))
}
