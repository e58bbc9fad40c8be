use axum::{http::Method, middleware as axum_middleware, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::dashboard::state::SharedDashboard;
use crate::web::render::Renderer;
use crate::web::routes::*;

pub mod error;
pub mod middleware;
pub mod render;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: SharedDashboard,
    pub renderer: Arc<Renderer>,
}

pub fn create_axum_router(dashboard: SharedDashboard, renderer: Arc<Renderer>) -> Router {
    let app_state = Arc::new(AppState { dashboard, renderer });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .merge(dashboard_routes::create_dashboard_router())
        .nest("/api", api_routes::create_api_router())
        .with_state(app_state)
        .layer(axum_middleware::from_fn(middleware::i18n::i18n_middleware))
        .layer(cors)
}
