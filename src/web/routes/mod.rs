pub mod api_routes;
pub mod dashboard_routes;
