pub mod page_head;
pub mod state;
pub mod view;

pub use state::{DashboardState, SharedDashboard};
pub use view::DashboardView;
