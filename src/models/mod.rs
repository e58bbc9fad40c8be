pub mod media_node;
pub mod view_options;

pub use media_node::{MediaNode, NodeStatus, RecordSet, ONLINE_THRESHOLD};
pub use view_options::{SortDirection, SortField, SortKey, ViewMode};
