//! Fixed demo dataset shown when `sample_on_failure` is enabled and the
//! upstream API cannot be reached.
use crate::models::MediaNode;

pub fn sample_nodes() -> Vec<MediaNode> {
    vec![
        MediaNode {
            node_id: "sample-node-1".to_string(),
            node_url: "https://media-1.example.com".to_string(),
            node_version: "v1.4.2".to_string(),
            uptime_percent: 99.6,
            total_checks: 1440.0,
            successful: 1434.0,
            last_checked: "2024-01-01T12:00:00Z".to_string(),
        },
        MediaNode {
            node_id: "sample-node-2".to_string(),
            node_url: "https://media-2.example.com".to_string(),
            node_version: "v1.4.1".to_string(),
            uptime_percent: 92.3,
            total_checks: 1440.0,
            successful: 1329.0,
            last_checked: "2024-01-01T12:00:00Z".to_string(),
        },
        MediaNode {
            node_id: "sample-node-3".to_string(),
            node_url: "https://media-3.example.com".to_string(),
            node_version: "v1.3.9".to_string(),
            uptime_percent: 61.0,
            total_checks: 1440.0,
            successful: 878.0,
            last_checked: "2024-01-01T11:55:00Z".to_string(),
        },
    ]
}
