use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Uptime at or above this percentage is reported as online.
pub const ONLINE_THRESHOLD: f64 = 95.0;

/// A media server whose health is tracked by the upstream uptime API.
///
/// Fields that are missing or `null` fall back to empty values. Counters are
/// plain JSON numbers, so `10.0` is accepted as well as `10`. No range or
/// consistency checks are applied (`successful` may exceed `total_checks`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaNode {
    #[serde(deserialize_with = "null_as_default")]
    pub node_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub node_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub node_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uptime_percent: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_checks: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub successful: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub last_checked: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeStatus {
    Online,
    Offline,
}

impl MediaNode {
    pub fn status(&self) -> NodeStatus {
        if self.uptime_percent >= ONLINE_THRESHOLD {
            NodeStatus::Online
        } else {
            NodeStatus::Offline
        }
    }
}

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// An immutable, loaded set of nodes.
///
/// Every set gets a fresh generation number, which is what derived
/// projections key on instead of comparing contents.
#[derive(Debug, Clone)]
pub struct RecordSet {
    generation: u64,
    nodes: Arc<[MediaNode]>,
}

impl RecordSet {
    pub fn new(nodes: Vec<MediaNode>) -> Self {
        Self {
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            nodes: nodes.into(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn nodes(&self) -> &[MediaNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_threshold() {
        let mut node = MediaNode {
            uptime_percent: 95.0,
            ..Default::default()
        };
        assert_eq!(node.status(), NodeStatus::Online);

        node.uptime_percent = 94.99;
        assert_eq!(node.status(), NodeStatus::Offline);
    }

    #[test]
    fn test_decode_is_lenient_about_missing_fields() {
        let nodes: Vec<MediaNode> =
            serde_json::from_str(r#"[{"node_id":"a","uptime_percent":97.5}]"#).unwrap();

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].node_id, "a");
        assert_eq!(nodes[0].uptime_percent, 97.5);
        assert_eq!(nodes[0].node_url, "");
        assert_eq!(nodes[0].total_checks, 0.0);
    }

    #[test]
    fn test_decode_tolerates_nulls_and_float_counters() {
        let nodes: Vec<MediaNode> = serde_json::from_str(
            r#"[
                {"node_id":"a","node_url":null,"uptime_percent":99.1,
                 "total_checks":10.0,"successful":9,"last_checked":null},
                {"node_id":"b","uptime_percent":null,"total_checks":null}
            ]"#,
        )
        .unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].node_url, "");
        assert_eq!(nodes[0].last_checked, "");
        assert_eq!(nodes[0].total_checks, 10.0);
        assert_eq!(nodes[0].successful, 9.0);
        assert_eq!(nodes[1].uptime_percent, 0.0);
        assert_eq!(nodes[1].total_checks, 0.0);
    }

    #[test]
    fn test_decode_rejects_non_array_body() {
        let result = serde_json::from_str::<Vec<MediaNode>>(r#"{"node_id":"a"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_record_sets_get_distinct_generations() {
        let first = RecordSet::new(vec![]);
        let second = RecordSet::new(vec![]);
        assert_ne!(first.generation(), second.generation());
        assert!(first.is_empty());
    }
}
