use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::media_node::MediaNode;

/// A sortable attribute of [`MediaNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    NodeId,
    NodeUrl,
    NodeVersion,
    UptimePercent,
    TotalChecks,
    Successful,
    LastChecked,
}

/// The value a node contributes to a comparison on some field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortKey<'a> {
    Text(&'a str),
    Number(f64),
}

impl SortKey<'_> {
    /// Numeric view of the key; text has no numeric value.
    pub fn as_number(&self) -> f64 {
        match self {
            SortKey::Text(_) => f64::NAN,
            SortKey::Number(n) => *n,
        }
    }
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::NodeId => "node_id",
            SortField::NodeUrl => "node_url",
            SortField::NodeVersion => "node_version",
            SortField::UptimePercent => "uptime_percent",
            SortField::TotalChecks => "total_checks",
            SortField::Successful => "successful",
            SortField::LastChecked => "last_checked",
        }
    }

    pub fn key<'a>(&self, node: &'a MediaNode) -> SortKey<'a> {
        match self {
            SortField::NodeId => SortKey::Text(&node.node_id),
            SortField::NodeUrl => SortKey::Text(&node.node_url),
            SortField::NodeVersion => SortKey::Text(&node.node_version),
            SortField::UptimePercent => SortKey::Number(node.uptime_percent),
            SortField::TotalChecks => SortKey::Number(node.total_checks),
            SortField::Successful => SortKey::Number(node.successful),
            SortField::LastChecked => SortKey::Text(&node.last_checked),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "node_id" => Ok(SortField::NodeId),
            "node_url" => Ok(SortField::NodeUrl),
            "node_version" => Ok(SortField::NodeVersion),
            "uptime_percent" => Ok(SortField::UptimePercent),
            "total_checks" => Ok(SortField::TotalChecks),
            "successful" => Ok(SortField::Successful),
            "last_checked" => Ok(SortField::LastChecked),
            other => Err(format!("Unknown sort field: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// +1 for ascending, -1 for descending.
    pub fn modifier(self) -> i8 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Cards,
    #[default]
    Table,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cards" => Ok(ViewMode::Cards),
            "table" => Ok(ViewMode::Table),
            other => Err(format!("Unknown view mode: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_round_trips_through_its_name() {
        for field in [
            SortField::NodeId,
            SortField::NodeUrl,
            SortField::NodeVersion,
            SortField::UptimePercent,
            SortField::TotalChecks,
            SortField::Successful,
            SortField::LastChecked,
        ] {
            assert_eq!(field.as_str().parse::<SortField>().unwrap(), field);
        }
        assert!("uptime".parse::<SortField>().is_err());
    }

    #[test]
    fn test_keys_follow_field_types() {
        let node = MediaNode {
            node_url: "https://a.example".to_string(),
            total_checks: 12.0,
            ..Default::default()
        };
        assert_eq!(SortField::NodeUrl.key(&node), SortKey::Text("https://a.example"));
        assert_eq!(SortField::TotalChecks.key(&node), SortKey::Number(12.0));
        assert!(SortKey::Text("x").as_number().is_nan());
    }

    #[test]
    fn test_view_mode_defaults_to_table() {
        assert_eq!(ViewMode::default(), ViewMode::Table);
        assert_eq!("cards".parse::<ViewMode>().unwrap(), ViewMode::Cards);
        assert!("grid".parse::<ViewMode>().is_err());
    }
}
