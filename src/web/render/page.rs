//! Template view model for the dashboard page.
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use super::uptime_bar::UptimeBar;
use crate::dashboard::state::DashboardState;
use crate::models::{MediaNode, NodeStatus, SortDirection, SortField, ViewMode};
use crate::notifications::ToastView;

/// Placeholder blocks drawn while the node list is unresolved.
pub const SKELETON_COUNT: usize = 6;
const SKELETON_BRICKS: usize = 20;

/// Table headers that trigger a sort, in display order.
const SORTABLE_COLUMNS: [SortField; 4] = [
    SortField::NodeUrl,
    SortField::NodeVersion,
    SortField::UptimePercent,
    SortField::LastChecked,
];

#[derive(Debug, Serialize)]
pub struct HeadView {
    pub title: String,
    pub description: String,
    pub structured_data: String,
}

#[derive(Debug, Serialize)]
pub struct ColumnView {
    pub field: SortField,
    pub label: String,
    pub active: bool,
    pub direction: Option<SortDirection>,
}

#[derive(Debug, Serialize)]
pub struct NodeView {
    pub node_id: String,
    pub node_url: String,
    /// Only set for `http`/`https` URLs.
    pub href: Option<String>,
    pub node_version: String,
    pub uptime_label: String,
    pub status: NodeStatus,
    pub status_label: String,
    pub badge_variant: &'static str,
    pub success_ratio: String,
    pub last_checked: String,
    pub bar: UptimeBar,
}

#[derive(Debug, Serialize)]
pub struct Labels {
    pub title: String,
    pub subtitle: String,
    pub nodes_heading: String,
    pub avg_uptime: String,
    pub sample: String,
    pub cards: String,
    pub table: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardPage {
    pub lang: String,
    pub head: Option<HeadView>,
    pub labels: Labels,
    pub is_sample: bool,
    pub loading: bool,
    pub view_mode: ViewMode,
    pub columns: Vec<ColumnView>,
    pub nodes: Vec<NodeView>,
    pub toasts: Vec<ToastView>,
    pub skeletons: usize,
    pub skeleton_bricks: usize,
}

impl DashboardPage {
    /// Builds the page from the current state. Pending toasts are consumed.
    pub fn build(state: &mut DashboardState, locale: &str, request_url: &str) -> Self {
        let sort = state.sort();
        let head = state.head().map(|head| HeadView {
            title: head.title.clone(),
            description: head.description.clone(),
            structured_data: head.structured_data_script(request_url),
        });

        let nodes = state
            .sorted_nodes()
            .map(|nodes| {
                nodes
                    .iter()
                    .map(|node| NodeView::new(node, locale, &Local))
                    .collect()
            })
            .unwrap_or_default();

        let columns = SORTABLE_COLUMNS
            .iter()
            .map(|&field| ColumnView {
                field,
                label: column_label(field, locale),
                active: sort.field == field,
                direction: (sort.field == field).then_some(sort.direction),
            })
            .collect();

        let toasts = state
            .take_toasts()
            .iter()
            .map(|toast| toast.localize(locale))
            .collect();

        Self {
            lang: locale.to_string(),
            head,
            labels: Labels {
                title: crate::dashboard::page_head::PAGE_TITLE.to_string(),
                subtitle: t!("app.subtitle", locale = locale).into_owned(),
                nodes_heading: t!("app.nodes_heading", locale = locale).into_owned(),
                avg_uptime: t!("header.avg_uptime", locale = locale, value = state.avg_uptime())
                    .into_owned(),
                sample: t!("header.sample", locale = locale).into_owned(),
                cards: t!("view.cards", locale = locale).into_owned(),
                table: t!("view.table", locale = locale).into_owned(),
                status: t!("table.status", locale = locale).into_owned(),
            },
            is_sample: state.is_sample(),
            loading: state.is_loading(),
            view_mode: state.view_mode(),
            columns,
            nodes,
            toasts,
            skeletons: SKELETON_COUNT,
            skeleton_bricks: SKELETON_BRICKS,
        }
    }
}

fn column_label(field: SortField, locale: &str) -> String {
    let label = match field {
        SortField::NodeUrl => t!("table.node_url", locale = locale),
        SortField::NodeVersion => t!("table.version", locale = locale),
        SortField::UptimePercent => t!("table.uptime", locale = locale),
        SortField::LastChecked => t!("table.last_checked", locale = locale),
        SortField::NodeId | SortField::TotalChecks | SortField::Successful => {
            return field.as_str().to_string();
        }
    };
    label.into_owned()
}

impl NodeView {
    pub fn new<Tz>(node: &MediaNode, locale: &str, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let status = node.status();
        let (status_label, badge_variant) = match status {
            NodeStatus::Online => (t!("status.online", locale = locale), "default"),
            NodeStatus::Offline => (t!("status.offline", locale = locale), "destructive"),
        };

        Self {
            node_id: node.node_id.clone(),
            node_url: node.node_url.clone(),
            href: outbound_href(&node.node_url),
            node_version: node.node_version.clone(),
            uptime_label: format!("{}%", node.uptime_percent),
            status,
            status_label: status_label.into_owned(),
            badge_variant,
            success_ratio: t!(
                "card.successful_checks",
                locale = locale,
                successful = node.successful,
                total = node.total_checks
            )
            .into_owned(),
            last_checked: format_last_checked(&node.last_checked, locale, tz),
            bar: UptimeBar::new(node.uptime_percent, locale),
        }
    }
}

/// Returns the URL when it is safe to emit as a link target.
pub fn outbound_href(url: &str) -> Option<String> {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        None
    }
}

/// Offset-less date-time layouts, with and without seconds.
const NAIVE_PATTERNS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Minute-precision layouts carrying a numeric offset.
const OFFSET_PATTERNS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
}

/// Parses an upstream timestamp. Accepts RFC 3339, RFC 2822 and ISO date-times
/// with or without seconds. A trailing `Z` means UTC, other offset-less
/// date-times are read in `tz`, bare dates as UTC midnight.
pub fn parse_last_checked<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(tz));
    }
    if let Some(dt) = OFFSET_PATTERNS
        .iter()
        .find_map(|pattern| DateTime::parse_from_str(raw, pattern).ok())
    {
        return Some(dt.with_timezone(tz));
    }
    if let Some(utc) = raw.strip_suffix(['Z', 'z']) {
        if let Some(naive) = parse_naive(utc) {
            return Some(Utc.from_utc_datetime(&naive).with_timezone(tz));
        }
    }
    if let Some(naive) = parse_naive(raw) {
        return tz.from_local_datetime(&naive).earliest();
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(tz))
}

/// Locale-formatted `last_checked`, or the locale's "Invalid Date" text.
pub fn format_last_checked<Tz>(raw: &str, locale: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match parse_last_checked(raw, tz) {
        Some(dt) => {
            let pattern = t!("datetime.pattern", locale = locale);
            dt.format(&pattern).to_string()
        }
        None => t!("datetime.invalid", locale = locale).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::page_head::PageHead;
    use crate::dashboard::state::LoadOutcome;

    fn node(id: &str, uptime: f64) -> MediaNode {
        MediaNode {
            node_id: id.to_string(),
            node_url: format!("https://{id}.example"),
            node_version: "v1.0.0".to_string(),
            uptime_percent: uptime,
            total_checks: 100.0,
            successful: uptime,
            last_checked: "2024-05-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_last_checked_formats() {
        assert_eq!(
            format_last_checked("2024-05-01T14:03:09Z", "en", &Utc),
            "5/1/2024, 2:03:09 PM"
        );
        assert_eq!(
            format_last_checked("2024-05-01T14:03:09+02:00", "en", &Utc),
            "5/1/2024, 12:03:09 PM"
        );
        assert_eq!(
            format_last_checked("2024-05-01T09:00:00.123", "zh-CN", &Utc),
            "2024/5/1 09:00:00"
        );
        assert_eq!(format_last_checked("2024-05-01", "en", &Utc), "5/1/2024, 12:00:00 AM");
        assert_eq!(format_last_checked("yesterday", "en", &Utc), "Invalid Date");
    }

    #[test]
    fn test_last_checked_accepts_minute_precision_and_rfc2822() {
        assert_eq!(
            format_last_checked("2024-05-01T10:00Z", "en", &Utc),
            "5/1/2024, 10:00:00 AM"
        );
        assert_eq!(
            format_last_checked("2024-05-01T10:00+02:00", "en", &Utc),
            "5/1/2024, 8:00:00 AM"
        );
        assert_eq!(
            format_last_checked("2024-05-01 10:00", "en", &Utc),
            "5/1/2024, 10:00:00 AM"
        );
        assert_eq!(
            format_last_checked("Wed, 01 May 2024 10:00:00 GMT", "en", &Utc),
            "5/1/2024, 10:00:00 AM"
        );
    }

    #[test]
    fn test_outbound_href_only_allows_http() {
        assert_eq!(outbound_href("https://a.example"), Some("https://a.example".to_string()));
        assert_eq!(outbound_href(" HTTP://b.example "), Some("HTTP://b.example".to_string()));
        assert_eq!(outbound_href("javascript:alert(1)"), None);
        assert_eq!(outbound_href("a.example"), None);
    }

    #[test]
    fn test_node_view_classification() {
        let online = NodeView::new(&node("a", 97.0), "en", &Utc);
        assert_eq!(online.status, NodeStatus::Online);
        assert_eq!(online.status_label, "Online");
        assert_eq!(online.badge_variant, "default");
        assert_eq!(online.uptime_label, "97%");
        assert_eq!(online.success_ratio, "97/100 successful checks");

        let offline = NodeView::new(&node("b", 92.5), "en", &Utc);
        assert_eq!(offline.status, NodeStatus::Offline);
        assert_eq!(offline.badge_variant, "destructive");
        assert_eq!(offline.uptime_label, "92.5%");
    }

    #[test]
    fn test_page_while_loading() {
        let mut state = DashboardState::new();
        state.activate(PageHead::new(None));

        let page = DashboardPage::build(&mut state, "en", "/");
        assert!(page.loading);
        assert!(page.nodes.is_empty());
        assert_eq!(page.skeletons, 6);
        assert_eq!(page.labels.avg_uptime, "Avg Uptime: 0%");
    }

    #[test]
    fn test_page_consumes_toasts() {
        let mut state = DashboardState::new();
        let mount = state.activate(PageHead::new(None));
        state.apply_load(mount, LoadOutcome::Failed { fallback: None });

        let first = DashboardPage::build(&mut state, "en", "/");
        assert_eq!(first.toasts.len(), 1);
        assert_eq!(first.toasts[0].title, "Failed to load data");

        let second = DashboardPage::build(&mut state, "en", "/");
        assert!(second.toasts.is_empty());
    }

    #[test]
    fn test_columns_mark_active_sort() {
        let mut state = DashboardState::new();
        let mount = state.activate(PageHead::new(None));
        state.apply_load(mount, LoadOutcome::Loaded(vec![node("a", 97.0), node("b", 40.0)]));

        let page = DashboardPage::build(&mut state, "en", "/");
        let active: Vec<_> = page.columns.iter().filter(|c| c.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].field, SortField::UptimePercent);
        assert_eq!(active[0].direction, Some(SortDirection::Desc));
        assert_eq!(page.nodes[0].node_id, "a");
        assert_eq!(page.labels.avg_uptime, "Avg Uptime: 69%");
    }
}
