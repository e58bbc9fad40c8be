//! Client-side ordering of the loaded node set.
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::models::{MediaNode, RecordSet, SortDirection, SortField, SortKey};

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::UptimePercent,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    /// Header click: the active field flips direction, any other field
    /// becomes active with a descending direction.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Desc;
        }
    }
}

/// Locale-style text ordering: case-insensitive first, then lowercase
/// before uppercase, then code point order.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);

    folded_a
        .cmp(folded_b)
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

/// Compares two nodes on `field`. Text compares with [`locale_compare`];
/// everything else by the sign of the numeric difference.
pub fn compare_nodes(
    a: &MediaNode,
    b: &MediaNode,
    field: SortField,
    direction: SortDirection,
) -> Ordering {
    let ordering = match (field.key(a), field.key(b)) {
        (SortKey::Text(x), SortKey::Text(y)) => locale_compare(x, y),
        (x, y) => {
            let diff = x.as_number() - y.as_number();
            diff.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
        }
    };

    if direction.modifier() < 0 {
        ordering.reverse()
    } else {
        ordering
    }
}

/// Returns a sorted copy of `nodes`. The sort is stable, so equal keys keep
/// their source order in either direction.
pub fn sort_nodes(nodes: &[MediaNode], sort: SortState) -> Vec<MediaNode> {
    let mut sorted = nodes.to_vec();
    sorted.sort_by(|a, b| compare_nodes(a, b, sort.field, sort.direction));
    sorted
}

/// Sorted view of a record set, recomputed only when the set generation or
/// the sort state changes.
#[derive(Debug, Default)]
pub struct SortedProjection {
    key: Option<(u64, SortState)>,
    cached: Option<Arc<[MediaNode]>>,
    recomputations: u64,
}

impl SortedProjection {
    pub fn get(&mut self, records: Option<&RecordSet>, sort: SortState) -> Option<Arc<[MediaNode]>> {
        let Some(records) = records else {
            self.key = None;
            self.cached = None;
            return None;
        };

        let key = (records.generation(), sort);
        if self.key != Some(key) || self.cached.is_none() {
            self.cached = Some(sort_nodes(records.nodes(), sort).into());
            self.key = Some(key);
            self.recomputations += 1;
        }
        self.cached.clone()
    }

    /// How many times the projection has been rebuilt.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
