//! Greedy interval-graph coloring for one day of events.
//!
//! # Invariants
//! - Two overlapping events never share a `column`.
//! - Every event in a transitively-connected overlap group shares one
//!   `columns` value equal to `1 + max(column)` within that group.
//! - Output order is deterministic: `start ASC, end DESC, id ASC`.

use crate::model::event::Event;
use chrono::NaiveDate;
use log::debug;
use std::cmp::Ordering;

/// Event annotated with its render slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedEvent {
    pub event: Event,
    /// Zero-based column inside the overlap group.
    pub column: usize,
    /// Number of columns shared by the whole overlap group.
    pub columns: usize,
}

/// Lays out `events` side by side.
///
/// Callers must reject events with `end <= start` before calling; such
/// events never overlap anything and simply land in column 0.
pub fn layout(events: &[Event]) -> Vec<PlacedEvent> {
    if events.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by(|a, b| layout_order(a, b));

    let mut columns_assigned: Vec<usize> = Vec::with_capacity(sorted.len());
    for (index, event) in sorted.iter().enumerate() {
        let used: Vec<usize> = sorted[..index]
            .iter()
            .zip(&columns_assigned)
            .filter(|(placed, _)| event.overlaps(placed))
            .map(|(_, column)| *column)
            .collect();
        let mut column = 0;
        while used.contains(&column) {
            column += 1;
        }
        columns_assigned.push(column);
    }

    let groups = overlap_groups(&sorted);
    let mut group_width = vec![0usize; sorted.len()];
    for (index, root) in groups.iter().enumerate() {
        group_width[*root] = group_width[*root].max(columns_assigned[index] + 1);
    }

    debug!(
        "event=layout_computed module=layout events={} max_columns={}",
        sorted.len(),
        group_width.iter().max().copied().unwrap_or(0)
    );

    sorted
        .into_iter()
        .enumerate()
        .map(|(index, event)| PlacedEvent {
            event: event.clone(),
            column: columns_assigned[index],
            columns: group_width[groups[index]],
        })
        .collect()
}

/// Lays out only the events starting on `date`.
pub fn layout_for_date(events: &[Event], date: NaiveDate) -> Vec<PlacedEvent> {
    let day_events: Vec<Event> = events_on(events, date).into_iter().cloned().collect();
    layout(&day_events)
}

/// Returns events whose start falls on `date`, ordered by start time.
pub fn events_on(events: &[Event], date: NaiveDate) -> Vec<&Event> {
    let mut matched: Vec<&Event> = events.iter().filter(|event| event.starts_on(date)).collect();
    matched.sort_by(|a, b| layout_order(a, b));
    matched
}

fn layout_order(a: &Event, b: &Event) -> Ordering {
    a.start
        .cmp(&b.start)
        .then_with(|| b.end.cmp(&a.end))
        .then_with(|| a.id.cmp(&b.id))
}

/// Returns, per event index, the representative index of its overlap group.
fn overlap_groups(sorted: &[&Event]) -> Vec<usize> {
    let mut parent: Vec<usize> = (0..sorted.len()).collect();

    for i in 0..sorted.len() {
        for j in (i + 1)..sorted.len() {
            if sorted[i].overlaps(sorted[j]) {
                let root_i = find_root(&mut parent, i);
                let root_j = find_root(&mut parent, j);
                if root_i != root_j {
                    parent[root_j.max(root_i)] = root_i.min(root_j);
                }
            }
        }
    }

    (0..sorted.len())
        .map(|index| find_root(&mut parent, index))
        .collect()
}

fn find_root(parent: &mut [usize], mut index: usize) -> usize {
    while parent[index] != index {
        parent[index] = parent[parent[index]];
        index = parent[index];
    }
    index
}
