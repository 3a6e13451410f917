use calvoice_core::{layout, layout_for_date, Event};
use chrono::{NaiveDate, NaiveDateTime};

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn event(id: &str, start: NaiveDateTime, end: NaiveDateTime) -> Event {
    Event::with_id(id, format!("Event {id}"), start, end).unwrap()
}

fn slot<'a>(placed: &'a [calvoice_core::PlacedEvent], id: &str) -> &'a calvoice_core::PlacedEvent {
    placed.iter().find(|item| item.event.id == id).unwrap()
}

#[test]
fn overlapping_pair_splits_and_separate_event_spans_full_width() {
    let events = vec![
        event("a", at(16, 9, 0), at(16, 10, 0)),
        event("b", at(16, 9, 30), at(16, 10, 30)),
        event("c", at(16, 11, 0), at(16, 12, 0)),
    ];

    let placed = layout(&events);

    assert_eq!((slot(&placed, "a").column, slot(&placed, "a").columns), (0, 2));
    assert_eq!((slot(&placed, "b").column, slot(&placed, "b").columns), (1, 2));
    assert_eq!((slot(&placed, "c").column, slot(&placed, "c").columns), (0, 1));
}

#[test]
fn layout_is_idempotent() {
    let events = vec![
        event("x", at(16, 8, 0), at(16, 12, 0)),
        event("y", at(16, 9, 0), at(16, 10, 0)),
        event("z", at(16, 9, 30), at(16, 11, 0)),
        event("w", at(16, 13, 0), at(16, 14, 0)),
    ];

    let first = layout(&events);
    let second = layout(&events);
    assert_eq!(first, second);
}

#[test]
fn transitive_group_shares_column_count() {
    // a overlaps b, b overlaps c, a and c do not touch.
    let events = vec![
        event("a", at(16, 9, 0), at(16, 10, 0)),
        event("b", at(16, 9, 30), at(16, 11, 0)),
        event("c", at(16, 10, 30), at(16, 12, 0)),
    ];

    let placed = layout(&events);

    assert_eq!(slot(&placed, "a").column, 0);
    assert_eq!(slot(&placed, "b").column, 1);
    assert_eq!(slot(&placed, "c").column, 0);
    assert!(placed.iter().all(|item| item.columns == 2));
}

#[test]
fn overlapping_events_never_share_a_column() {
    let events = vec![
        event("1", at(16, 9, 0), at(16, 12, 0)),
        event("2", at(16, 9, 0), at(16, 10, 0)),
        event("3", at(16, 9, 15), at(16, 9, 45)),
        event("4", at(16, 10, 0), at(16, 11, 0)),
        event("5", at(16, 11, 30), at(16, 13, 0)),
    ];

    let placed = layout(&events);

    for left in &placed {
        for right in &placed {
            if left.event.id != right.event.id && left.event.overlaps(&right.event) {
                assert_ne!(left.column, right.column);
            }
        }
    }
}

#[test]
fn touching_events_reuse_the_column() {
    let events = vec![
        event("a", at(16, 9, 0), at(16, 10, 0)),
        event("b", at(16, 10, 0), at(16, 11, 0)),
    ];

    let placed = layout(&events);
    assert!(placed.iter().all(|item| item.column == 0 && item.columns == 1));
}

#[test]
fn layout_for_date_only_includes_that_day() {
    let events = vec![
        event("today", at(16, 9, 0), at(16, 10, 0)),
        event("tomorrow", at(17, 9, 0), at(17, 10, 0)),
    ];

    let placed = layout_for_date(&events, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].event.id, "today");
    assert_eq!(placed[0].columns, 1);
}
