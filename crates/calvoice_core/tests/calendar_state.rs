use calvoice_core::{
    execute, CalendarHost, CalendarState, CalendarView, Command, Direction, Event, EventPatch,
    FailureKind, HostError,
};
use chrono::{NaiveDate, NaiveDateTime};

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).unwrap()
}

fn at(month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(month, day).and_hms_opt(hour, minute, 0).unwrap()
}

fn seeded() -> CalendarState {
    CalendarState::with_events(
        date(10, 16),
        vec![
            Event::with_id("b", "Review", at(10, 16, 13, 0), at(10, 16, 14, 0)).unwrap(),
            Event::with_id("a", "Standup", at(10, 16, 9, 0), at(10, 16, 9, 15)).unwrap(),
            Event::with_id("c", "Offsite", at(10, 17, 9, 0), at(10, 17, 17, 0)).unwrap(),
        ],
    )
    .unwrap()
}

#[test]
fn events_on_returns_day_events_in_start_order() {
    let state = seeded();
    let ids: Vec<&str> = state
        .events_on(date(10, 16))
        .iter()
        .map(|event| event.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(state.focus_layout().len(), 2);
}

#[test]
fn apply_is_functional() {
    let state = seeded();
    let (next, result) = state.apply(
        &Command::DeleteEvent {
            event_id: "a".to_string(),
            title: "Standup".to_string(),
        },
        date(10, 16),
    );
    assert!(result.ok);
    assert_eq!(result.message, "Deleted \"Standup\".");
    assert_eq!(state.event_list().len(), 3);
    assert_eq!(next.event_list().len(), 2);
    assert!(next.find_event("a").is_none());
}

#[test]
fn failed_apply_returns_unchanged_state() {
    let state = seeded();
    let (next, result) = state.apply(
        &Command::DeleteEvent {
            event_id: "missing".to_string(),
            title: "Ghost".to_string(),
        },
        date(10, 16),
    );
    assert!(!result.ok);
    assert_eq!(result.failure, Some(FailureKind::EventNotFound));
    assert_eq!(next, state);
}

#[test]
fn edit_applies_patch_and_describes_new_time() {
    let mut state = seeded();
    let patch = EventPatch {
        start: Some(at(10, 16, 15, 30)),
        end: Some(at(10, 16, 16, 30)),
        ..EventPatch::default()
    };
    let result = execute(
        &Command::EditEvent {
            event_id: "b".to_string(),
            patch,
        },
        &mut state,
        date(10, 16),
    );
    assert!(result.ok);
    assert_eq!(
        result.message,
        "Updated \"Review\", now on Friday, October 16 at 3:30 PM."
    );
    assert_eq!(state.find_event("b").unwrap().start, at(10, 16, 15, 30));
}

#[test]
fn edit_rejects_inverted_range() {
    let mut state = seeded();
    let patch = EventPatch {
        end: Some(at(10, 16, 12, 0)),
        ..EventPatch::default()
    };
    let result = execute(
        &Command::EditEvent {
            event_id: "b".to_string(),
            patch,
        },
        &mut state,
        date(10, 16),
    );
    assert!(!result.ok);
    assert_eq!(result.failure, Some(FailureKind::InvalidEvent));
    assert_eq!(state.find_event("b").unwrap().end, at(10, 16, 14, 0));
}

#[test]
fn navigation_moves_by_active_view() {
    let mut state = seeded();
    state.navigate(Direction::Forward).unwrap();
    assert_eq!(state.focus_date(), date(10, 23));

    state.switch_view(CalendarView::Month).unwrap();
    state.navigate(Direction::Backward).unwrap();
    assert_eq!(state.focus_date(), date(9, 23));

    state.switch_view(CalendarView::Day).unwrap();
    state.navigate(Direction::Backward).unwrap();
    assert_eq!(state.focus_date(), date(9, 22));

    let result = execute(&Command::GoToToday, &mut state, date(10, 16));
    assert!(result.ok);
    assert_eq!(state.focus_date(), date(10, 16));
    assert_eq!(result.message, "Showing today, Friday, October 16.");
}

#[test]
fn host_rejects_duplicates_and_unknown_ids() {
    let mut state = seeded();
    let duplicate = Event::with_id("a", "Other", at(10, 18, 9, 0), at(10, 18, 10, 0)).unwrap();
    assert_eq!(
        state.add_event(duplicate.clone()),
        Err(HostError::DuplicateId("a".to_string()))
    );
    assert_eq!(
        state.update_event("zzz", duplicate),
        Err(HostError::NotFound("zzz".to_string()))
    );
    assert_eq!(
        state.delete_event("zzz"),
        Err(HostError::NotFound("zzz".to_string()))
    );
}

#[test]
fn all_day_events_are_described_as_all_day() {
    let mut state = CalendarState::new(date(10, 16));
    let event = Event::all_day("Sister's Birthday", date(12, 25)).unwrap();
    let result = execute(&Command::CreateEvent { event }, &mut state, date(10, 16));
    assert_eq!(
        result.message,
        "Created \"Sister's Birthday\" all day on Friday, December 25."
    );
}

#[test]
fn state_serializes_for_the_host() {
    let state = CalendarState::new(date(10, 16));
    let value = serde_json::to_value(&state).unwrap();
    assert_eq!(value["focus_date"], "2026-10-16");
    assert_eq!(value["view"], "week");
    assert_eq!(value["events"], serde_json::json!([]));
}
