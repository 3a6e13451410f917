use calvoice_core::{Command, Direction, Event, EventPatch, EventValidationError, Transcript};
use chrono::NaiveDate;
use serde_json::json;

#[test]
fn event_serializes_with_local_timestamps() {
    let start = NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let event = Event::with_id("evt-1", "Standup", start, start + chrono::Duration::minutes(15))
        .unwrap();

    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "evt-1",
            "title": "Standup",
            "start": "2026-10-16T09:00:00",
            "end": "2026-10-16T09:15:00",
            "color": "#4285F4",
            "calendar": "calendar",
        })
    );

    let back: Event = serde_json::from_value(value).unwrap();
    assert_eq!(back, event);
}

#[test]
fn generated_ids_are_unique_uuids() {
    let start = NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let end = start + chrono::Duration::hours(1);
    let first = Event::new("A", start, end).unwrap();
    let second = Event::new("B", start, end).unwrap();
    assert_ne!(first.id, second.id);
    assert!(uuid::Uuid::parse_str(&first.id).is_ok());
}

#[test]
fn blank_title_and_inverted_range_are_rejected() {
    let start = NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    assert_eq!(
        Event::new("   ", start, start + chrono::Duration::hours(1)),
        Err(EventValidationError::EmptyTitle)
    );
    assert!(matches!(
        Event::new("Standup", start, start),
        Err(EventValidationError::EndNotAfterStart { .. })
    ));
}

#[test]
fn commands_are_tagged_by_kind() {
    let value = serde_json::to_value(Command::Navigate {
        direction: Direction::Backward,
    })
    .unwrap();
    assert_eq!(value, json!({"kind": "navigate", "direction": "backward"}));

    let patch = EventPatch {
        title: Some("Renamed".to_string()),
        ..EventPatch::default()
    };
    let value = serde_json::to_value(Command::EditEvent {
        event_id: "1".to_string(),
        patch,
    })
    .unwrap();
    assert_eq!(
        value,
        json!({"kind": "edit_event", "event_id": "1", "patch": {"title": "Renamed"}})
    );
}

#[test]
fn transcript_accepts_service_payload() {
    let transcript: Transcript = serde_json::from_value(json!({
        "text": "lunch with Sarah on Friday",
        "entities": [
            {"type": "PERSON", "value": "Sarah"},
            {"type": "DATE", "value": "Friday"},
            {"type": "EVENT", "value": "lunch"}
        ]
    }))
    .unwrap();
    assert_eq!(transcript.entities.len(), 3);
    assert!(transcript.has_kind(calvoice_core::EntityKind::Date));
    assert_eq!(
        transcript.entities[2].kind,
        calvoice_core::EntityKind::Other
    );

    let bare: Transcript = serde_json::from_value(json!({"text": "go back"})).unwrap();
    assert!(bare.entities.is_empty());
}
