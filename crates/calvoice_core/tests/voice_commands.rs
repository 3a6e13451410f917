use calvoice_core::{
    BuildError, CalendarHost, CalendarState, CalendarView, Command, Direction, Entity, EntityKind,
    Event, FailureKind, Intent, Transcript, VoiceService,
};
use chrono::{NaiveDate, NaiveDateTime};

fn at(month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Friday, 2026-10-16 10:00.
fn now() -> NaiveDateTime {
    at(10, 16, 10, 0)
}

fn command_for(text: &str, events: &[Event]) -> Command {
    VoiceService::default()
        .interpret(&Transcript::text(text), events, now())
        .command
        .unwrap()
}

fn dentist() -> Event {
    Event::with_id("1", "Dentist Appointment", at(10, 20, 10, 0), at(10, 20, 11, 0)).unwrap()
}

#[test]
fn create_meeting_with_person_at_time() {
    let Command::CreateEvent { event } = command_for("create meeting with John tomorrow at 2pm", &[])
    else {
        panic!("expected create command");
    };
    assert_eq!(event.title, "Meeting With John");
    assert_eq!(event.start, at(10, 17, 14, 0));
    assert_eq!(event.end, at(10, 17, 15, 0));
    assert!(!event.id.is_empty());
}

#[test]
fn birthday_without_time_becomes_all_day() {
    let Command::CreateEvent { event } = command_for("my sister's birthday is on December 25th", &[])
    else {
        panic!("expected create command");
    };
    assert_eq!(event.title, "Sister's Birthday");
    assert!(event.is_all_day());
    assert_eq!(event.start, at(12, 25, 0, 0));
    assert_eq!(
        event.end,
        NaiveDate::from_ymd_opt(2026, 12, 25)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap()
    );
}

#[test]
fn create_without_time_uses_default_window() {
    let Command::CreateEvent { event } = command_for("schedule dentist appointment tomorrow", &[])
    else {
        panic!("expected create command");
    };
    assert_eq!(event.start, at(10, 17, 9, 0));
    assert_eq!(event.end, at(10, 17, 10, 0));
}

#[test]
fn create_with_range_uses_range_end() {
    let Command::CreateEvent { event } =
        command_for("add team sync tomorrow from 12:00 to 1:30 pm", &[])
    else {
        panic!("expected create command");
    };
    assert_eq!(event.start, at(10, 17, 12, 0));
    assert_eq!(event.end, at(10, 17, 13, 30));
}

#[test]
fn create_with_bare_numeric_range() {
    let Command::CreateEvent { event } = command_for("add workshop tomorrow 1-5", &[]) else {
        panic!("expected create command");
    };
    assert_eq!(event.title, "Workshop");
    assert_eq!(event.start, at(10, 17, 13, 0));
    assert_eq!(event.end, at(10, 17, 17, 0));
}

#[test]
fn create_with_spelled_out_range() {
    let Command::CreateEvent { event } =
        command_for("add lunch with sam twelve to two thirty pm tomorrow", &[])
    else {
        panic!("expected create command");
    };
    assert_eq!(event.title, "Lunch With Sam");
    assert_eq!(event.start, at(10, 17, 12, 0));
    assert_eq!(event.end, at(10, 17, 14, 30));
}

#[test]
fn time_range_wins_over_all_day_phrase() {
    let Command::CreateEvent { event } =
        command_for("add offsite all day friday from 9 to 5", &[])
    else {
        panic!("expected create command");
    };
    assert!(!event.is_all_day());
    assert_eq!(event.start, at(10, 23, 9, 0));
    assert_eq!(event.end, at(10, 23, 17, 0));
}

#[test]
fn entities_drive_date_and_time() {
    let transcript = Transcript::with_entities(
        "lunch with Sarah on Friday at noon",
        vec![
            Entity::new(EntityKind::Date, "Friday"),
            Entity::new(EntityKind::Time, "noon"),
            Entity::new(EntityKind::Person, "Sarah"),
        ],
    );
    let interpretation = VoiceService::default().interpret(&transcript, &[], now());
    assert_eq!(interpretation.intent, Intent::Create);
    let Ok(Command::CreateEvent { event }) = interpretation.command else {
        panic!("expected create command");
    };
    assert_eq!(event.title, "Lunch With Sarah");
    assert_eq!(event.start, at(10, 23, 12, 0));
    assert_eq!(event.end, at(10, 23, 13, 0));
}

#[test]
fn delete_matches_title() {
    let command = command_for("delete dentist appointment", &[dentist()]);
    assert_eq!(
        command,
        Command::DeleteEvent {
            event_id: "1".to_string(),
            title: "Dentist Appointment".to_string(),
        }
    );
}

#[test]
fn delete_without_events_fails() {
    let interpretation =
        VoiceService::default().interpret(&Transcript::text("delete lunch"), &[], now());
    assert_eq!(
        interpretation.command,
        Err(BuildError::NoEvents {
            intent: Intent::Delete
        })
    );
}

#[test]
fn delete_falls_back_to_first_event_today() {
    let standup = Event::with_id("s", "Standup", at(10, 16, 9, 0), at(10, 16, 9, 15)).unwrap();
    let later = Event::with_id("r", "Review", at(10, 16, 15, 0), at(10, 16, 16, 0)).unwrap();
    let command = command_for("cancel that", &[later, standup]);
    assert_eq!(
        command,
        Command::DeleteEvent {
            event_id: "s".to_string(),
            title: "Standup".to_string(),
        }
    );
}

#[test]
fn go_to_next_week_navigates() {
    assert_eq!(
        command_for("go to next week", &[]),
        Command::Navigate {
            direction: Direction::Forward
        }
    );
    assert_eq!(
        command_for("go back", &[]),
        Command::Navigate {
            direction: Direction::Backward
        }
    );
}

#[test]
fn go_to_weekday_or_view_never_falls_through() {
    assert_eq!(
        command_for("go to monday", &[]),
        Command::Navigate {
            direction: Direction::Forward
        }
    );
    assert_eq!(
        command_for("go to december", &[]),
        Command::Navigate {
            direction: Direction::Forward
        }
    );
    assert_eq!(
        command_for("go to week view", &[]),
        Command::SwitchView {
            view: CalendarView::Week
        }
    );
}

#[test]
fn go_to_errand_creates_event() {
    let Command::CreateEvent { event } = command_for("go to the gym tomorrow at 6pm", &[]) else {
        panic!("expected create command");
    };
    assert_eq!(event.start, at(10, 17, 18, 0));
}

#[test]
fn view_switch_picks_named_view() {
    assert_eq!(
        command_for("switch to month view", &[]),
        Command::SwitchView {
            view: CalendarView::Month
        }
    );
    assert_eq!(
        command_for("change to week view", &[]),
        Command::SwitchView {
            view: CalendarView::Week
        }
    );
}

#[test]
fn move_keeps_duration_and_changes_time() {
    let command = command_for("move dentist appointment to 3pm", &[dentist()]);
    let Command::EditEvent { event_id, patch } = command else {
        panic!("expected edit command");
    };
    assert_eq!(event_id, "1");
    assert_eq!(patch.start, Some(at(10, 20, 15, 0)));
    assert_eq!(patch.end, Some(at(10, 20, 16, 0)));
    assert_eq!(patch.title, None);
}

#[test]
fn move_to_spelled_out_hour() {
    let standup = Event::with_id("s", "Standup", at(10, 19, 10, 0), at(10, 19, 10, 15)).unwrap();
    let Command::EditEvent { event_id, patch } = command_for("move standup to nine", &[standup])
    else {
        panic!("expected edit command");
    };
    assert_eq!(event_id, "s");
    assert_eq!(patch.start, Some(at(10, 19, 9, 0)));
    assert_eq!(patch.end, Some(at(10, 19, 9, 15)));
}

#[test]
fn move_to_weekday_keeps_time_of_day() {
    let command = command_for("reschedule dentist appointment to Friday", &[dentist()]);
    let Command::EditEvent { patch, .. } = command else {
        panic!("expected edit command");
    };
    assert_eq!(patch.start, Some(at(10, 23, 10, 0)));
    assert_eq!(patch.end, Some(at(10, 23, 11, 0)));
}

#[test]
fn rename_sets_new_title() {
    let command = command_for("rename dentist appointment to dental checkup", &[dentist()]);
    let Command::EditEvent { patch, .. } = command else {
        panic!("expected edit command");
    };
    assert_eq!(patch.title.as_deref(), Some("Dental Checkup"));
    assert_eq!(patch.start, None);
}

#[test]
fn unrecognized_utterance_reports_examples() {
    let mut state = CalendarState::new(now().date());
    let result =
        VoiceService::default().handle_transcript(&mut state, &Transcript::text("hello there"), now());
    assert!(!result.ok);
    assert_eq!(result.failure, Some(FailureKind::Unrecognized));
    assert!(result.message.contains("Try"));
}

#[test]
fn handle_transcript_applies_create_to_host() {
    let mut state = CalendarState::new(now().date());
    let result = VoiceService::default().handle_transcript(
        &mut state,
        &Transcript::text("create meeting with John tomorrow at 2pm"),
        now(),
    );
    assert!(result.ok, "{}", result.message);
    assert_eq!(
        result.message,
        "Created \"Meeting With John\" on Saturday, October 17 at 2 PM."
    );
    let events = state.events();
    assert_eq!(events.len(), 1);
    assert_eq!(result.event_id.as_deref(), Some(events[0].id.as_str()));
}

#[test]
fn handle_transcript_reports_missing_event() {
    let mut state = CalendarState::with_events(
        now().date(),
        vec![Event::with_id("x", "Review", at(10, 20, 15, 0), at(10, 20, 16, 0)).unwrap()],
    )
    .unwrap();
    let result = VoiceService::default().handle_transcript(
        &mut state,
        &Transcript::text("delete the yoga class"),
        now(),
    );
    assert!(!result.ok);
    assert_eq!(result.failure, Some(FailureKind::EventNotFound));
    assert!(result.message.contains("Could not find event"));
    assert_eq!(state.events().len(), 1);
}
