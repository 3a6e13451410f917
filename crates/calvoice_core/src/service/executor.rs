//! Command executor.
//!
//! # Responsibility
//! - Apply one `Command` to a `CalendarHost`.
//! - Turn every outcome into a user-facing `ExecutionResult`.
//!
//! # Invariants
//! - Execution never panics; every failure is reported as `ok = false`.
//! - Failed commands leave the host untouched.

use crate::model::command::{Command, Direction};
use crate::model::event::{Event, EventId};
use crate::nlp::builders::BuildError;
use crate::nlp::times::{format_clock, format_hour, TimeOfDay};
use crate::service::calendar_host::{CalendarHost, HostError};
use chrono::{NaiveDate, Timelike};
use log::{info, warn};
use serde::{Deserialize, Serialize};

const EXAMPLE_PHRASES: &str = "Try \"schedule lunch with Sam tomorrow at noon\", \
\"move dentist appointment to Friday\", \"delete team meeting\" or \"switch to month view\".";

/// Category of a failed execution, for callers that branch on failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Unrecognized,
    EventNotFound,
    NothingToChange,
    InvalidEvent,
    Host,
    Transcription,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unrecognized => "unrecognized",
            Self::EventNotFound => "event_not_found",
            Self::NothingToChange => "nothing_to_change",
            Self::InvalidEvent => "invalid_event",
            Self::Host => "host",
            Self::Transcription => "transcription",
        }
    }
}

/// Outcome envelope shown to the user after a voice command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub ok: bool,
    /// Confirmation or explanation text.
    pub message: String,
    /// Event created, edited or deleted by the command.
    pub event_id: Option<EventId>,
    pub failure: Option<FailureKind>,
}

impl ExecutionResult {
    pub fn success(message: impl Into<String>, event_id: Option<EventId>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            event_id,
            failure: None,
        }
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            event_id: None,
            failure: Some(kind),
        }
    }

    /// Explains why no command could be built.
    pub fn from_build_error(err: &BuildError) -> Self {
        match err {
            BuildError::NoEvents { .. } => Self::failure(
                FailureKind::EventNotFound,
                "Could not find event: your calendar has no events yet.",
            ),
            BuildError::EventNotFound { .. } => Self::failure(
                FailureKind::EventNotFound,
                "Could not find event matching that description. Try saying its title.",
            ),
            BuildError::NothingToChange { title } => Self::failure(
                FailureKind::NothingToChange,
                format!("Found \"{title}\" but heard no new title, date or time."),
            ),
            BuildError::InvalidEvent(err) => Self::failure(
                FailureKind::InvalidEvent,
                format!("That change would make an invalid event: {err}."),
            ),
            BuildError::DurationOutOfRange { minutes } => Self::failure(
                FailureKind::InvalidEvent,
                format!("A duration of {minutes} minutes does not fit on the calendar."),
            ),
        }
    }

    pub fn unrecognized() -> Self {
        Self::failure(
            FailureKind::Unrecognized,
            format!("Sorry, I didn't understand that. {EXAMPLE_PHRASES}"),
        )
    }
}

/// Applies `command` to `host`.
///
/// `today` is the date `GoToToday` jumps to.
pub fn execute<H: CalendarHost + ?Sized>(
    command: &Command,
    host: &mut H,
    today: NaiveDate,
) -> ExecutionResult {
    let result = match command {
        Command::CreateEvent { event } => match host.add_event(event.clone()) {
            Ok(()) => ExecutionResult::success(
                format!("Created \"{}\" {}.", event.title, describe_when(event)),
                Some(event.id.clone()),
            ),
            Err(err) => host_failure(&err),
        },
        Command::EditEvent { event_id, patch } => {
            let Some(current) = host.events().into_iter().find(|event| &event.id == event_id)
            else {
                return log_outcome(command, host_failure(&HostError::NotFound(event_id.clone())));
            };
            match patch.apply_to(&current) {
                Ok(updated) => match host.update_event(event_id, updated.clone()) {
                    Ok(()) => ExecutionResult::success(
                        format!("Updated \"{}\", now {}.", updated.title, describe_when(&updated)),
                        Some(event_id.clone()),
                    ),
                    Err(err) => host_failure(&err),
                },
                Err(err) => ExecutionResult::from_build_error(&BuildError::InvalidEvent(err)),
            }
        }
        Command::DeleteEvent { event_id, title } => match host.delete_event(event_id) {
            Ok(()) => ExecutionResult::success(
                format!("Deleted \"{title}\"."),
                Some(event_id.clone()),
            ),
            Err(err) => host_failure(&err),
        },
        Command::Navigate { direction } => match host.navigate(*direction) {
            Ok(()) => ExecutionResult::success(
                match direction {
                    Direction::Forward => "Moved forward.",
                    Direction::Backward => "Moved back.",
                },
                None,
            ),
            Err(err) => host_failure(&err),
        },
        Command::SwitchView { view } => match host.switch_view(*view) {
            Ok(()) => ExecutionResult::success(format!("Switched to {view} view."), None),
            Err(err) => host_failure(&err),
        },
        Command::GoToToday => match host.go_to_today(today) {
            Ok(()) => ExecutionResult::success(
                format!("Showing today, {}.", today.format("%A, %B %-d")),
                None,
            ),
            Err(err) => host_failure(&err),
        },
        Command::Unrecognized => ExecutionResult::unrecognized(),
    };
    log_outcome(command, result)
}

/// Human phrase for when an event happens (`on Friday, October 16 at 2 PM`).
pub fn describe_when(event: &Event) -> String {
    let day = event.start.format("%A, %B %-d");
    if event.is_all_day() {
        return format!("all day on {day}");
    }
    format!("on {day} at {}", time_label(event.start.hour(), event.start.minute()))
}

fn time_label(hour: u32, minute: u32) -> String {
    if minute == 0 {
        return format_hour(hour);
    }
    TimeOfDay::new(hour, minute).map_or_else(|| format_hour(hour), format_clock)
}

fn host_failure(err: &HostError) -> ExecutionResult {
    match err {
        HostError::NotFound(_) => ExecutionResult::failure(
            FailureKind::EventNotFound,
            "Could not find event; it may have been removed already.",
        ),
        HostError::Invalid(err) => ExecutionResult::failure(
            FailureKind::InvalidEvent,
            format!("The calendar rejected the event: {err}."),
        ),
        HostError::DuplicateId(_) | HostError::Unavailable(_) => ExecutionResult::failure(
            FailureKind::Host,
            format!("The calendar could not apply that change: {err}."),
        ),
    }
}

fn log_outcome(command: &Command, result: ExecutionResult) -> ExecutionResult {
    match result.failure {
        None => info!(
            "event=command_executed module=service command={} status=ok",
            command.kind()
        ),
        Some(kind) => warn!(
            "event=command_executed module=service command={} status=error failure={}",
            command.kind(),
            kind.as_str()
        ),
    }
    result
}
