//! Calendar event model.
//!
//! # Responsibility
//! - Define the event record exchanged with the host calendar.
//! - Provide validation and all-day helpers.
//!
//! # Invariants
//! - `id` is non-empty and never reused for another event.
//! - `title` is non-empty after trimming.
//! - `end > start`.
//! - All-day events span `00:00:00.000..=23:59:59.999` of one calendar day.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque stable identifier for a calendar event.
///
/// Hosts may use any string scheme; core-generated ids are UUID v4 strings.
pub type EventId = String;

/// Color applied to events when the caller does not pick one.
pub const DEFAULT_EVENT_COLOR: &str = "#4285F4";
/// Calendar tag applied to events when the caller does not pick one.
pub const DEFAULT_CALENDAR: &str = "calendar";

/// Validation error for event invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    EmptyId,
    EmptyTitle,
    EndNotAfterStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "event id cannot be empty"),
            Self::EmptyTitle => write!(f, "event title cannot be empty"),
            Self::EndNotAfterStart { start, end } => {
                write!(f, "event end `{end}` must be after start `{start}`")
            }
        }
    }
}

impl Error for EventValidationError {}

/// Calendar event as stored by the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    /// Local wall-clock start.
    pub start: NaiveDateTime,
    /// Local wall-clock end, exclusive for overlap purposes.
    pub end: NaiveDateTime,
    /// Display tag, opaque to core.
    pub color: String,
    /// Grouping tag, opaque to core.
    pub calendar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Event {
    /// Creates a validated event with a generated id and default tags.
    pub fn new(
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, EventValidationError> {
        Self::with_id(Uuid::new_v4().to_string(), title, start, end)
    }

    /// Creates a validated event with a caller-provided id.
    ///
    /// Used by hosts that already own an identity scheme.
    pub fn with_id(
        id: impl Into<EventId>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, EventValidationError> {
        let event = Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            color: DEFAULT_EVENT_COLOR.to_string(),
            calendar: DEFAULT_CALENDAR.to_string(),
            description: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// Creates an all-day event on `date`.
    pub fn all_day(
        title: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, EventValidationError> {
        let (start, end) = all_day_bounds(date);
        Self::new(title, start, end)
    }

    /// Validates event invariants.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.id.trim().is_empty() {
            return Err(EventValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        if self.end <= self.start {
            return Err(EventValidationError::EndNotAfterStart {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns whether this event uses the all-day encoding.
    pub fn is_all_day(&self) -> bool {
        let (start, end) = all_day_bounds(self.start.date());
        self.start == start && self.end == end
    }

    /// Returns whether the event starts on `date`.
    pub fn starts_on(&self, date: NaiveDate) -> bool {
        self.start.date() == date
    }

    /// Strict `[start, end)` intersection; touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Event) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Returns the `(start, end)` pair encoding an all-day event on `date`.
pub fn all_day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    (date.and_time(NaiveTime::MIN), date.and_time(end_of_day()))
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid end-of-day time")
}

/// Partial update applied to an existing event by an edit command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.start.is_none() && self.end.is_none()
    }

    /// Applies this patch onto a copy of `event` and validates the result.
    pub fn apply_to(&self, event: &Event) -> Result<Event, EventValidationError> {
        let mut updated = event.clone();
        if let Some(title) = &self.title {
            updated.title = title.clone();
        }
        if let Some(start) = self.start {
            updated.start = start;
        }
        if let Some(end) = self.end {
            updated.end = end;
        }
        updated.validate()?;
        Ok(updated)
    }
}
