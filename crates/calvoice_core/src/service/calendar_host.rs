//! Collaborator contract for the calendar that commands act upon.
//!
//! # Responsibility
//! - Describe the event store and view controls core drives.
//! - Report host-side refusals as typed `HostError` values.
//!
//! # Invariants
//! - Mutations are keyed by `EventId` and idempotent by id.
//! - Hosts must validate events before storing them.

use crate::model::command::{CalendarView, Direction};
use crate::model::event::{Event, EventId, EventValidationError};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type HostResult<T> = Result<T, HostError>;

/// Refusal reported by a calendar host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    NotFound(EventId),
    DuplicateId(EventId),
    Invalid(EventValidationError),
    /// The host could not be reached or refused for its own reasons.
    Unavailable(String),
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "event not found: {id}"),
            Self::DuplicateId(id) => write!(f, "event id already exists: {id}"),
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "calendar unavailable: {message}"),
        }
    }
}

impl Error for HostError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateId(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<EventValidationError> for HostError {
    fn from(value: EventValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Calendar operations the executor relies on.
pub trait CalendarHost {
    /// Snapshot of every stored event.
    fn events(&self) -> Vec<Event>;
    fn add_event(&mut self, event: Event) -> HostResult<()>;
    /// Replaces the stored event with id `id`.
    fn update_event(&mut self, id: &str, event: Event) -> HostResult<()>;
    fn delete_event(&mut self, id: &str) -> HostResult<()>;
    fn navigate(&mut self, direction: Direction) -> HostResult<()>;
    fn switch_view(&mut self, view: CalendarView) -> HostResult<()>;
    fn go_to_today(&mut self, today: NaiveDate) -> HostResult<()>;
}
