//! Structured commands derived from one utterance.
//!
//! # Invariants
//! - `Intent` priority order is `Delete > Edit > SwitchView > Create > Navigate`.
//! - Commands are not persisted; each one is executed once and dropped.

use crate::model::event::{Event, EventId, EventPatch};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Calendar grid view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarView {
    Day,
    Week,
    Month,
}

impl CalendarView {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl Display for CalendarView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigation step relative to the focused period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Signed step: `+1` forward, `-1` backward.
    pub fn step(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Intent recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Create,
    Edit,
    Delete,
    Navigate,
    SwitchView,
    Unrecognized,
}

impl Intent {
    /// Keyword-scored intents, highest priority first.
    pub const PRIORITY: [Intent; 5] = [
        Intent::Delete,
        Intent::Edit,
        Intent::SwitchView,
        Intent::Create,
        Intent::Navigate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Navigate => "navigate",
            Self::SwitchView => "switch_view",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Command produced by a builder and consumed by the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    CreateEvent { event: Event },
    EditEvent { event_id: EventId, patch: EventPatch },
    DeleteEvent { event_id: EventId, title: String },
    Navigate { direction: Direction },
    SwitchView { view: CalendarView },
    GoToToday,
    Unrecognized,
}

impl Command {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateEvent { .. } => "create_event",
            Self::EditEvent { .. } => "edit_event",
            Self::DeleteEvent { .. } => "delete_event",
            Self::Navigate { .. } => "navigate",
            Self::SwitchView { .. } => "switch_view",
            Self::GoToToday => "go_to_today",
            Self::Unrecognized => "unrecognized",
        }
    }
}
