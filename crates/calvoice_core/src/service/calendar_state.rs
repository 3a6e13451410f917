//! In-memory calendar state.
//!
//! # Responsibility
//! - Hold the focus date, active view and event list as one value.
//! - Serve as the reference `CalendarHost` for callers without their own store.
//! - Offer a functional `apply` that returns the next state instead of
//!   mutating the current one.
//!
//! # Invariants
//! - Stored events are valid and ids are unique.
//! - Month navigation clamps the focus day to the target month's length.

use crate::layout::overlap::{events_on, layout_for_date, PlacedEvent};
use crate::model::command::{CalendarView, Command, Direction};
use crate::model::event::{Event, EventValidationError};
use crate::nlp::dates::add_months;
use crate::service::calendar_host::{CalendarHost, HostError, HostResult};
use crate::service::executor::{execute, ExecutionResult};
use chrono::{Duration, NaiveDate, NaiveTime};
use log::debug;
use serde::{Deserialize, Serialize};

const DRAFT_TITLE: &str = "New Event";
const DRAFT_START_HOUR: u32 = 9;
const DRAFT_DURATION_MINUTES: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarState {
    focus_date: NaiveDate,
    view: CalendarView,
    events: Vec<Event>,
}

impl CalendarState {
    /// Empty calendar focused on `focus_date` in week view.
    pub fn new(focus_date: NaiveDate) -> Self {
        Self {
            focus_date,
            view: CalendarView::Week,
            events: Vec::new(),
        }
    }

    /// Seeds the state with existing events.
    ///
    /// # Errors
    /// - `HostError::Invalid` when any event breaks event invariants.
    /// - `HostError::DuplicateId` when two events share an id.
    pub fn with_events(focus_date: NaiveDate, events: Vec<Event>) -> HostResult<Self> {
        let mut state = Self::new(focus_date);
        for event in events {
            state.add_event(event)?;
        }
        Ok(state)
    }

    pub fn focus_date(&self) -> NaiveDate {
        self.focus_date
    }

    pub fn view(&self) -> CalendarView {
        self.view
    }

    pub fn event_list(&self) -> &[Event] {
        &self.events
    }

    pub fn find_event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Events starting on `date`, ordered by start.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        events_on(&self.events, date)
    }

    /// Column layout for the focus date.
    pub fn focus_layout(&self) -> Vec<PlacedEvent> {
        layout_for_date(&self.events, self.focus_date)
    }

    /// Editor default: a one-hour "New Event" at 09:00 on the focus date.
    pub fn draft_event(&self) -> Result<Event, EventValidationError> {
        let start = self.focus_date.and_time(draft_start_time());
        Event::new(DRAFT_TITLE, start, start + Duration::minutes(DRAFT_DURATION_MINUTES))
    }

    /// Executes `command` against a copy of this state.
    ///
    /// Returns the next state together with the execution outcome; on
    /// failure the returned state equals `self`.
    pub fn apply(&self, command: &Command, today: NaiveDate) -> (CalendarState, ExecutionResult) {
        let mut next = self.clone();
        let result = execute(command, &mut next, today);
        if !result.ok {
            return (self.clone(), result);
        }
        (next, result)
    }

    fn position(&self, id: &str) -> HostResult<usize> {
        self.events
            .iter()
            .position(|event| event.id == id)
            .ok_or_else(|| HostError::NotFound(id.to_string()))
    }
}

impl CalendarHost for CalendarState {
    fn events(&self) -> Vec<Event> {
        self.events.clone()
    }

    fn add_event(&mut self, event: Event) -> HostResult<()> {
        event.validate()?;
        if self.find_event(&event.id).is_some() {
            return Err(HostError::DuplicateId(event.id));
        }
        self.events.push(event);
        Ok(())
    }

    fn update_event(&mut self, id: &str, event: Event) -> HostResult<()> {
        event.validate()?;
        let index = self.position(id)?;
        if event.id != id && self.find_event(&event.id).is_some() {
            return Err(HostError::DuplicateId(event.id));
        }
        self.events[index] = event;
        Ok(())
    }

    fn delete_event(&mut self, id: &str) -> HostResult<()> {
        let index = self.position(id)?;
        self.events.remove(index);
        Ok(())
    }

    fn navigate(&mut self, direction: Direction) -> HostResult<()> {
        self.focus_date = shift_focus(self.focus_date, self.view, direction).ok_or_else(|| {
            HostError::Unavailable("focus date out of supported range".to_string())
        })?;
        debug!(
            "event=calendar_navigated module=service view={} step={}",
            self.view,
            direction.step()
        );
        Ok(())
    }

    fn switch_view(&mut self, view: CalendarView) -> HostResult<()> {
        self.view = view;
        Ok(())
    }

    fn go_to_today(&mut self, today: NaiveDate) -> HostResult<()> {
        self.focus_date = today;
        Ok(())
    }
}

/// Moves `focus` one view-sized step: a month, a week or a day.
pub fn shift_focus(focus: NaiveDate, view: CalendarView, direction: Direction) -> Option<NaiveDate> {
    let step = direction.step();
    match view {
        CalendarView::Month => add_months(focus, step),
        CalendarView::Week => focus.checked_add_signed(Duration::days(7 * i64::from(step))),
        CalendarView::Day => focus.checked_add_signed(Duration::days(i64::from(step))),
    }
}

fn draft_start_time() -> NaiveTime {
    NaiveTime::from_hms_opt(DRAFT_START_HOUR, 0, 0).expect("valid draft start time")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn month_navigation_clamps_day() {
        let next = shift_focus(date(2026, 1, 31), CalendarView::Month, Direction::Forward);
        assert_eq!(next, Some(date(2026, 2, 28)));
    }

    #[test]
    fn week_and_day_navigation_step_by_days() {
        let focus = date(2026, 10, 16);
        assert_eq!(
            shift_focus(focus, CalendarView::Week, Direction::Backward),
            Some(date(2026, 10, 9))
        );
        assert_eq!(
            shift_focus(focus, CalendarView::Day, Direction::Forward),
            Some(date(2026, 10, 17))
        );
    }

    #[test]
    fn draft_event_spans_nine_to_ten() {
        let state = CalendarState::new(date(2026, 10, 16));
        let draft = state.draft_event().unwrap();
        assert_eq!(draft.title, "New Event");
        assert_eq!(draft.start, date(2026, 10, 16).and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(draft.duration(), Duration::hours(1));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let state = CalendarState::new(date(2026, 10, 16));
        let event = state.draft_event().unwrap();
        let result = CalendarState::with_events(date(2026, 10, 16), vec![event.clone(), event]);
        assert!(matches!(result, Err(HostError::DuplicateId(_))));
    }
}
