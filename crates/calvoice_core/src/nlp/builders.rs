//! Per-intent command builders.
//!
//! # Responsibility
//! - Turn a classified utterance into one `Command`.
//! - Locate the target event for edit/delete requests.
//!
//! # Invariants
//! - Builders never mutate events; they only read the supplied slice.
//! - Created events always satisfy `Event::validate()`.
//! - Edits keep the original duration unless an explicit end is given.

use crate::config::InterpreterConfig;
use crate::layout::overlap::events_on;
use crate::model::command::{CalendarView, Command, Direction, Intent};
use crate::model::entity::{EntityKind, Transcript};
use crate::model::event::{all_day_bounds, Event, EventPatch, EventValidationError};
use crate::nlp::all_day::detect_all_day;
use crate::nlp::dates::{resolve_date, resolve_transcript_date};
use crate::nlp::lexicon::{
    month_alternation, normalize_utterance, weekday_alternation, VIEW_TOKENS,
};
use crate::nlp::times::{
    normalize_spoken_numbers, parse_bare_time, resolve_time, resolve_time_range, TimeOfDay,
    TimeRange,
};
use crate::nlp::title::{capitalize_words, extract_title, search_phrase, search_words};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static RENAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\brename\s+(?:the\s+|my\s+)?(?P<old>.+?)\s+(?:to|as)\s+(?P<new>.+)$")
        .expect("valid rename regex")
});
static CHANGE_TARGET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s(?:to|until|for)\s").expect("valid change target regex"));
static BACKWARD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:back|backward|backwards|previous|prev|last|yesterday|prior|earlier)\b")
        .expect("valid backward regex")
});
static FORWARD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:next|forward|forwards|ahead|tomorrow|following|later)\b")
        .expect("valid forward regex")
});
static TODAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:today|now)\b").expect("valid today regex"));
static CALENDAR_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:{}|{})\b",
        weekday_alternation(),
        month_alternation()
    ))
    .expect("valid calendar name regex")
});
static VIEW_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = VIEW_TOKENS
        .iter()
        .map(|(token, _)| *token)
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?P<view>{alternation})\b")).expect("valid view name regex")
});

/// Why an utterance could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The calendar has no events to edit or delete.
    NoEvents { intent: Intent },
    /// No event matched by title, date, or the today fallback.
    EventNotFound { intent: Intent, query: String },
    /// An edit named an event but no new title, date or time.
    NothingToChange { title: String },
    /// The resulting event would break an event invariant.
    InvalidEvent(EventValidationError),
    /// The default duration does not fit on the calendar.
    DurationOutOfRange { minutes: i64 },
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoEvents { intent } => {
                write!(f, "no events available for {} request", intent.as_str())
            }
            Self::EventNotFound { intent, query } => write!(
                f,
                "no event matches {} request `{query}`",
                intent.as_str()
            ),
            Self::NothingToChange { title } => write!(f, "edit for `{title}` changes nothing"),
            Self::InvalidEvent(err) => write!(f, "{err}"),
            Self::DurationOutOfRange { minutes } => {
                write!(f, "duration of {minutes} minutes is out of range")
            }
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEvent(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EventValidationError> for BuildError {
    fn from(value: EventValidationError) -> Self {
        Self::InvalidEvent(value)
    }
}

/// Inputs shared by every builder for one utterance.
pub struct BuildContext<'a> {
    pub transcript: &'a Transcript,
    pub events: &'a [Event],
    pub now: NaiveDateTime,
    pub config: &'a InterpreterConfig,
    lowered: String,
}

impl<'a> BuildContext<'a> {
    pub fn new(
        transcript: &'a Transcript,
        events: &'a [Event],
        now: NaiveDateTime,
        config: &'a InterpreterConfig,
    ) -> Self {
        Self {
            transcript,
            events,
            now,
            config,
            lowered: normalize_utterance(&transcript.text),
        }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.now.date()
    }

    fn time_entities(&self) -> Vec<&str> {
        self.transcript.values_of(EntityKind::Time).collect()
    }
}

/// Dispatches to the builder for `intent`.
pub fn build_command(intent: Intent, ctx: &BuildContext<'_>) -> Result<Command, BuildError> {
    let command = match intent {
        Intent::Create => build_create(ctx)?,
        Intent::Edit => build_edit(ctx)?,
        Intent::Delete => build_delete(ctx)?,
        Intent::Navigate => build_navigate(ctx),
        Intent::SwitchView => build_switch_view(ctx),
        Intent::Unrecognized => Command::Unrecognized,
    };
    debug!(
        "event=command_built module=nlp intent={} command={}",
        intent.as_str(),
        command.kind()
    );
    Ok(command)
}

/// Builds a `CreateEvent` command.
pub fn build_create(ctx: &BuildContext<'_>) -> Result<Command, BuildError> {
    let date = resolve_transcript_date(ctx.transcript, ctx.reference_date())
        .unwrap_or_else(|| ctx.reference_date());
    let time_entities = ctx.time_entities();
    let all_day = detect_all_day(&ctx.lowered, !time_entities.is_empty(), ctx.config);
    let title = extract_title(&ctx.lowered);

    let (start, end) = if all_day {
        all_day_bounds(date)
    } else {
        let range = resolve_range(&time_entities, &ctx.lowered);
        let start_time = range
            .map(|range| range.start)
            .or_else(|| resolve_start_time(&time_entities, &ctx.lowered))
            .unwrap_or_else(|| TimeOfDay::from(ctx.config.default_start_time));
        let start = date.and_time(start_time.to_naive_time());
        let end = match range {
            Some(range) => date.and_time(range.end.to_naive_time()),
            None => add_minutes(start, ctx.config.default_duration_minutes)?,
        };
        (start, end)
    };

    let mut event = Event::new(title, start, end)?;
    event.calendar = ctx.config.default_calendar.clone();
    event.color = ctx.config.default_color.clone();
    Ok(Command::CreateEvent { event })
}

/// Builds an `EditEvent` command for the best-matching event.
pub fn build_edit(ctx: &BuildContext<'_>) -> Result<Command, BuildError> {
    let rename = RENAME_RE.captures(&ctx.lowered).map(|caps| {
        (
            caps.name("old").map_or("", |m| m.as_str()).to_string(),
            capitalize_words(caps.name("new").map_or("", |m| m.as_str())),
        )
    });

    let (query, target_text, change_segment) = match &rename {
        Some((old, _)) => (search_phrase(old), old.as_str(), None),
        None => split_change_request(&ctx.lowered),
    };
    let date_hint = resolve_date(target_text, ctx.reference_date());
    let target = locate_event(ctx, Intent::Edit, &query, date_hint)?;

    let mut patch = EventPatch::default();
    if let Some((_, new_title)) = rename {
        if !new_title.is_empty() && new_title != target.title {
            patch.title = Some(new_title);
        }
    }

    if let Some(segment) = change_segment {
        // Entities describing the old slot must not leak into the new one.
        let in_segment = |value: &&str| segment.contains(value.trim().to_lowercase().as_str());
        let new_date = ctx
            .transcript
            .values_of(EntityKind::Date)
            .filter(in_segment)
            .find_map(|value| resolve_date(value, ctx.reference_date()))
            .or_else(|| resolve_date(segment, ctx.reference_date()));
        let time_entities: Vec<&str> = ctx.time_entities().into_iter().filter(in_segment).collect();
        let new_range = resolve_range(&time_entities, segment);
        let new_time = new_range
            .map(|range| range.start)
            .or_else(|| resolve_start_time(&time_entities, segment))
            .or_else(|| parse_bare_time(&normalize_spoken_numbers(segment)));

        if new_date.is_some() || new_time.is_some() {
            let date = new_date.unwrap_or_else(|| target.start.date());
            let time = new_time
                .map(TimeOfDay::to_naive_time)
                .unwrap_or_else(|| target.start.time());
            let start = date.and_time(time);
            let end = match new_range {
                Some(range) => date.and_time(range.end.to_naive_time()),
                None => start + target.duration(),
            };
            patch.start = Some(start);
            patch.end = Some(end);
        }
    }

    if patch.is_empty() {
        return Err(BuildError::NothingToChange {
            title: target.title.clone(),
        });
    }
    patch.apply_to(target)?;

    Ok(Command::EditEvent {
        event_id: target.id.clone(),
        patch,
    })
}

/// Builds a `DeleteEvent` command for the best-matching event.
pub fn build_delete(ctx: &BuildContext<'_>) -> Result<Command, BuildError> {
    let query = search_phrase(&ctx.lowered);
    let date_hint = resolve_transcript_date(ctx.transcript, ctx.reference_date());
    let target = locate_event(ctx, Intent::Delete, &query, date_hint)?;
    Ok(Command::DeleteEvent {
        event_id: target.id.clone(),
        title: target.title.clone(),
    })
}

/// Maps direction words onto a navigation command.
///
/// Without a direction word, a view name ("go to week view") switches the
/// view and a bare weekday or month ("go to monday") moves forward.
pub fn build_navigate(ctx: &BuildContext<'_>) -> Command {
    if BACKWARD_RE.is_match(&ctx.lowered) {
        Command::Navigate {
            direction: Direction::Backward,
        }
    } else if FORWARD_RE.is_match(&ctx.lowered) {
        Command::Navigate {
            direction: Direction::Forward,
        }
    } else if TODAY_RE.is_match(&ctx.lowered) {
        Command::GoToToday
    } else if let Command::SwitchView { view } = build_switch_view(ctx) {
        Command::SwitchView { view }
    } else if CALENDAR_NAME_RE.is_match(&ctx.lowered) {
        Command::Navigate {
            direction: Direction::Forward,
        }
    } else {
        Command::Unrecognized
    }
}

/// Maps the first view name in the utterance onto a view switch.
pub fn build_switch_view(ctx: &BuildContext<'_>) -> Command {
    let view = VIEW_NAME_RE
        .captures(&ctx.lowered)
        .and_then(|caps| caps.name("view"))
        .and_then(|token| view_for_token(token.as_str()));
    match view {
        Some(view) => Command::SwitchView { view },
        None => Command::Unrecognized,
    }
}

fn view_for_token(token: &str) -> Option<CalendarView> {
    VIEW_TOKENS
        .iter()
        .find(|(candidate, _)| *candidate == token)
        .map(|(_, view)| *view)
}

/// Locates the event an edit/delete utterance refers to.
///
/// Tiers, first hit wins:
/// 1. title match across all events (phrase, then PERSON/ORG entities,
///    then a unique best partial word match);
/// 2. the same matching restricted to `date_hint`, or that date's first
///    event when nothing names a title;
/// 3. the first event on the reference date, when enabled in config.
pub fn locate_event<'e>(
    ctx: &BuildContext<'e>,
    intent: Intent,
    query: &str,
    date_hint: Option<NaiveDate>,
) -> Result<&'e Event, BuildError> {
    if ctx.events.is_empty() {
        return Err(BuildError::NoEvents { intent });
    }

    let names: Vec<String> = ctx
        .transcript
        .entities
        .iter()
        .filter(|entity| matches!(entity.kind, EntityKind::Person | EntityKind::Organization))
        .map(|entity| entity.value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .collect();

    let mut all: Vec<&'e Event> = ctx.events.iter().collect();
    all.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

    if let Some(found) = match_by_title(&all, query, &names) {
        debug!("event=target_located module=nlp tier=title");
        return Ok(found);
    }

    if let Some(date) = date_hint {
        let on_date = events_on(ctx.events, date);
        if let Some(found) = match_by_title(&on_date, query, &names) {
            debug!("event=target_located module=nlp tier=date_title");
            return Ok(found);
        }
        if query.is_empty() && names.is_empty() {
            if let Some(first) = on_date.first() {
                debug!("event=target_located module=nlp tier=date_first");
                return Ok(*first);
            }
        }
    }

    if ctx.config.fallback_to_first_event_today {
        if let Some(first) = events_on(ctx.events, ctx.reference_date()).first() {
            debug!("event=target_located module=nlp tier=today_first");
            return Ok(*first);
        }
    }

    debug!(
        "event=target_missing module=nlp intent={} candidates={}",
        intent.as_str(),
        ctx.events.len()
    );
    Err(BuildError::EventNotFound {
        intent,
        query: query.to_string(),
    })
}

fn match_by_title<'e>(candidates: &[&'e Event], query: &str, names: &[String]) -> Option<&'e Event> {
    if candidates.is_empty() {
        return None;
    }

    if !query.is_empty() {
        if let Some(found) = candidates
            .iter()
            .find(|event| event.title.to_lowercase().contains(query))
        {
            return Some(*found);
        }
    }

    for name in names {
        if let Some(found) = candidates
            .iter()
            .find(|event| event.title.to_lowercase().contains(name.as_str()))
        {
            return Some(*found);
        }
    }

    let words = search_words(query);
    if words.is_empty() {
        return None;
    }
    let scored: Vec<(usize, &'e Event)> = candidates
        .iter()
        .map(|event| {
            let title = event.title.to_lowercase();
            let hits = words.iter().filter(|word| title.contains(**word)).count();
            (hits, *event)
        })
        .collect();
    let best = scored.iter().map(|(hits, _)| *hits).max().unwrap_or(0);
    if best == 0 {
        return None;
    }
    let mut leaders = scored.iter().filter(|(hits, _)| *hits == best);
    match (leaders.next(), leaders.next()) {
        (Some((_, event)), None) => Some(*event),
        _ => None,
    }
}

/// Splits "move X to Y" into the target query, the text naming the
/// target, and the change segment.
///
/// Without a `to`/`until`/`for` marker the whole utterance serves as all three.
fn split_change_request(lowered: &str) -> (String, &str, Option<&str>) {
    match CHANGE_TARGET_RE.find_iter(lowered).last() {
        Some(marker) => {
            let target = &lowered[..marker.start()];
            (search_phrase(target), target, Some(&lowered[marker.end()..]))
        }
        None => (search_phrase(lowered), lowered, Some(lowered)),
    }
}

fn add_minutes(start: NaiveDateTime, minutes: i64) -> Result<NaiveDateTime, BuildError> {
    Duration::try_minutes(minutes)
        .and_then(|duration| start.checked_add_signed(duration))
        .ok_or(BuildError::DurationOutOfRange { minutes })
}

fn resolve_range(time_entities: &[&str], text: &str) -> Option<TimeRange> {
    if time_entities.len() >= 2 {
        if let Some(range) = resolve_time_range(&time_entities.join(" to ")) {
            return Some(range);
        }
    }
    time_entities
        .iter()
        .find_map(|value| resolve_time_range(value))
        .or_else(|| resolve_time_range(text))
}

fn resolve_start_time(time_entities: &[&str], text: &str) -> Option<TimeOfDay> {
    time_entities
        .iter()
        .find_map(|value| resolve_time(value).or_else(|| parse_bare_time(value)))
        .or_else(|| resolve_time(text))
}
