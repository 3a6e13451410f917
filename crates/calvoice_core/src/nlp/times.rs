//! Time-of-day and time-range resolution.
//!
//! # Supported forms
//! - `H:MMam/pm`, `H am/pm`, `H o'clock`, `noon`, `midnight`
//! - bare `H:MM` as 24-hour time, bare `H` only after `at`/`@`
//! - ranges: `from X to Y`, `X-Y`, `X until Y`, `between X and Y`
//! - spelled-out hours (`two thirty pm`) for all of the above
//!
//! # Invariants
//! - Hours are `0..=23` and minutes `0..=59` after conversion; anything else
//!   rejects that candidate.
//! - A resolved range always has `end > start`; overnight ranges are not
//!   representable.

use chrono::{NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fmt::{Display, Formatter};

const MERIDIEM: &str = r"[ap]\.?\s?m\b\.?";

static CLOCK_WITH_MERIDIEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?P<h>\d{{1,2}}):(?P<m>\d{{2}})\s*(?P<mer>{MERIDIEM})"
    ))
    .expect("valid clock meridiem regex")
});
static HOUR_WITH_MERIDIEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b(?P<h>\d{{1,2}})\s*(?P<mer>{MERIDIEM})"))
        .expect("valid hour meridiem regex")
});
static OCLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?P<h>\d{1,2})\s*o'?\s?clock\b").expect("valid o'clock regex")
});
static NOON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?P<word>noon|midday|midnight)\b").expect("valid noon regex"));
static CLOCK_24H_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?P<h>\d{1,2}):(?P<m>\d{2})\b").expect("valid 24h clock regex")
});
static AT_HOUR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\bat|@)\s*(?P<h>\d{1,2})\b(?P<tail>[:/-]?)").expect("valid at-hour regex")
});
static BARE_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<h>\d{1,2})(?::(?P<m>\d{2}))?\s*$").expect("valid bare time regex")
});
static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?:\b(?P<lead>from|between)\s+)?\b(?P<h1>\d{{1,2}})(?::(?P<m1>\d{{2}}))?\s*(?P<mer1>{MERIDIEM})?\s*(?P<sep>to|until|till|through|and|-|–)\s*(?P<h2>\d{{1,2}})(?::(?P<m2>\d{{2}}))?\s*(?P<mer2>{MERIDIEM})?"
    ))
    .expect("valid time range regex")
});
/// Spelled-out clock hours and the minute words that may follow them.
pub(crate) const SPOKEN_HOURS: &str =
    "one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve";
pub(crate) const SPOKEN_MINUTES: &str = r"fifteen|twenty|thirty|forty[\s-]five|forty|fifty";

static SPOKEN_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?P<h>{SPOKEN_HOURS})(?:\s+(?P<m>{SPOKEN_MINUTES}))?\b"
    ))
    .expect("valid spoken number regex")
});
static COUNT_UNIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:minutes?|mins?|hours?|hrs?|days?|weeks?|months?|years?|people|persons?|times?)\b")
        .expect("valid count unit regex")
});

/// Wall-clock time of day in 24-hour form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    pub hours: u32,
    pub minutes: u32,
}

impl TimeOfDay {
    /// Returns `None` for hours outside `0..=23` or minutes outside `0..=59`.
    pub fn new(hours: u32, minutes: u32) -> Option<Self> {
        (hours <= 23 && minutes <= 59).then_some(Self { hours, minutes })
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hours, self.minutes, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(value: NaiveTime) -> Self {
        Self {
            hours: value.hour(),
            minutes: value.minute(),
        }
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_clock(*self))
    }
}

/// Resolved start/end pair, `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn parse(raw: &str) -> Option<Self> {
        match raw.chars().next()? {
            'a' => Some(Self::Am),
            'p' => Some(Self::Pm),
            _ => None,
        }
    }

    fn flipped(self) -> Self {
        match self {
            Self::Am => Self::Pm,
            Self::Pm => Self::Am,
        }
    }
}

/// Resolves the first valid time of day in `text`.
pub fn resolve_time(text: &str) -> Option<TimeOfDay> {
    let normalized = normalize_spoken_numbers(&text.to_lowercase()).into_owned();

    first_valid(&CLOCK_WITH_MERIDIEM_RE, &normalized, |caps| {
        with_meridiem(number(caps, "h")?, number(caps, "m")?, meridiem(caps, "mer")?)
    })
    .or_else(|| {
        first_valid(&HOUR_WITH_MERIDIEM_RE, &normalized, |caps| {
            with_meridiem(number(caps, "h")?, 0, meridiem(caps, "mer")?)
        })
    })
    .or_else(|| first_valid(&OCLOCK_RE, &normalized, |caps| bare_hour(number(caps, "h")?)))
    .or_else(|| {
        first_valid(&NOON_RE, &normalized, |caps| match caps.name("word")?.as_str() {
            "midnight" => TimeOfDay::new(0, 0),
            _ => TimeOfDay::new(12, 0),
        })
    })
    .or_else(|| {
        first_valid(&CLOCK_24H_RE, &normalized, |caps| {
            TimeOfDay::new(number(caps, "h")?, number(caps, "m")?)
        })
    })
    .or_else(|| {
        first_valid(&AT_HOUR_RE, &normalized, |caps| {
            // "at 3/4" and "at 3-4" belong to the date and range parsers.
            if !caps.name("tail").map_or("", |m| m.as_str()).is_empty() {
                return None;
            }
            bare_hour(number(caps, "h")?)
        })
    })
}

/// Parses a segment that is nothing but `H` or `H:MM`.
pub fn parse_bare_time(text: &str) -> Option<TimeOfDay> {
    let caps = BARE_TIME_RE.captures(text)?;
    let hours = number(&caps, "h")?;
    match caps.name("m") {
        Some(minutes) => TimeOfDay::new(hours, minutes.as_str().parse().ok()?),
        None => bare_hour(hours),
    }
}

/// Resolves the first valid time range in `text`.
///
/// Period inference:
/// - a start without am/pm inherits the end's period;
/// - an end without am/pm inherits the start's period;
/// - with no markers at all and both hours `<= 12`, both are taken as pm;
/// - when an inherited period would put the start after the end, the start
///   flips to the other period ("11 to 1pm" is 11am-1pm).
pub fn resolve_time_range(text: &str) -> Option<TimeRange> {
    let normalized = normalize_spoken_numbers(&text.to_lowercase()).into_owned();

    RANGE_RE.captures_iter(&normalized).find_map(|caps| {
        let whole = caps.get(0)?;
        if !range_is_isolated(&normalized, whole.start(), whole.end()) {
            return None;
        }
        let separator = caps.name("sep")?.as_str();
        let lead = caps.name("lead").map(|m| m.as_str());
        if separator == "and" && lead != Some("between") {
            return None;
        }

        let h1 = number(&caps, "h1")?;
        let m1 = optional_number(&caps, "m1")?;
        let h2 = number(&caps, "h2")?;
        let m2 = optional_number(&caps, "m2")?;
        let range = infer_range(
            (h1, m1, meridiem(&caps, "mer1")),
            (h2, m2, meridiem(&caps, "mer2")),
        )?;
        (range.end > range.start).then_some(range)
    })
}

/// Returns whether `text` carries any explicit time or time range.
pub fn has_explicit_time(text: &str) -> bool {
    resolve_time(text).is_some() || resolve_time_range(text).is_some()
}

/// Formats an hour label the way the day grid does (`12 AM`, `1 PM`).
pub fn format_hour(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{hour} AM"),
        12 => "12 PM".to_string(),
        _ => format!("{} PM", hour - 12),
    }
}

/// Formats a time for confirmation messages (`2:00 PM`).
pub fn format_clock(time: TimeOfDay) -> String {
    let (hour, period) = match time.hours {
        0 => (12, "AM"),
        1..=11 => (time.hours, "AM"),
        12 => (12, "PM"),
        other => (other - 12, "PM"),
    };
    format!("{hour}:{:02} {period}", time.minutes)
}

/// Rewrites spelled-out clock numbers into digits (`two thirty` -> `2:30`).
pub fn normalize_spoken_numbers(text: &str) -> Cow<'_, str> {
    SPOKEN_NUMBER_RE.replace_all(text, |caps: &Captures<'_>| {
        let hour = spoken_value(caps.name("h").map_or("", |m| m.as_str()));
        match caps.name("m") {
            Some(minutes) => format!("{hour}:{:02}", spoken_value(minutes.as_str())),
            None => hour.to_string(),
        }
    })
}

fn spoken_value(word: &str) -> u32 {
    match word.replace('-', " ").as_str() {
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "fifteen" => 15,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "forty five" => 45,
        "fifty" => 50,
        _ => 0,
    }
}

type ClockPart = (u32, u32, Option<Meridiem>);

fn infer_range(start: ClockPart, end: ClockPart) -> Option<TimeRange> {
    let (h1, m1, mer1) = start;
    let (h2, m2, mer2) = end;

    let (start, end) = match (mer1, mer2) {
        (Some(p1), Some(p2)) => (with_meridiem(h1, m1, p1)?, with_meridiem(h2, m2, p2)?),
        (None, Some(p2)) => {
            let end = with_meridiem(h2, m2, p2)?;
            let start = match with_meridiem(h1, m1, p2) {
                Some(start) if start < end => start,
                _ => with_meridiem(h1, m1, p2.flipped())?,
            };
            (start, end)
        }
        (Some(p1), None) => {
            let start = with_meridiem(h1, m1, p1)?;
            let end = match with_meridiem(h2, m2, p1) {
                Some(end) if end > start => end,
                _ => with_meridiem(h2, m2, p1.flipped())?,
            };
            (start, end)
        }
        (None, None) if (1..=12).contains(&h1) && (1..=12).contains(&h2) => {
            let end = with_meridiem(h2, m2, Meridiem::Pm)?;
            let start = match with_meridiem(h1, m1, Meridiem::Pm) {
                Some(start) if start < end => start,
                _ => with_meridiem(h1, m1, Meridiem::Am)?,
            };
            (start, end)
        }
        (None, None) => (TimeOfDay::new(h1, m1)?, TimeOfDay::new(h2, m2)?),
    };

    Some(TimeRange { start, end })
}

/// Rejects matches glued to dates (`2026-10-20`, `10/3-4`) or counts
/// (`5 to 10 minutes`).
fn range_is_isolated(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].trim_end().chars().next_back();
    if matches!(before, Some('-' | '/' | ':')) || text[..start].ends_with(|c: char| c.is_ascii_digit())
    {
        return false;
    }
    let after = &text[end..];
    if after.starts_with(['-', '/', ':']) || after.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    !COUNT_UNIT_RE.is_match(after)
}

fn with_meridiem(hours: u32, minutes: u32, meridiem: Meridiem) -> Option<TimeOfDay> {
    if !(1..=12).contains(&hours) {
        return None;
    }
    let hours = match (meridiem, hours) {
        (Meridiem::Am, 12) => 0,
        (Meridiem::Am, hours) => hours,
        (Meridiem::Pm, 12) => 12,
        (Meridiem::Pm, hours) => hours + 12,
    };
    TimeOfDay::new(hours, minutes)
}

/// Bare hour: values `>= 12` read as pm (24-hour), smaller values as am.
fn bare_hour(hours: u32) -> Option<TimeOfDay> {
    match hours {
        12 => with_meridiem(12, 0, Meridiem::Pm),
        13..=23 => TimeOfDay::new(hours, 0),
        0 => TimeOfDay::new(0, 0),
        _ => with_meridiem(hours, 0, Meridiem::Am),
    }
}

fn first_valid<F>(regex: &Regex, text: &str, mut convert: F) -> Option<TimeOfDay>
where
    F: FnMut(&Captures<'_>) -> Option<TimeOfDay>,
{
    regex.captures_iter(text).find_map(|caps| convert(&caps))
}

fn number(caps: &Captures<'_>, name: &str) -> Option<u32> {
    caps.name(name)?.as_str().parse().ok()
}

/// Missing group reads as `0`; a present but unparsable group is `None`.
fn optional_number(caps: &Captures<'_>, name: &str) -> Option<u32> {
    match caps.name(name) {
        Some(value) => value.as_str().parse().ok(),
        None => Some(0),
    }
}

fn meridiem(caps: &Captures<'_>, name: &str) -> Option<Meridiem> {
    Meridiem::parse(caps.name(name)?.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spoken_numbers_become_digits() {
        assert_eq!(
            normalize_spoken_numbers("twelve to two thirty pm"),
            "12 to 2:30 pm"
        );
        assert_eq!(normalize_spoken_numbers("someone"), "someone");
    }

    #[test]
    fn format_hour_matches_grid_labels() {
        assert_eq!(format_hour(0), "12 AM");
        assert_eq!(format_hour(9), "9 AM");
        assert_eq!(format_hour(12), "12 PM");
        assert_eq!(format_hour(15), "3 PM");
    }

    #[test]
    fn range_next_to_iso_date_is_ignored() {
        assert_eq!(resolve_time_range("on 2026-10-20"), None);
    }

    #[test]
    fn count_ranges_are_ignored() {
        assert_eq!(resolve_time_range("takes 5 to 10 minutes"), None);
    }
}
