//! Date resolution for entity values and free transcript text.
//!
//! # Resolution order (first match wins)
//! 1. Relative keywords (`today`, `tomorrow`, `next week`, ...).
//! 2. Month name with optional day and year.
//! 3. Weekday name, always strictly after the reference date.
//! 4. Numeric `M/D[/YY|YYYY]`, then ISO `YYYY-MM-DD`.
//! 5. Whole-string parse with a few fixed formats.
//!
//! Out-of-range values reject the candidate and fall through to the next
//! pattern instead of failing the whole resolution.

use crate::model::entity::{EntityKind, Transcript};
use crate::nlp::lexicon::{month_alternation, month_number, weekday_alternation, weekday_number};
use chrono::{Datelike, Duration, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static RELATIVE_PATTERNS: Lazy<Vec<(Regex, RelativeOffset)>> = Lazy::new(|| {
    [
        (r"\b(?:the\s+)?day\s+after\s+tomorrow\b", RelativeOffset::Days(2)),
        (r"\b(?:today|tonight)\b", RelativeOffset::Days(0)),
        (r"\btomorrow\b", RelativeOffset::Days(1)),
        (r"\byesterday\b", RelativeOffset::Days(-1)),
        (r"\bnext\s+week\b", RelativeOffset::Days(7)),
        (r"\blast\s+week\b", RelativeOffset::Days(-7)),
        (r"\bnext\s+month\b", RelativeOffset::Months(1)),
        (r"\blast\s+month\b", RelativeOffset::Months(-1)),
    ]
    .into_iter()
    .map(|(pattern, offset)| (Regex::new(pattern).expect("valid relative date regex"), offset))
    .collect()
});

static MONTH_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:(?P<pre>\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?)?(?P<month>{})\b\.?(?:\s+(?P<day>\d{{1,2}})(?:st|nd|rd|th)?\b)?(?:,?\s+(?P<year>\d{{4}})\b)?",
        month_alternation()
    ))
    .expect("valid month date regex")
});

static WEEKDAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b(?P<weekday>{})\b", weekday_alternation()))
        .expect("valid weekday regex")
});

static SLASH_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?P<month>\d{1,2})/(?P<day>\d{1,2})(?:/(?P<year>\d{4}|\d{2}))?\b")
        .expect("valid slash date regex")
});

static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?P<year>\d{4})-(?P<month>\d{1,2})-(?P<day>\d{1,2})\b")
        .expect("valid iso date regex")
});

const RAW_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d %Y", "%b %d %Y", "%d %B %Y"];

#[derive(Debug, Clone, Copy)]
enum RelativeOffset {
    Days(i64),
    Months(i32),
}

/// Resolves the first date expression in `text` against `reference`.
///
/// `text` may be a DATE entity value or a whole transcript; matching is
/// case-insensitive.
pub fn resolve_date(text: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    resolve_relative(&lowered, reference)
        .or_else(|| resolve_month_date(&lowered, reference))
        .or_else(|| resolve_weekday(&lowered, reference))
        .or_else(|| resolve_numeric_date(&lowered, reference))
        .or_else(|| parse_raw_date(text.trim()))
}

/// Resolves a date from DATE entities first, then from the transcript text.
pub fn resolve_transcript_date(transcript: &Transcript, reference: NaiveDate) -> Option<NaiveDate> {
    transcript
        .values_of(EntityKind::Date)
        .find_map(|value| resolve_date(value, reference))
        .or_else(|| resolve_date(&transcript.text, reference))
}

/// Shifts `date` by whole months, clamping the day to the target month end.
pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let magnitude = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

fn resolve_relative(lowered: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let (_, offset) = RELATIVE_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(lowered))?;
    match offset {
        RelativeOffset::Days(days) => reference.checked_add_signed(Duration::days(*days)),
        RelativeOffset::Months(months) => add_months(reference, *months),
    }
}

fn resolve_month_date(lowered: &str, reference: NaiveDate) -> Option<NaiveDate> {
    MONTH_DATE_RE.captures_iter(lowered).find_map(|caps| {
        let month_name = caps.name("month")?.as_str();
        let month = month_number(month_name)?;
        let day = caps
            .name("day")
            .or_else(|| caps.name("pre"))
            .and_then(|value| value.as_str().parse::<u32>().ok());

        // "may" is only a month when a day number comes with it.
        if month_name == "may" && day.is_none() {
            return None;
        }

        let year = match caps.name("year") {
            Some(value) => value.as_str().parse::<i32>().ok()?,
            None => reference.year(),
        };

        match day {
            Some(day) if (1..=31).contains(&day) => NaiveDate::from_ymd_opt(year, month, day),
            Some(_) => None,
            None => clamped_date(year, month, reference.day()),
        }
    })
}

fn resolve_weekday(lowered: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let caps = WEEKDAY_RE.captures(lowered)?;
    let target = weekday_number(caps.name("weekday")?.as_str())?;
    let current = reference.weekday().num_days_from_monday();
    let mut days_ahead = (target + 7 - current) % 7;
    if days_ahead == 0 {
        days_ahead = 7;
    }
    reference.checked_add_signed(Duration::days(i64::from(days_ahead)))
}

fn resolve_numeric_date(lowered: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let slash = SLASH_DATE_RE.captures_iter(lowered).find_map(|caps| {
        let month = caps.name("month")?.as_str().parse::<u32>().ok()?;
        let day = caps.name("day")?.as_str().parse::<u32>().ok()?;
        let year = match caps.name("year") {
            Some(value) if value.as_str().len() == 2 => {
                2000 + value.as_str().parse::<i32>().ok()?
            }
            Some(value) => value.as_str().parse::<i32>().ok()?,
            None => reference.year(),
        };
        NaiveDate::from_ymd_opt(year, month, day)
    });
    if slash.is_some() {
        return slash;
    }

    ISO_DATE_RE.captures_iter(lowered).find_map(|caps| {
        let year = caps.name("year")?.as_str().parse::<i32>().ok()?;
        let month = caps.name("month")?.as_str().parse::<u32>().ok()?;
        let day = caps.name("day")?.as_str().parse::<u32>().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

fn parse_raw_date(text: &str) -> Option<NaiveDate> {
    let cleaned = text.replace(',', "");
    RAW_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(cleaned.as_str(), format).ok())
}

fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last_day = add_months(first, 1)?.pred_opt()?.day();
    NaiveDate::from_ymd_opt(year, month, day.min(last_day))
}
