//! Keyword and vocabulary tables shared by the parsers.
//!
//! Entity-based and text-only parsing read the same tables, so a new
//! keyword only has to be added here.

use crate::model::command::{CalendarView, Intent};
use regex::Regex;

/// Month names and abbreviations, longest alternative first per month.
pub const MONTHS: &[(&str, u32)] = &[
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sept", 9),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

/// Weekday names, numbered from Monday = 0.
pub const WEEKDAYS: &[(&str, u32)] = &[
    ("monday", 0),
    ("tuesday", 1),
    ("wednesday", 2),
    ("thursday", 3),
    ("friday", 4),
    ("saturday", 5),
    ("sunday", 6),
];

pub const CREATE_KEYWORDS: &[&str] = &[
    "create", "add", "schedule", "make", "set up", "book", "plan", "put", "insert", "new",
];
pub const EDIT_KEYWORDS: &[&str] = &[
    "edit",
    "update",
    "modify",
    "change",
    "alter",
    "reschedule",
    "move",
    "rename",
];
pub const DELETE_KEYWORDS: &[&str] = &[
    "delete",
    "remove",
    "cancel",
    "erase",
    "clear",
    "drop",
    "get rid of",
];
pub const NAVIGATE_KEYWORDS: &[&str] = &[
    "go to", "navigate", "show", "next", "previous", "last", "jump", "back", "forward",
];
pub const VIEW_KEYWORDS: &[&str] = &["switch to", "change to", "view", "display"];

/// Navigation words that double as date modifiers ("next week").
pub const DATE_MODIFIER_WORDS: &[&str] = &["next", "last", "previous"];

/// Words that make a preceding date modifier a date expression.
pub const DATE_UNIT_WORDS: &[&str] = &[
    "week", "weekend", "month", "year", "day", "monday", "tuesday", "wednesday", "thursday",
    "friday", "saturday", "sunday",
];

/// Tokens that, right after "go to", make it a navigation request.
pub const NAVIGATION_TARGETS: &[&str] = &[
    "next", "previous", "last", "today", "tomorrow", "yesterday", "week", "month", "day",
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "january",
    "february", "march", "april", "may", "june", "july", "august", "september", "october",
    "november", "december",
];

/// `(keyword, following word)` pairs that cancel a keyword hit.
pub const KEYWORD_EXCLUSIONS: &[(&str, &str)] = &[("drop", "off"), ("show", "up")];

pub const VIEW_TOKENS: &[(&str, CalendarView)] = &[
    ("monthly", CalendarView::Month),
    ("month", CalendarView::Month),
    ("weekly", CalendarView::Week),
    ("week", CalendarView::Week),
    ("daily", CalendarView::Day),
    ("day", CalendarView::Day),
];

/// Words ignored when matching an utterance against event titles.
pub const MATCH_STOPWORDS: &[&str] = &[
    "a", "an", "the", "my", "our", "your", "this", "that", "it", "event", "please", "to", "for",
    "from", "on", "at", "with", "and", "of", "in", "me", "i", "is",
];

/// Keyword table for one scored intent.
pub fn keywords_for(intent: Intent) -> &'static [&'static str] {
    match intent {
        Intent::Create => CREATE_KEYWORDS,
        Intent::Edit => EDIT_KEYWORDS,
        Intent::Delete => DELETE_KEYWORDS,
        Intent::Navigate => NAVIGATE_KEYWORDS,
        Intent::SwitchView => VIEW_KEYWORDS,
        Intent::Unrecognized => &[],
    }
}

/// Builds a case-sensitive whole-word regex for a lowercase phrase.
///
/// Inner spaces match any whitespace run.
pub fn phrase_regex(phrase: &str) -> Regex {
    let body = phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    Regex::new(&format!(r"\b{body}\b")).expect("valid keyword regex")
}

/// Regex alternation of all month names, for embedding in larger patterns.
pub fn month_alternation() -> String {
    MONTHS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join("|")
}

pub fn month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, number)| *number)
}

pub fn weekday_alternation() -> String {
    WEEKDAYS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join("|")
}

pub fn weekday_number(name: &str) -> Option<u32> {
    WEEKDAYS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, number)| *number)
}

/// Lowercases and folds typographic apostrophes so one regex set fits all.
pub fn normalize_utterance(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .replace(['\u{2019}', '\u{2018}'], "'")
}

/// Returns the first word following byte offset `end`, if any.
pub fn next_word(text: &str, end: usize) -> Option<&str> {
    text.get(end..)?
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .find(|word| !word.is_empty())
}
