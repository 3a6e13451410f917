//! Event title extraction and search-phrase cleanup.
//!
//! # Title strategy (first non-empty result wins)
//! 1. Verb-phrase patterns ("meet with X", "pick up X", "X's party") after
//!    dropping filler preambles ("i need to", "please").
//! 2. The utterance with its leading action verb and every date/time token
//!    removed.
//! 3. Everything before the first date/time marker.
//! 4. `"New Event"`.
//!
//! Titles are title-cased per word.

use crate::nlp::lexicon::{
    month_alternation, weekday_alternation, CREATE_KEYWORDS, DELETE_KEYWORDS, EDIT_KEYWORDS,
    MATCH_STOPWORDS,
};
use crate::nlp::times::{SPOKEN_HOURS, SPOKEN_MINUTES};
use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_TITLE: &str = "New Event";

const MERIDIEM: &str = r"(?:[ap]\.?\s?m\b\.?)";

/// A clock reading written as digits ("2:30") or words ("two thirty").
fn clock_pattern() -> String {
    format!(r"(?:\d{{1,2}}(?::\d{{2}})?|(?:{SPOKEN_HOURS})(?:\s+(?:{SPOKEN_MINUTES}))?\b)")
}

static PREAMBLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:hey|hi|ok|okay|so|um|uh|alright)[,\s]+)*(?:(?:please|can you|could you|would you|will you)\s+)*(?:(?:i need to|i have to|i've got to|i got to|i gotta|i want to|i wanna|i would like to|i'd like to|remind me to|don't forget to|let's|lets|we need to|we have to)\s+)?(?:please\s+)?",
    )
    .expect("valid preamble regex")
});

static CALENDAR_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+(?:on|to|in|into)\s+(?:my|the)\s+calendar\b").expect("valid calendar suffix regex")
});

static ACTION_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:create|add|schedule|make|set up|book|plan|put|insert|new)\s+(?:(?:a|an|the|my|new)\s+)*(?:(?:event|reminder|entry)\s+(?:called|named|titled|for)\s+)?",
    )
    .expect("valid action prefix regex")
});

static VERB_PATTERNS: Lazy<Vec<(Regex, VerbTemplate)>> = Lazy::new(|| {
    [
        (
            r"\b(?P<verb>meet(?:ing)?|lunch|dinner|breakfast|brunch|coffee|drinks|call|chat|date)\s+(?:up\s+)?with\s+(?P<obj>.+)",
            VerbTemplate::VerbWith,
        ),
        (
            r"\b(?P<verb>go(?:ing)?\s+to|pick\s+up|drop\s+off|call|email|visit|see|watch|attend|finish|submit|buy|clean|fix|study\s+for|work\s+on|prepare\s+for|pay)\s+(?P<obj>.+)",
            VerbTemplate::VerbObject,
        ),
        (
            r"\b(?:called|named|titled)\s+(?P<obj>.+)",
            VerbTemplate::ObjectOnly,
        ),
        (
            r"\b(?:my\s+|our\s+)?(?P<obj>[a-z]+'s\s+.+)",
            VerbTemplate::ObjectOnly,
        ),
    ]
    .into_iter()
    .map(|(pattern, template)| (Regex::new(pattern).expect("valid title regex"), template))
    .collect()
});

static TEMPORAL_CUT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:on|at|from|between|by|this|next|last|tomorrow|today|tonight|yesterday|every|until|till|all[\s-]day|noon|midnight|in\s+the\s+(?:morning|afternoon|evening)|{weekdays}|{months}|{clock}\s*(?:{MERIDIEM}|o'?clock)|{clock}\s*(?:to|until|till|through|-|–)\s*{clock}|\d{{1,2}}[/:-]\d{{1,2}}|\d{{1,2}}(?:st|nd|rd|th))\b",
        weekdays = weekday_alternation(),
        months = month_alternation(),
        clock = clock_pattern(),
    ))
    .expect("valid temporal cut regex")
});

static TEMPORAL_STRIP_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let clock = clock_pattern();
    [
        format!(
            r"(?:\b(?:from|between)\s+)?\b{clock}\s*{MERIDIEM}?\s*(?:to|until|till|-|–|and)\s*{clock}\s*{MERIDIEM}?"
        ),
        format!(r"(?:\b(?:at|by)\s+|@\s*)?\b{clock}\s*(?:{MERIDIEM}|o'?\s?clock\b)"),
        r"(?:\b(?:at|by)\s+)?\b\d{1,2}:\d{2}\b".to_string(),
        format!(
            r"\b(?:at|by)\s+(?:noon|midnight|\d{{1,2}}\b|(?:{SPOKEN_HOURS})(?:\s+(?:{SPOKEN_MINUTES}))?\b)"
        ),
        r"\b(?:noon|midnight)\b".to_string(),
        r"\b\d{1,2}/\d{1,2}(?:/\d{2,4})?\b".to_string(),
        r"\b\d{4}-\d{1,2}-\d{1,2}\b".to_string(),
        format!(
            r"(?:\b(?:on|for)\s+)?(?:\bthe\s+)?(?:\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:of\s+)?)?\b(?:{})\b\.?(?:\s+\d{{1,2}}(?:st|nd|rd|th)?\b)?(?:,?\s+\d{{4}}\b)?",
            month_alternation()
        ),
        r"\b(?:(?:the\s+)?day\s+after\s+tomorrow|today|tonight|tomorrow|yesterday|(?:next|last|this)\s+(?:week|weekend|month|year))\b".to_string(),
        format!(
            r"(?:\b(?:on|next|this|last|every)\s+)*\b(?:{})s?\b",
            weekday_alternation()
        ),
        r"\b(?:all[\s-]day|(?:the\s+)?(?:entire|whole)\s+day)\b".to_string(),
        r"\b(?:in\s+the\s+)?(?:morning|afternoon|evening)\b".to_string(),
        r"\b\d{1,2}(?:st|nd|rd|th)\b".to_string(),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid temporal strip regex"))
    .collect()
});

static KEYWORD_STRIP_RE: Lazy<Regex> = Lazy::new(|| {
    let mut keywords: Vec<&str> = CREATE_KEYWORDS
        .iter()
        .chain(EDIT_KEYWORDS)
        .chain(DELETE_KEYWORDS)
        .copied()
        .collect();
    // Longest first so "get rid of" beats shorter overlaps.
    keywords.sort_by_key(|keyword| std::cmp::Reverse(keyword.len()));
    let alternation = keywords
        .iter()
        .map(|keyword| keyword.split_whitespace().map(regex::escape).collect::<Vec<_>>().join(r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternation})\b")).expect("valid keyword strip regex")
});

static GENERIC_CAPTURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<obj>.+?)\s+(?:on|at|from|by|tomorrow|today|tonight|next|this)\b")
        .expect("valid generic capture regex")
});

static EDGE_FILLER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:a|an|the|my|our|on|at|for|to|is|are|from|in|with|and|event|called|named|it)\s+)+|(?:\s+(?:a|an|the|my|our|on|at|for|to|is|are|was|will\s+be|from|in|with|and|by|this|next|of))+$")
        .expect("valid edge filler regex")
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

#[derive(Debug, Clone, Copy)]
enum VerbTemplate {
    /// `meet with X` -> `Meeting with X`.
    VerbWith,
    /// `pick up X` -> `Pick up X`.
    VerbObject,
    ObjectOnly,
}

/// Extracts a title-cased event title from a normalized utterance.
pub fn extract_title(lowered: &str) -> String {
    let without_suffix = CALENDAR_SUFFIX_RE.replace_all(lowered, "");
    let body = PREAMBLE_RE.replace(without_suffix.trim(), "").trim().to_string();

    let title = title_from_verb_phrase(&body)
        .or_else(|| title_from_stripping(&body))
        .or_else(|| title_from_generic_capture(&body))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    capitalize_words(&title)
}

/// Reduces an edit/delete utterance to the words that name the event.
///
/// Date/time tokens, action keywords and edge fillers are dropped; inner
/// words are kept so "meeting with john" still matches as a phrase.
pub fn search_phrase(lowered: &str) -> String {
    let body = PREAMBLE_RE.replace(lowered.trim(), "");
    let without_keywords = KEYWORD_STRIP_RE.replace_all(&body, " ");
    let without_temporal = strip_temporal(&without_keywords);
    clean_edges(&without_temporal)
}

/// Content words of a search phrase, for partial matching.
pub fn search_words(phrase: &str) -> Vec<&str> {
    phrase
        .split_whitespace()
        .filter(|word| word.len() >= 3 && !MATCH_STOPWORDS.contains(word))
        .collect()
}

/// Upper-cases the first letter of every word.
pub fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_from_verb_phrase(body: &str) -> Option<String> {
    VERB_PATTERNS.iter().find_map(|(regex, template)| {
        let caps = regex.captures(body)?;
        let object = clean_object(caps.name("obj")?.as_str())?;
        let title = match template {
            VerbTemplate::VerbWith => {
                let verb = match caps.name("verb")?.as_str() {
                    "meet" => "meeting",
                    other => other,
                };
                format!("{verb} with {object}")
            }
            VerbTemplate::VerbObject => {
                let verb = caps.name("verb")?.as_str().replace("going", "go");
                format!("{} {object}", WHITESPACE_RE.replace_all(&verb, " "))
            }
            VerbTemplate::ObjectOnly => object,
        };
        Some(title)
    })
}

fn title_from_stripping(body: &str) -> Option<String> {
    let without_action = ACTION_PREFIX_RE.replace(body, "");
    non_empty(clean_edges(&strip_temporal(&without_action)))
}

fn title_from_generic_capture(body: &str) -> Option<String> {
    let without_action = ACTION_PREFIX_RE.replace(body, "");
    let caps = GENERIC_CAPTURE_RE.captures(&without_action)?;
    non_empty(clean_edges(&strip_temporal(caps.name("obj")?.as_str())))
}

/// Cuts a captured object at its first date/time marker and trims fillers.
fn clean_object(raw: &str) -> Option<String> {
    let cut = match TEMPORAL_CUT_RE.find(raw) {
        Some(marker) => &raw[..marker.start()],
        None => raw,
    };
    non_empty(clean_edges(cut))
}

fn strip_temporal(text: &str) -> String {
    TEMPORAL_STRIP_PATTERNS
        .iter()
        .fold(text.to_string(), |acc, regex| regex.replace_all(&acc, " ").into_owned())
}

fn clean_edges(text: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(text.trim(), " ");
    let trimmed = collapsed.trim_matches(|c: char| c.is_ascii_punctuation() && c != '\'');
    let mut current = trimmed.trim().to_string();
    loop {
        let next = EDGE_FILLER_RE.replace_all(&current, "").trim().to_string();
        if next == current {
            return next;
        }
        current = next;
    }
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeting_with_person_keeps_the_phrase() {
        assert_eq!(
            extract_title("create meeting with john tomorrow at 2pm"),
            "Meeting With John"
        );
    }

    #[test]
    fn possessive_title_drops_trailing_verb() {
        assert_eq!(
            extract_title("my sister's birthday is on december 25th"),
            "Sister's Birthday"
        );
    }

    #[test]
    fn preamble_is_removed_before_verb_phrases() {
        assert_eq!(
            extract_title("i need to pick up groceries after work tomorrow"),
            "Pick Up Groceries After Work"
        );
    }

    #[test]
    fn spelled_out_range_stays_out_of_title() {
        assert_eq!(
            extract_title("lunch with sam twelve to two thirty pm tomorrow"),
            "Lunch With Sam"
        );
        assert_eq!(extract_title("add yoga at seven thirty pm friday"), "Yoga");
    }

    #[test]
    fn number_words_outside_times_are_kept() {
        assert_eq!(
            extract_title("add one on one with priya tomorrow at 3pm"),
            "One On One With Priya"
        );
    }

    #[test]
    fn action_words_inside_title_are_kept() {
        assert_eq!(
            extract_title("add book club meeting tomorrow"),
            "Book Club Meeting"
        );
        assert_eq!(extract_title("schedule plan review friday"), "Plan Review");
    }

    #[test]
    fn stripping_fallback_removes_dates_and_keywords() {
        assert_eq!(
            extract_title("add dentist appointment tomorrow at 3pm"),
            "Dentist Appointment"
        );
    }

    #[test]
    fn nothing_usable_defaults() {
        assert_eq!(extract_title("schedule something tomorrow"), "Something");
        assert_eq!(extract_title("add tomorrow at 3pm"), DEFAULT_TITLE);
    }

    #[test]
    fn search_phrase_drops_keywords_and_times() {
        assert_eq!(
            search_phrase("move my dentist appointment to 3pm"),
            "dentist appointment"
        );
        assert_eq!(
            search_phrase("cancel standup at nine thirty am"),
            "standup"
        );
    }
}
