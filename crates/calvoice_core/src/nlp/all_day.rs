//! All-day event detection.
//!
//! An utterance is all-day when it says so explicitly ("all day", "entire
//! day") or names a life event/holiday from the configured vocabulary
//! without any time. A time range anywhere always wins and keeps the event
//! timed.

use crate::config::InterpreterConfig;
use crate::nlp::times::{resolve_time, resolve_time_range};
use once_cell::sync::Lazy;
use regex::Regex;

static EXPLICIT_ALL_DAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:all[\s-]day|(?:the\s+)?(?:entire|whole)\s+day)\b")
        .expect("valid all-day regex")
});

/// Returns whether `lowered` describes an all-day event.
///
/// `has_time_entity` reports TIME entities from the speech service, which
/// count as explicit times alongside the text itself.
pub fn detect_all_day(lowered: &str, has_time_entity: bool, config: &InterpreterConfig) -> bool {
    if resolve_time_range(lowered).is_some() {
        return false;
    }
    if EXPLICIT_ALL_DAY_RE.is_match(lowered) {
        return true;
    }
    config.matching_all_day_keyword(lowered).is_some()
        && !has_time_entity
        && resolve_time(lowered).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holiday_without_time_is_all_day() {
        let config = InterpreterConfig::default();
        assert!(detect_all_day("thanksgiving dinner on thursday", false, &config));
        assert!(!detect_all_day("thanksgiving dinner at 5pm", false, &config));
        assert!(!detect_all_day("thanksgiving dinner", true, &config));
    }

    #[test]
    fn explicit_phrase_yields_to_time_range() {
        let config = InterpreterConfig::default();
        assert!(detect_all_day("offsite all day friday", false, &config));
        assert!(!detect_all_day("offsite all day friday from 9 to 5", false, &config));
    }
}
