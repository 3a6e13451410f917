//! Interpreter configuration.
//!
//! # Responsibility
//! - Hold the tunable defaults used when an utterance leaves values out.
//! - Hold the all-day vocabulary as data instead of inline literals.
//!
//! # Invariants
//! - Every field has a default, so partial JSON documents are accepted.
//! - `validate()` runs on every load path.

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

use crate::model::event::{DEFAULT_CALENDAR, DEFAULT_EVENT_COLOR};

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"));

/// One week.
pub const MAX_DEFAULT_DURATION_MINUTES: i64 = 7 * 24 * 60;

/// Life events and holidays that make an untimed event all-day.
const DEFAULT_ALL_DAY_KEYWORDS: &[&str] = &[
    // personal milestones
    "birthday",
    "bday",
    "anniversary",
    "graduation",
    "wedding",
    "engagement",
    "baby shower",
    "bridal shower",
    "funeral",
    "memorial",
    "retirement",
    "reunion",
    // time off
    "vacation",
    "holiday",
    "day off",
    "pto",
    "trip",
    "staycation",
    // holidays
    "new year's day",
    "new year's eve",
    "valentine's day",
    "st. patrick's day",
    "easter",
    "passover",
    "mother's day",
    "father's day",
    "memorial day",
    "juneteenth",
    "independence day",
    "fourth of july",
    "labor day",
    "halloween",
    "veterans day",
    "thanksgiving",
    "hanukkah",
    "diwali",
    "eid",
    "christmas eve",
    "christmas",
    "kwanzaa",
    "lunar new year",
];

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading and validation error.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read interpreter config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse interpreter config: {err}"),
            Self::Invalid(message) => write!(f, "invalid interpreter config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Defaults and vocabulary used by the voice interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Start time for timed events when the utterance names none.
    pub default_start_time: NaiveTime,
    /// Duration for timed events when no end time resolves.
    pub default_duration_minutes: i64,
    pub default_calendar: String,
    /// `#RRGGBB` color for voice-created events.
    pub default_color: String,
    /// Lowercase phrases that mark an untimed event as all-day.
    pub all_day_keywords: Vec<String>,
    /// When edit/delete matching fails, target the first event on the
    /// reference date.
    pub fallback_to_first_event_today: bool,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            default_start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid default start"),
            default_duration_minutes: 60,
            default_calendar: DEFAULT_CALENDAR.to_string(),
            default_color: DEFAULT_EVENT_COLOR.to_string(),
            all_day_keywords: DEFAULT_ALL_DAY_KEYWORDS
                .iter()
                .map(|keyword| keyword.to_string())
                .collect(),
            fallback_to_first_event_today: true,
        }
    }
}

impl InterpreterConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_duration_minutes <= 0 {
            return Err(ConfigError::Invalid(format!(
                "default_duration_minutes must be positive, got {}",
                self.default_duration_minutes
            )));
        }
        if self.default_duration_minutes > MAX_DEFAULT_DURATION_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "default_duration_minutes must be at most {MAX_DEFAULT_DURATION_MINUTES}, got {}",
                self.default_duration_minutes
            )));
        }
        if self.default_calendar.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_calendar cannot be empty".to_string(),
            ));
        }
        if !HEX_COLOR_RE.is_match(self.default_color.trim()) {
            return Err(ConfigError::Invalid(format!(
                "default_color must be #RRGGBB, got `{}`",
                self.default_color
            )));
        }
        if self.all_day_keywords.is_empty() {
            return Err(ConfigError::Invalid(
                "all_day_keywords cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the first all-day keyword contained in `lowered`, if any.
    pub fn matching_all_day_keyword(&self, lowered: &str) -> Option<&str> {
        self.all_day_keywords
            .iter()
            .map(String::as_str)
            .find(|keyword| contains_phrase(lowered, keyword))
    }

    fn normalize(&mut self) {
        for keyword in &mut self.all_day_keywords {
            *keyword = keyword.trim().to_lowercase();
        }
        self.all_day_keywords.retain(|keyword| !keyword.is_empty());
    }
}

/// Whole-word phrase containment over lowercase text.
fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    haystack.match_indices(phrase).any(|(index, _)| {
        let before = haystack[..index].chars().next_back();
        let after = haystack[index + phrase.len()..].chars().next();
        !before.is_some_and(|c| c.is_alphanumeric()) && !after.is_some_and(|c| c.is_alphanumeric())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        InterpreterConfig::default()
            .validate()
            .expect("defaults should validate");
    }

    #[test]
    fn keyword_match_respects_word_boundaries() {
        let config = InterpreterConfig::default();
        assert_eq!(
            config.matching_all_day_keyword("mom's birthday party"),
            Some("birthday")
        );
        assert_eq!(config.matching_all_day_keyword("the tripod review"), None);
    }

    #[test]
    fn rejects_bad_color() {
        let err = InterpreterConfig::from_json_str(r#"{"default_color":"blue"}"#)
            .expect_err("named colors are not accepted");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
