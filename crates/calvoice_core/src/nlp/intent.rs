//! Keyword-scored intent classification.
//!
//! # Scoring
//! - Each keyword found as a whole word adds `len(keyword)` plus
//!   `WHOLE_WORD_BONUS`, once per keyword.
//! - "go to" counts as navigation only before a navigation target
//!   (`next`, `today`, a weekday, ...); otherwise it scores for create.
//! - `next`/`last`/`previous` directly before a date unit ("next week") are
//!   weak navigation signals, dropped when any other intent scored.
//! - View switching needs a view name (`day`, `week`, `month`, ...).
//!
//! # Selection
//! Non-zero intents are ranked `Delete > Edit > SwitchView > Create >
//! Navigate`; the top two are compared and the lower-priority one wins only
//! with a strictly higher score. With no keyword hits, a date or time makes
//! the utterance a create request.

use crate::model::command::Intent;
use crate::model::entity::{EntityKind, Transcript};
use crate::nlp::dates::resolve_date;
use crate::nlp::lexicon::{
    keywords_for, next_word, normalize_utterance, phrase_regex, DATE_MODIFIER_WORDS,
    DATE_UNIT_WORDS, KEYWORD_EXCLUSIONS, NAVIGATION_TARGETS, VIEW_TOKENS,
};
use crate::nlp::times::has_explicit_time;
use chrono::NaiveDate;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

const WHOLE_WORD_BONUS: u32 = 2;
const GO_TO: &str = "go to";

struct KeywordPattern {
    intent: Intent,
    keyword: &'static str,
    regex: Regex,
}

static KEYWORD_PATTERNS: Lazy<Vec<KeywordPattern>> = Lazy::new(|| {
    Intent::PRIORITY
        .iter()
        .flat_map(|intent| {
            keywords_for(*intent).iter().map(move |keyword| KeywordPattern {
                intent: *intent,
                keyword: *keyword,
                regex: phrase_regex(keyword),
            })
        })
        .collect()
});

static VIEW_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = VIEW_TOKENS
        .iter()
        .map(|(token, _)| *token)
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternation})\b")).expect("valid view token regex")
});

/// Per-intent keyword scores for one utterance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentScores {
    pub create: u32,
    pub edit: u32,
    pub delete: u32,
    pub navigate: u32,
    pub switch_view: u32,
}

impl IntentScores {
    pub fn get(&self, intent: Intent) -> u32 {
        match intent {
            Intent::Create => self.create,
            Intent::Edit => self.edit,
            Intent::Delete => self.delete,
            Intent::Navigate => self.navigate,
            Intent::SwitchView => self.switch_view,
            Intent::Unrecognized => 0,
        }
    }

    fn add(&mut self, intent: Intent, points: u32) {
        match intent {
            Intent::Create => self.create += points,
            Intent::Edit => self.edit += points,
            Intent::Delete => self.delete += points,
            Intent::Navigate => self.navigate += points,
            Intent::SwitchView => self.switch_view += points,
            Intent::Unrecognized => {}
        }
    }
}

/// Classifier verdict plus the scores behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    pub scores: IntentScores,
}

/// Classifies an utterance into one intent.
///
/// `reference` is only used to decide whether the text carries a date when
/// no keyword matched.
pub fn classify(transcript: &Transcript, reference: NaiveDate) -> Classification {
    let lowered = normalize_utterance(&transcript.text);
    let scores = score_keywords(&lowered);

    let ranked: Vec<(Intent, u32)> = Intent::PRIORITY
        .iter()
        .map(|intent| (*intent, scores.get(*intent)))
        .filter(|(_, score)| *score > 0)
        .collect();

    let intent = match ranked.as_slice() {
        [] if has_temporal_signal(transcript, &lowered, reference) => Intent::Create,
        [] => Intent::Unrecognized,
        [(only, _)] => *only,
        [(first, first_score), (second, second_score), ..] => {
            if second_score > first_score {
                *second
            } else {
                *first
            }
        }
    };

    debug!(
        "event=intent_classified module=nlp intent={} score={} words={} entities={}",
        intent.as_str(),
        scores.get(intent),
        lowered.split_whitespace().count(),
        transcript.entities.len()
    );

    Classification { intent, scores }
}

/// Computes raw keyword scores for lowercase text.
pub fn score_keywords(lowered: &str) -> IntentScores {
    let mut scores = IntentScores::default();
    let mut weak_navigation = 0;

    for pattern in KEYWORD_PATTERNS.iter() {
        let hits: Vec<_> = pattern
            .regex
            .find_iter(lowered)
            .filter(|hit| !is_excluded(pattern.keyword, lowered, hit.end()))
            .collect();
        if hits.is_empty() {
            continue;
        }
        let points = pattern.keyword.len() as u32 + WHOLE_WORD_BONUS;

        if pattern.keyword == GO_TO {
            let navigational = hits.iter().any(|hit| {
                next_word(lowered, hit.end()).is_some_and(|word| NAVIGATION_TARGETS.contains(&word))
            });
            let intent = if navigational {
                Intent::Navigate
            } else {
                Intent::Create
            };
            scores.add(intent, points);
            continue;
        }

        if pattern.intent == Intent::Navigate && DATE_MODIFIER_WORDS.contains(&pattern.keyword) {
            let all_date_phrases = hits.iter().all(|hit| {
                next_word(lowered, hit.end()).is_some_and(|word| DATE_UNIT_WORDS.contains(&word))
            });
            if all_date_phrases {
                weak_navigation += points;
                continue;
            }
        }

        if pattern.intent == Intent::SwitchView && !VIEW_TOKEN_RE.is_match(lowered) {
            continue;
        }

        scores.add(pattern.intent, points);
    }

    let other_intents = scores.create + scores.edit + scores.delete + scores.switch_view;
    if other_intents == 0 {
        scores.navigate += weak_navigation;
    }
    scores
}

fn is_excluded(keyword: &str, lowered: &str, end: usize) -> bool {
    KEYWORD_EXCLUSIONS.iter().any(|(excluded, follower)| {
        *excluded == keyword && next_word(lowered, end) == Some(*follower)
    })
}

fn has_temporal_signal(transcript: &Transcript, lowered: &str, reference: NaiveDate) -> bool {
    transcript.has_kind(EntityKind::Date)
        || transcript.has_kind(EntityKind::Time)
        || resolve_date(lowered, reference).is_some()
        || has_explicit_time(lowered)
}
