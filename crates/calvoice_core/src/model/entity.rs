//! Transcript input produced by the external speech service.

use serde::{Deserialize, Serialize};

/// Entity category reported by the transcription service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Date,
    Time,
    Person,
    Organization,
    Quantity,
    /// Any category core does not interpret.
    #[serde(other)]
    Other,
}

/// One detected entity: a category plus the raw transcript substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub value: String,
}

impl Entity {
    pub fn new(kind: EntityKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Completed utterance handed to core: text plus optional entities.
///
/// An empty `entities` list is valid; interpretation then falls back to
/// text-only parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl Transcript {
    /// Creates a text-only transcript.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            entities: Vec::new(),
        }
    }

    pub fn with_entities(text: impl Into<String>, entities: Vec<Entity>) -> Self {
        Self {
            text: text.into(),
            entities,
        }
    }

    /// Returns entity values of one kind, in transcript order.
    pub fn values_of(&self, kind: EntityKind) -> impl Iterator<Item = &str> {
        self.entities
            .iter()
            .filter(move |entity| entity.kind == kind)
            .map(|entity| entity.value.as_str())
    }

    pub fn has_kind(&self, kind: EntityKind) -> bool {
        self.values_of(kind).next().is_some()
    }
}
