//! Voice utterance interpretation.
//!
//! # Responsibility
//! - Normalize date and time expressions against a reference instant.
//! - Score an utterance into one `Intent`.
//! - Build a single `Command` per utterance from the winning intent.
//!
//! # Invariants
//! - Entity-based and text-only parsing share the same lexicon tables.
//! - Every step is pure: same transcript, events and reference yield the
//!   same command (modulo generated event ids).
//! - Malformed tokens are rejected and resolution falls through, never panics.

pub mod all_day;
pub mod builders;
pub mod dates;
pub mod intent;
pub mod lexicon;
pub mod times;
pub mod title;
