//! Domain model shared by layout, interpretation and execution.
//!
//! # Responsibility
//! - Define the calendar `Event` shape consumed and produced by core.
//! - Define transcript input (`Transcript`, `Entity`) and command output.
//!
//! # Invariants
//! - Every event is identified by a stable, non-empty `EventId`.
//! - `Event::end` is strictly after `Event::start`.
//! - A `Command` is built fresh per utterance and consumed exactly once.

pub mod command;
pub mod entity;
pub mod event;
