//! Calendar-facing services.
//!
//! # Responsibility
//! - Define the host calendar contract and an in-memory implementation.
//! - Execute commands and report user-facing outcomes.
//! - Expose the end-to-end voice command facade.

pub mod calendar_host;
pub mod calendar_state;
pub mod executor;
pub mod voice_service;
