//! Calendar voice-command core.
//! Lays out overlapping events and turns spoken requests into calendar commands.

pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod nlp;
pub mod service;

pub use config::{ConfigError, ConfigResult, InterpreterConfig};
pub use layout::overlap::{events_on, layout, layout_for_date, PlacedEvent};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::command::{CalendarView, Command, Direction, Intent};
pub use model::entity::{Entity, EntityKind, Transcript};
pub use model::event::{Event, EventId, EventPatch, EventValidationError};
pub use nlp::builders::BuildError;
pub use service::calendar_host::{CalendarHost, HostError, HostResult};
pub use service::calendar_state::CalendarState;
pub use service::executor::{execute, ExecutionResult, FailureKind};
pub use service::voice_service::{Interpretation, Transcriber, TranscriptionError, VoiceService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
