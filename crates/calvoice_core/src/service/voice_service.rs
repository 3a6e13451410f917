//! Voice command use-case service.
//!
//! # Responsibility
//! - Wire transcript -> intent -> command -> execution.
//! - Translate transcription and build failures into recoverable results.
//!
//! # Invariants
//! - One transcript yields at most one executed command.
//! - Logs carry metadata only; transcript text and titles are never logged.

use crate::config::InterpreterConfig;
use crate::model::command::{Command, Intent};
use crate::model::entity::Transcript;
use crate::model::event::Event;
use crate::nlp::builders::{build_command, BuildContext, BuildError};
use crate::nlp::intent::{classify, IntentScores};
use crate::service::calendar_host::CalendarHost;
use crate::service::executor::{execute, ExecutionResult, FailureKind};
use chrono::NaiveDateTime;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure reported by the external speech-to-text service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionError {
    /// No audio was captured.
    EmptyAudio,
    /// Credentials were rejected.
    Auth(String),
    Network(String),
    /// The service answered with an error of its own.
    Service(String),
}

impl Display for TranscriptionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAudio => write!(f, "no audio captured"),
            Self::Auth(message) => write!(f, "transcription auth failed: {message}"),
            Self::Network(message) => write!(f, "transcription network failure: {message}"),
            Self::Service(message) => write!(f, "transcription service error: {message}"),
        }
    }
}

impl Error for TranscriptionError {}

impl TranscriptionError {
    fn label(&self) -> &'static str {
        match self {
            Self::EmptyAudio => "empty_audio",
            Self::Auth(_) => "auth",
            Self::Network(_) => "network",
            Self::Service(_) => "service",
        }
    }

    fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyAudio => "No speech was recorded. Hold the button and try again.",
            Self::Auth(_) => "The speech service rejected our credentials. Check the API key.",
            Self::Network(_) => "Could not reach the speech service. Check your connection.",
            Self::Service(_) => "The speech service failed to transcribe that. Please try again.",
        }
    }
}

/// Speech-to-text collaborator.
pub trait Transcriber {
    fn transcribe(&self, audio: &[u8]) -> Result<Transcript, TranscriptionError>;
}

/// Classification plus the command built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub intent: Intent,
    pub scores: IntentScores,
    pub command: Result<Command, BuildError>,
}

/// Interprets and executes voice commands with one configuration.
#[derive(Debug, Clone, Default)]
pub struct VoiceService {
    config: InterpreterConfig,
}

impl VoiceService {
    pub fn new(config: InterpreterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Builds the command for `transcript` without touching any host.
    ///
    /// `now` is the reference instant for relative dates and the today
    /// fallback.
    pub fn interpret(
        &self,
        transcript: &Transcript,
        events: &[Event],
        now: NaiveDateTime,
    ) -> Interpretation {
        if transcript.text.trim().is_empty() {
            return Interpretation {
                intent: Intent::Unrecognized,
                scores: IntentScores::default(),
                command: Ok(Command::Unrecognized),
            };
        }

        let classification = classify(transcript, now.date());
        let ctx = BuildContext::new(transcript, events, now, &self.config);
        let command = build_command(classification.intent, &ctx);
        Interpretation {
            intent: classification.intent,
            scores: classification.scores,
            command,
        }
    }

    /// Interprets `transcript` against `host` and executes the result.
    pub fn handle_transcript<H: CalendarHost + ?Sized>(
        &self,
        host: &mut H,
        transcript: &Transcript,
        now: NaiveDateTime,
    ) -> ExecutionResult {
        let events = host.events();
        let interpretation = self.interpret(transcript, &events, now);
        info!(
            "event=voice_command module=service intent={} text_len={} entities={} events={}",
            interpretation.intent.as_str(),
            transcript.text.len(),
            transcript.entities.len(),
            events.len()
        );

        match interpretation.command {
            Ok(command) => execute(&command, host, now.date()),
            Err(err) => {
                warn!(
                    "event=command_build_failed module=service intent={} status=error",
                    interpretation.intent.as_str()
                );
                ExecutionResult::from_build_error(&err)
            }
        }
    }

    /// Transcribes `audio`, then handles the transcript.
    ///
    /// Transcription failures become `FailureKind::Transcription` results.
    pub fn handle_audio<T, H>(
        &self,
        transcriber: &T,
        audio: &[u8],
        host: &mut H,
        now: NaiveDateTime,
    ) -> ExecutionResult
    where
        T: Transcriber + ?Sized,
        H: CalendarHost + ?Sized,
    {
        if audio.is_empty() {
            return transcription_failure(&TranscriptionError::EmptyAudio);
        }
        match transcriber.transcribe(audio) {
            Ok(transcript) => self.handle_transcript(host, &transcript, now),
            Err(err) => transcription_failure(&err),
        }
    }
}

fn transcription_failure(err: &TranscriptionError) -> ExecutionResult {
    warn!(
        "event=transcription_failed module=service status=error reason={}",
        err.label()
    );
    ExecutionResult::failure(FailureKind::Transcription, err.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcription_errors_have_distinct_messages() {
        let auth = TranscriptionError::Auth("401".to_string()).user_message();
        let network = TranscriptionError::Network("timeout".to_string()).user_message();
        assert_ne!(auth, network);
    }
}
