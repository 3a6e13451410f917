//! CLI smoke entry point.
//!
//! # Responsibility
//! - Run one transcript through the voice pipeline against an in-memory
//!   calendar and print the outcome.
//!
//! Set `CALVOICE_LOG_DIR` to an absolute path to enable file logs.

use calvoice_core::{
    core_version, default_log_level, init_logging, CalendarState, Event, InterpreterConfig,
    LogSettings, Transcript, VoiceService,
};
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "calvoice", version, about = "Interpret one calendar voice command")]
struct Cli {
    #[arg(long, help = "JSON file with the events to seed the calendar with")]
    events: Option<PathBuf>,

    #[arg(long, help = "JSON interpreter config")]
    config: Option<PathBuf>,

    #[arg(long, env = "CALVOICE_LOG_DIR", help = "Absolute directory for log files")]
    log_dir: Option<PathBuf>,

    #[arg(required = true, help = "Transcript words")]
    transcript: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let settings = LogSettings::new(log_dir).with_level(default_log_level());
        if let Err(err) = init_logging(&settings) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = match &cli.config {
        Some(path) => InterpreterConfig::from_path(path).map_err(|err| format!("config: {err}"))?,
        None => InterpreterConfig::default(),
    };
    let events: Vec<Event> = match &cli.events {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|err| format!("events: {err}"))?;
            serde_json::from_str(&raw).map_err(|err| format!("events: {err}"))?
        }
        None => Vec::new(),
    };

    let now = Local::now().naive_local();
    let mut state =
        CalendarState::with_events(now.date(), events).map_err(|err| format!("events: {err}"))?;
    let service = VoiceService::new(config);
    let transcript = Transcript::text(cli.transcript.join(" "));
    let result = service.handle_transcript(&mut state, &transcript, now);

    println!("calvoice_core version={}", core_version());
    println!(
        "{}",
        serde_json::to_string_pretty(&result).map_err(|err| err.to_string())?
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&state).map_err(|err| err.to_string())?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn transcript_words_are_collected() {
        let cli = Cli::try_parse_from(["calvoice", "--events", "e.json", "go", "to", "next", "week"])
            .unwrap();
        assert_eq!(cli.events.as_deref(), Some(std::path::Path::new("e.json")));
        assert_eq!(cli.transcript.join(" "), "go to next week");
    }

    #[test]
    fn missing_transcript_is_an_error() {
        assert!(Cli::try_parse_from(["calvoice", "--config", "c.json"]).is_err());
    }
}
