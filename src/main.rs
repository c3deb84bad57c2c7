use anyhow::Result;
use clap::Parser;
use std::time::Duration;

use leak_triage::analytics::sink_from_config;
use leak_triage::cli::commands::{self, CheckCommand, Command, EvaluateCommand, MatrixCommand};
use leak_triage::cli::{Cli, Commands};
use leak_triage::config::{config, TriageConfig};
use leak_triage::telemetry::init_telemetry;
use leak_triage::triage::AnswerSet;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match config() {
        Ok(settings) => settings.clone(),
        Err(e) => {
            eprintln!("⚠️  {e}; using defaults");
            TriageConfig::default()
        }
    };
    init_telemetry(&settings.observability)?;

    match cli.command {
        None => commands::show_how_to_start(),
        Some(Commands::Check) => {
            // Only the HTTP sink uses the runtime; pending deliveries get a short grace period on exit.
            let runtime = tokio::runtime::Runtime::new()?;
            let sink = sink_from_config(&settings.analytics, Some(runtime.handle().clone()));
            let outcome = CheckCommand::new(sink).execute();
            runtime.shutdown_timeout(Duration::from_millis(settings.analytics.timeout_ms));
            outcome
        }
        Some(Commands::Evaluate {
            location,
            active,
            danger,
            json,
        }) => EvaluateCommand::new(AnswerSet::new(location, active, danger))
            .with_json(json)
            .execute(),
        Some(Commands::Matrix { json }) => MatrixCommand { json }.execute(),
    }
}
