use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::ObservabilityConfig;

/// Initialize structured logging.
///
/// Logs go to stderr so stdout stays clean for the copyable message.
/// `RUST_LOG` wins over the configured level when set.
pub fn init_telemetry(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()?;
    }

    tracing::debug!("leak-triage telemetry initialized");
    Ok(())
}

/// Generate a fresh run identifier
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one transition of a triage run
pub fn create_run_span(run_id: &str, step: u8) -> tracing::Span {
    tracing::info_span!("triage_run", run.id = run_id, step = step)
}
