use anyhow::Result;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for leak-triage
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Where analytics notifications go
    pub analytics: AnalyticsConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Structured log record per event
    Log,
    /// POST to `endpoint`
    Http,
    #[serde(rename = "none")]
    Disabled,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub enabled: bool,
    pub sink: SinkKind,
    /// Collection endpoint for the HTTP sink
    pub endpoint: Option<String>,
    /// Per-request timeout for the HTTP sink
    pub timeout_ms: u64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sink: SinkKind::Log,
            endpoint: None,
            timeout_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Used when RUST_LOG is not set
    pub log_level: String,
    /// Emit JSON log lines instead of compact text
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json_logs: false,
        }
    }
}

impl TriageConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (leak-triage.toml, .leak-triage-rc)
    /// 3. Environment variables (LEAK_TRIAGE_ANALYTICS__SINK=http, ...)
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Same as [`TriageConfig::load`] but reads files from `dir`
    pub fn load_from(dir: &Path) -> Result<Self> {
        let mut builder = Config::builder();

        let toml_file = dir.join("leak-triage.toml");
        if toml_file.exists() {
            builder = builder.add_source(File::from(toml_file).format(FileFormat::Toml));
        }

        let rc_file = dir.join(".leak-triage-rc");
        if rc_file.exists() {
            builder = builder.add_source(File::from(rc_file).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("LEAK_TRIAGE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<TriageConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = TriageConfig::load_env_file();
        TriageConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static TriageConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}
