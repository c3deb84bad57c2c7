// leak-triage library - water leak triage decisions and the question flow that collects them
// This exposes the core components for testing and embedding

pub mod analytics;
pub mod cli;
pub mod config;
pub mod flow;
pub mod telemetry;
pub mod triage;

// Re-export key types for easy access
pub use analytics::{AnalyticsEvent, AnalyticsSink, HttpSink, LogSink, MemorySink, Notifier, NoopSink};
pub use self::config::{config, TriageConfig};
pub use flow::{FlowInput, RunIdSource, SequentialRunIds, Step, TriageFlow, UuidRunIds};
pub use telemetry::{create_run_span, generate_run_id, init_telemetry};
pub use triage::{evaluate, AnswerSet, Decision, DecisionResult, Location, Urgency, YesNo};
