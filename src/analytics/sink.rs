use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::info;

use super::event::AnalyticsEvent;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid collection endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("analytics sink is closed")]
    Closed,
}

/// Destination for analytics notifications.
///
/// Implementations must return quickly; anything slow belongs on a background task.
pub trait AnalyticsSink: Send + Sync {
    fn emit(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError>;
}

/// Drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl AnalyticsSink for NoopSink {
    fn emit(&self, _event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        Ok(())
    }
}

/// Writes each event as one structured log record
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl AnalyticsSink for LogSink {
    fn emit(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        let body = serde_json::to_string(event)?;
        info!(target: "leak_triage::analytics", event = event.name(), body = %body, "[event]");
        Ok(())
    }
}

/// Keeps events in memory, in emission order
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AnalyticsEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.lock().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.lock().iter().map(AnalyticsEvent::name).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.lock().iter().filter(|event| event.name() == name).count()
    }

    pub fn last(&self, name: &str) -> Option<AnalyticsEvent> {
        self.lock().iter().rev().find(|event| event.name() == name).cloned()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl AnalyticsSink for MemorySink {
    fn emit(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        self.lock().push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::event::{FLOW_RESET, FLOW_STARTED};

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.emit(&AnalyticsEvent::new(FLOW_STARTED).with("session_id", "a")).unwrap();
        sink.emit(&AnalyticsEvent::new(FLOW_RESET).with("session_id", "a")).unwrap();
        sink.emit(&AnalyticsEvent::new(FLOW_STARTED).with("session_id", "b")).unwrap();

        assert_eq!(sink.names(), vec![FLOW_STARTED, FLOW_RESET, FLOW_STARTED]);
        assert_eq!(sink.count(FLOW_STARTED), 2);
        assert_eq!(sink.last(FLOW_STARTED).unwrap().text("session_id"), Some("b"));

        sink.clear();
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_log_and_noop_sinks_accept_events() {
        let event = AnalyticsEvent::new(FLOW_STARTED).with("session_id", "a");
        assert!(LogSink.emit(&event).is_ok());
        assert!(NoopSink.emit(&event).is_ok());
    }
}
