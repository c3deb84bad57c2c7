// Analytics collaborator boundary
//
// The flow hands notifications to a Notifier, which forwards them to a sink and
// swallows any failure. Triage behaviour never depends on delivery.

pub mod event;
pub mod http;
pub mod sink;

use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::config::{AnalyticsConfig, SinkKind};

pub use event::{AnalyticsEvent, PropValue};
pub use http::HttpSink;
pub use sink::{AnalyticsError, AnalyticsSink, LogSink, MemorySink, NoopSink};

/// Fire-and-forget front for an [`AnalyticsSink`]
#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn AnalyticsSink>,
}

impl Notifier {
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self { sink }
    }

    pub fn notify(&self, event: AnalyticsEvent) {
        if let Err(e) = self.sink.emit(&event) {
            debug!(event = event.name(), error = %e, "Dropped analytics notification");
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier").field("sink", &"Arc<dyn AnalyticsSink>").finish()
    }
}

/// Build the sink described by configuration.
///
/// An HTTP sink needs both an endpoint and a runtime; without either it falls back to logging.
pub fn sink_from_config(config: &AnalyticsConfig, runtime: Option<Handle>) -> Arc<dyn AnalyticsSink> {
    if !config.enabled {
        return Arc::new(NoopSink);
    }

    match config.sink {
        SinkKind::Disabled => Arc::new(NoopSink),
        SinkKind::Log => Arc::new(LogSink),
        SinkKind::Http => {
            let (Some(endpoint), Some(runtime)) = (config.endpoint.as_deref(), runtime) else {
                warn!("HTTP analytics sink needs an endpoint and a runtime; logging events instead");
                return Arc::new(LogSink);
            };
            match HttpSink::new(endpoint, Duration::from_millis(config.timeout_ms), runtime) {
                Ok(sink) => {
                    info!(endpoint = %sink.endpoint(), "Sending analytics events over HTTP");
                    Arc::new(sink)
                }
                Err(e) => {
                    warn!(error = %e, "Could not build HTTP analytics sink; logging events instead");
                    Arc::new(LogSink)
                }
            }
        }
    }
}
