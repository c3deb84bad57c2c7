use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::debug;

use super::event::AnalyticsEvent;
use super::sink::{AnalyticsError, AnalyticsSink};

/// POSTs each event to a collection endpoint without waiting for the response.
///
/// The request runs on the given runtime; `emit` returns as soon as it is spawned.
/// Failed deliveries are logged at debug level and dropped. There are no retries.
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: Client,
    endpoint: Url,
    runtime: Handle,
}

impl HttpSink {
    pub fn new(endpoint: &str, timeout: Duration, runtime: Handle) -> Result<Self, AnalyticsError> {
        let endpoint = Url::parse(endpoint).map_err(|e| AnalyticsError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint,
            runtime,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl AnalyticsSink for HttpSink {
    fn emit(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        let body = serde_json::to_vec(event)?;
        let name = event.name();
        let request = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        self.runtime.spawn(async move {
            match request.send().await {
                Ok(response) if !response.status().is_success() => {
                    debug!(event = name, status = %response.status(), "Collection endpoint rejected event");
                }
                Ok(_) => {}
                Err(e) => {
                    debug!(event = name, error = %e, "Event delivery failed");
                }
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_malformed_endpoint() {
        let result = HttpSink::new("not a url", Duration::from_secs(1), Handle::current());
        assert!(matches!(result, Err(AnalyticsError::InvalidEndpoint { .. })));
    }

    #[tokio::test]
    async fn test_endpoint_is_parsed_once() {
        let sink = HttpSink::new(
            "http://localhost:3000/api/event",
            Duration::from_secs(1),
            Handle::current(),
        )
        .unwrap();
        assert_eq!(sink.endpoint().path(), "/api/event");
        assert_eq!(sink.endpoint().port(), Some(3000));
    }

    #[tokio::test]
    async fn test_emit_returns_without_a_listening_server() {
        // Port 9 (discard) is almost never served locally; the failure lands on the background task.
        let sink = HttpSink::new(
            "http://127.0.0.1:9/api/event",
            Duration::from_millis(200),
            Handle::current(),
        )
        .unwrap();
        let event = AnalyticsEvent::new(crate::analytics::event::FLOW_STARTED).with("session_id", "x");
        assert!(sink.emit(&event).is_ok());
    }
}
