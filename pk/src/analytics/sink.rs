//! Event delivery backends

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::error::AnalyticsError;
use super::event::Event;

/// A destination for analytics events
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Deliver one event
    async fn deliver(&self, event: &Event) -> Result<(), AnalyticsError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Posts each event as JSON to a collector URL
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSink {
    /// Create a sink for `endpoint` with a per-request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AnalyticsError> {
        let endpoint = endpoint.into();
        debug!(%endpoint, ?timeout, "HttpSink::new: called");
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(AnalyticsError::InvalidEndpoint(endpoint));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("PitchKit/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EventSink for HttpSink {
    async fn deliver(&self, event: &Event) -> Result<(), AnalyticsError> {
        debug!(name = %event.name, endpoint = %self.endpoint, "HttpSink::deliver: called");
        let response = self.client.post(&self.endpoint).json(event).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(%status, "HttpSink::deliver: collector rejected event");
            return Err(AnalyticsError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
