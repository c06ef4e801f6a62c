//! Fire-and-forget analytics
//!
//! [`Analytics::track`] never blocks the caller and never fails. Delivery
//! runs on a detached task; errors are logged at debug level and dropped.
//! With no endpoint configured every call is a no-op.

mod error;
mod event;
mod sink;

pub use error::AnalyticsError;
pub use event::{Event, Properties};
pub use sink::{EventSink, HttpSink};

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::config::AnalyticsConfig;

/// Event emitted when the prompt library filter changes
pub const PROMPT_FILTER_CHANGED: &str = "prompt_filter_changed";

/// Event emitted when a prompt is copied
pub const PROMPT_COPIED: &str = "prompt_copied";

/// Event emitted when the ROI calculator is recomputed
pub const ROI_CALCULATED: &str = "roi_calculated";

/// Handle used by the site to record events
#[derive(Clone)]
pub struct Analytics {
    sink: Option<Arc<dyn EventSink>>,
    source: String,
}

impl std::fmt::Debug for Analytics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analytics")
            .field("sink", &self.sink.as_ref().map(|s| s.name()))
            .field("source", &self.source)
            .finish()
    }
}

impl Analytics {
    /// Build from configuration
    ///
    /// A malformed endpoint disables analytics with a warning rather than
    /// failing startup.
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        debug!(enabled = config.is_enabled(), "Analytics::from_config: called");
        let sink = config.endpoint.as_deref().filter(|_| config.is_enabled()).and_then(|endpoint| {
            match HttpSink::new(endpoint.trim(), Duration::from_millis(config.timeout_ms)) {
                Ok(sink) => Some(Arc::new(sink) as Arc<dyn EventSink>),
                Err(e) => {
                    warn!("Analytics disabled: {}", e);
                    None
                }
            }
        });
        Self {
            sink,
            source: config.source.clone(),
        }
    }

    /// Analytics that drops every event
    pub fn disabled() -> Self {
        Self {
            sink: None,
            source: AnalyticsConfig::default().source,
        }
    }

    /// Analytics delivering to a custom sink
    pub fn with_sink(sink: Arc<dyn EventSink>, source: impl Into<String>) -> Self {
        Self {
            sink: Some(sink),
            source: source.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Record an event without waiting for delivery
    pub fn track(&self, name: &str, properties: Properties) {
        let Some(sink) = self.sink.clone() else {
            debug!(%name, "Analytics::track: disabled, dropping event");
            return;
        };
        let Ok(handle) = Handle::try_current() else {
            debug!(%name, "Analytics::track: no runtime, dropping event");
            return;
        };

        let event = Event::new(name, self.source.clone(), properties);
        debug!(%name, id = %event.id, "Analytics::track: dispatching");
        handle.spawn(async move {
            if let Err(e) = sink.deliver(&event).await {
                debug!(name = %event.name, sink = sink.name(), "Analytics::track: delivery failed: {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;
    use tokio::sync::mpsc;

    struct ChannelSink {
        tx: mpsc::UnboundedSender<Event>,
        fail: bool,
    }

    #[async_trait]
    impl EventSink for ChannelSink {
        async fn deliver(&self, event: &Event) -> Result<(), AnalyticsError> {
            let _ = self.tx.send(event.clone());
            if self.fail {
                return Err(AnalyticsError::Status { status: 500 });
            }
            Ok(())
        }

        fn name(&self) -> &'static str {
            "channel"
        }
    }

    fn channel_analytics(fail: bool) -> (Analytics, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Analytics::with_sink(Arc::new(ChannelSink { tx, fail }), "test-site"), rx)
    }

    #[test]
    fn test_disabled_without_endpoint() {
        assert!(!Analytics::from_config(&AnalyticsConfig::default()).is_enabled());

        let blank = AnalyticsConfig {
            endpoint: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!Analytics::from_config(&blank).is_enabled());
    }

    #[test]
    fn test_bad_endpoint_disables() {
        let config = AnalyticsConfig {
            endpoint: Some("collector.local".to_string()),
            ..Default::default()
        };
        assert!(!Analytics::from_config(&config).is_enabled());
    }

    #[test]
    fn test_track_outside_runtime_is_noop() {
        let (analytics, mut rx) = channel_analytics(false);
        analytics.track(PROMPT_COPIED, Properties::new());
        assert!(rx.try_recv().is_err());

        Analytics::disabled().track(PROMPT_COPIED, Properties::new());
    }

    #[tokio::test]
    async fn test_track_delivers_in_background() {
        let (analytics, mut rx) = channel_analytics(false);
        let mut props = Properties::new();
        props.insert("search".to_string(), Value::from("gap"));

        analytics.track(PROMPT_FILTER_CHANGED, props);

        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.name, PROMPT_FILTER_CHANGED);
        assert_eq!(event.source, "test-site");
        assert_eq!(event.properties["search"], "gap");
    }

    #[tokio::test]
    async fn test_delivery_failure_is_swallowed() {
        let (analytics, mut rx) = channel_analytics(true);
        analytics.track(ROI_CALCULATED, Properties::new());
        analytics.track(ROI_CALCULATED, Properties::new());

        for _ in 0..2 {
            let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
                .await
                .unwrap()
                .unwrap();
            assert_eq!(event.name, ROI_CALCULATED);
        }
    }
}
