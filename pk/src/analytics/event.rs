//! Analytics event payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Free-form event properties
pub type Properties = Map<String, Value>;

/// One analytics event as sent to the collector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique event id
    pub id: Uuid,
    /// Event name, e.g. `prompt_filter_changed`
    pub name: String,
    /// Site that produced the event
    pub source: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Caller-supplied properties
    #[serde(default)]
    pub properties: Properties,
}

impl Event {
    pub fn new(name: impl Into<String>, source: impl Into<String>, properties: Properties) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            source: source.into(),
            timestamp: Utc::now(),
            properties,
        }
    }
}
