//! Analytics error types

use thiserror::Error;

/// Errors that can occur delivering an event
///
/// These never reach the caller of [`super::Analytics::track`]; they are
/// logged and dropped.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Collector returned {status}")]
    Status { status: u16 },

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}
