//! Shared server state

use std::sync::Arc;

use eyre::{Context, Result};
use tracing::debug;

use crate::analytics::Analytics;
use crate::config::Config;
use crate::pages::PageRenderer;
use crate::site::Site;

/// Everything a handler needs, immutable after startup
#[derive(Debug)]
pub struct AppState {
    pub site: Site,
    pub pages: PageRenderer,
    pub analytics: Analytics,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(site: Site, pages: PageRenderer, analytics: Analytics) -> Self {
        Self { site, pages, analytics }
    }

    /// Load content, templates and analytics from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        debug!("AppState::from_config: called");
        let site = Site::load(&config.content)?;
        let pages = PageRenderer::new(config.content.templates_dir.as_deref()).context("Failed to load templates")?;
        let analytics = Analytics::from_config(&config.analytics);
        Ok(Self::new(site, pages, analytics))
    }

    /// Embedded content with analytics disabled
    pub fn embedded() -> Result<Self> {
        let site = Site::embedded()?;
        let pages = PageRenderer::embedded_only().context("Failed to load templates")?;
        Ok(Self::new(site, pages, Analytics::disabled()))
    }

    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }
}
