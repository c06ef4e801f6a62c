//! Loaded site data shared by the server and the static renderer

use eyre::{Context, Result};
use promptlib::{DEFAULT_EXPORT_TITLE, PromptLibrary};
use tracing::{debug, info};

use crate::config::ContentConfig;
use crate::content::SiteContent;
use crate::roi::Tier;
use crate::routes::RouteTable;

/// Content, prompt library and routes, loaded once at startup
#[derive(Debug, Clone)]
pub struct Site {
    pub content: SiteContent,
    pub library: PromptLibrary,
    pub routes: RouteTable,
}

impl Site {
    /// Load content and prompts, honoring configured override files
    pub fn load(config: &ContentConfig) -> Result<Self> {
        debug!(?config, "Site::load: called");
        let content = SiteContent::load_or_embedded(config.site_file.as_deref()).context("Failed to load site content")?;
        let library =
            PromptLibrary::load_or_embedded(config.prompts_file.as_deref()).context("Failed to load prompt library")?;
        info!(
            "Site loaded: {} solutions, {} prompts",
            content.solutions.len(),
            library.len()
        );
        Ok(Self::new(content, library))
    }

    /// The embedded content and prompts
    pub fn embedded() -> Result<Self> {
        Self::load(&ContentConfig::default())
    }

    pub fn new(content: SiteContent, library: PromptLibrary) -> Self {
        let routes = RouteTable::new(&content);
        Self {
            content,
            library,
            routes,
        }
    }

    /// Title for prompt library exports
    pub fn export_title(&self) -> String {
        format!("{} for {}", DEFAULT_EXPORT_TITLE, self.content.client.name)
    }

    /// Investment tiers for payback
    pub fn tiers(&self) -> Vec<Tier> {
        self.content.tiers()
    }
}
