//! Routing surface
//!
//! The site has a fixed set of human-navigable pages, a print-friendly
//! variant of most of them under `/print`, and permanent redirects from
//! deprecated paths. [`RouteTable`] is the single source of truth for the
//! HTTP server and the static renderer.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::content::{RedirectRule, SiteContent};

/// Prefix for print-friendly variants
pub const PRINT_PREFIX: &str = "/print";

/// A logical page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Page {
    Home,
    Pitch,
    Solution(String),
    Pricing,
    Contact,
    Prompts,
    Roi,
}

impl Page {
    /// Canonical path of the screen variant
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Pitch => "/pitch".to_string(),
            Self::Solution(slug) => format!("/solutions/{}", slug),
            Self::Pricing => "/pricing".to_string(),
            Self::Contact => "/contact".to_string(),
            Self::Prompts => "/prompts".to_string(),
            Self::Roi => "/roi".to_string(),
        }
    }

    /// Path of the print variant, if the page has one
    pub fn print_path(&self) -> Option<String> {
        if !self.has_print_variant() {
            return None;
        }
        Some(match self {
            Self::Home => PRINT_PREFIX.to_string(),
            other => format!("{}{}", PRINT_PREFIX, other.path()),
        })
    }

    /// The ROI calculator is interactive and has no paper form
    pub fn has_print_variant(&self) -> bool {
        !matches!(self, Self::Roi)
    }

    /// Template used to render the page body
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Pitch => "pitch",
            Self::Solution(_) => "solution",
            Self::Pricing => "pricing",
            Self::Contact => "contact",
            Self::Prompts => "prompts",
            Self::Roi => "roi",
        }
    }

    /// Navigation label
    pub fn nav_label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Pitch => "The plan",
            Self::Solution(_) => "Solution",
            Self::Pricing => "Pricing",
            Self::Contact => "Contact",
            Self::Prompts => "Prompt library",
            Self::Roi => "ROI calculator",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Outcome of resolving a request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Render a page, optionally its print variant
    Page { page: Page, print: bool },
    /// Permanent redirect to another path
    Redirect(String),
    /// No such page
    NotFound,
}

/// Every page path and redirect known to the site
#[derive(Debug, Clone)]
pub struct RouteTable {
    pages: Vec<Page>,
    redirects: Vec<RedirectRule>,
}

/// Strip the trailing slash (except on the root)
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

impl RouteTable {
    /// Build the table from site content
    pub fn new(site: &SiteContent) -> Self {
        debug!(solutions = site.solutions.len(), "RouteTable::new: called");
        let mut pages = vec![Page::Home, Page::Pitch];
        pages.extend(site.solutions.iter().map(|s| Page::Solution(s.slug.clone())));
        pages.extend([Page::Pricing, Page::Contact, Page::Prompts, Page::Roi]);
        Self {
            pages,
            redirects: site.redirects.clone(),
        }
    }

    /// Pages in navigation order
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Redirect rules
    pub fn redirects(&self) -> &[RedirectRule] {
        &self.redirects
    }

    /// Every renderable path, screen variants first, then print variants
    pub fn paths(&self) -> Vec<(String, Page, bool)> {
        let screen = self.pages.iter().map(|p| (p.path(), p.clone(), false));
        let print = self
            .pages
            .iter()
            .filter_map(|p| p.print_path().map(|path| (path, p.clone(), true)));
        screen.chain(print).collect()
    }

    /// Resolve a request path
    pub fn resolve(&self, path: &str) -> Resolution {
        let path = normalize_path(path);
        debug!(%path, "RouteTable::resolve: called");

        if let Some(rule) = self.redirects.iter().find(|r| normalize_path(&r.from) == path) {
            debug!(to = %rule.to, "RouteTable::resolve: matched redirect");
            return Resolution::Redirect(rule.to.clone());
        }

        let (print, screen_path) = match path.strip_prefix(PRINT_PREFIX) {
            Some("") => (true, "/"),
            Some(rest) if rest.starts_with('/') => (true, rest),
            _ => (false, path),
        };

        match self.pages.iter().find(|p| p.path() == screen_path) {
            Some(page) if !print || page.has_print_variant() => {
                debug!(?page, print, "RouteTable::resolve: matched page");
                Resolution::Page {
                    page: page.clone(),
                    print,
                }
            }
            _ => {
                debug!("RouteTable::resolve: no match");
                Resolution::NotFound
            }
        }
    }
}
