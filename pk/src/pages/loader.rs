//! Page renderer
//!
//! Loads page templates from an override directory or falls back to the
//! embedded defaults, then renders pages in two steps: the page body first,
//! so its headings can be outlined, then the layout around it.

use std::borrow::Cow;
use std::path::Path;

use handlebars::{Handlebars, handlebars_helper};
use serde::Serialize;
use tracing::{debug, info};

use super::context::{BodyContext, LayoutContext, NavItem, PageParams, PromptsView, RoiView, nav_items};
use super::embedded::{self, TEMPLATE_NAMES};
use crate::error::SiteError;
use crate::roi::format_currency;
use crate::routes::Page;
use crate::site::Site;
use crate::toc::extract_headings;

handlebars_helper!(currency: |amount: f64| format_currency(amount.round() as i64));

/// Loads and renders page templates
pub struct PageRenderer {
    hbs: Handlebars<'static>,
}

impl std::fmt::Debug for PageRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRenderer")
            .field("templates", &self.hbs.get_templates().len())
            .finish()
    }
}

impl PageRenderer {
    /// Create a renderer, preferring `{name}.hbs` files from `templates_dir`
    pub fn new(templates_dir: Option<&Path>) -> Result<Self, SiteError> {
        debug!(?templates_dir, "PageRenderer::new: called");
        let mut hbs = Handlebars::new();
        hbs.register_helper("currency", Box::new(currency));

        for name in TEMPLATE_NAMES {
            let source = Self::load_template(templates_dir, name)?;
            hbs.register_template_string(name, source)?;
        }
        Ok(Self { hbs })
    }

    /// Create a renderer that only uses embedded templates
    pub fn embedded_only() -> Result<Self, SiteError> {
        debug!("PageRenderer::embedded_only: called");
        Self::new(None)
    }

    fn load_template(templates_dir: Option<&Path>, name: &str) -> Result<Cow<'static, str>, SiteError> {
        debug!(%name, "PageRenderer::load_template: called");
        if let Some(dir) = templates_dir {
            let path = dir.join(format!("{}.hbs", name));
            if path.exists() {
                info!("Using template override {}", path.display());
                return std::fs::read_to_string(&path)
                    .map(Cow::Owned)
                    .map_err(|source| SiteError::TemplateIo { path, source });
            }
            debug!(?path, "PageRenderer::load_template: not found in override directory");
        }

        embedded::get_embedded(name)
            .map(Cow::Borrowed)
            .ok_or_else(|| SiteError::NotFound(format!("template {}", name)))
    }

    /// Render a page or its print variant
    pub fn render_page(&self, site: &Site, page: &Page, print: bool, params: &PageParams) -> Result<String, SiteError> {
        debug!(%page, print, "PageRenderer::render_page: called");
        let content = &site.content;

        let solution = match page {
            Page::Solution(slug) => Some(
                content
                    .solution(slug)
                    .ok_or_else(|| SiteError::NotFound(format!("solution {}", slug)))?,
            ),
            _ => None,
        };

        let prompts = matches!(page, Page::Prompts).then(|| PromptsView::build(&site.library, &params.filter));
        let roi = match page {
            Page::Roi => Some(params.roi.unwrap_or(content.roi)),
            Page::Home | Page::Pricing => Some(content.roi),
            _ => None,
        }
        .map(|inputs| RoiView::build(&inputs.clamped(), &site.tiers()));

        let body_ctx = BodyContext {
            site: content,
            print,
            path: page.path(),
            solution,
            prompts,
            roi,
        };
        let body = self.hbs.render(page.template_name(), &body_ctx)?;

        let title = match (page, solution) {
            (Page::Home, _) => format!("A plan for {}", content.client.name),
            (Page::Pitch, _) => content.pitch.headline.clone(),
            (_, Some(s)) => s.title.clone(),
            _ => page.nav_label().to_string(),
        };
        let scripts = match page {
            Page::Prompts => vec!["prompts.js"],
            Page::Roi => vec!["roi.js"],
            _ => Vec::new(),
        };

        self.render_layout(site, page, title, body, print, scripts)
    }

    /// Render the not-found page for `path`
    pub fn render_not_found(&self, site: &Site, path: &str) -> Result<String, SiteError> {
        debug!(%path, "PageRenderer::render_not_found: called");
        #[derive(Serialize)]
        struct NotFoundContext<'a> {
            path: &'a str,
            pages: Vec<NavItem>,
        }
        let body = self.hbs.render(
            "not_found",
            &NotFoundContext {
                path,
                pages: nav_items(&site.routes, None),
            },
        )?;
        let layout = LayoutContext {
            title: "Page not found".to_string(),
            brand: &site.content.brand,
            client_name: &site.content.client.name,
            nav: nav_items(&site.routes, None),
            toc: Vec::new(),
            body,
            print: false,
            screen_path: path.to_string(),
            print_path: None,
            scripts: Vec::new(),
        };
        Ok(self.hbs.render("layout", &layout)?)
    }

    fn render_layout(
        &self,
        site: &Site,
        page: &Page,
        title: String,
        body: String,
        print: bool,
        scripts: Vec<&'static str>,
    ) -> Result<String, SiteError> {
        let toc = extract_headings(&body);
        let layout = LayoutContext {
            title,
            brand: &site.content.brand,
            client_name: &site.content.client.name,
            nav: nav_items(&site.routes, Some(page)),
            body,
            toc,
            print,
            screen_path: page.path(),
            print_path: page.print_path(),
            scripts,
        };
        Ok(self.hbs.render("layout", &layout)?)
    }
}
