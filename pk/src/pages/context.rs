//! View models handed to the page templates

use promptlib::render::render;
use promptlib::{FilterState, PromptEntry, PromptLibrary, RenderOptions, RenderedPrompt};
use serde::Serialize;
use tracing::debug;

use crate::content::{Brand, SiteContent, Solution};
use crate::roi::{RoiInputs, Tier, calculate_roi, format_currency};
use crate::routes::{Page, RouteTable};
use crate::toc::TocEntry;

/// Per-request inputs that change what a page shows
#[derive(Debug, Clone, Default)]
pub struct PageParams {
    /// Prompt library filter
    pub filter: FilterState,
    /// Calculator inputs; the site's starting values when absent
    pub roi: Option<RoiInputs>,
}

/// One link in the site navigation
#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: String,
    pub current: bool,
}

/// Top-level navigation; solution pages are reached from the pitch and home pages
pub fn nav_items(routes: &RouteTable, current: Option<&Page>) -> Vec<NavItem> {
    routes
        .pages()
        .iter()
        .filter(|p| !matches!(p, Page::Solution(_)))
        .map(|p| NavItem {
            label: p.nav_label(),
            path: p.path(),
            current: current == Some(p),
        })
        .collect()
}

/// Context for the shared layout
#[derive(Debug, Serialize)]
pub struct LayoutContext<'a> {
    pub title: String,
    pub brand: &'a Brand,
    pub client_name: &'a str,
    pub nav: Vec<NavItem>,
    pub body: String,
    pub toc: Vec<TocEntry>,
    pub print: bool,
    pub screen_path: String,
    pub print_path: Option<String>,
    /// Page scripts under `/assets`
    pub scripts: Vec<&'static str>,
}

/// Context for a page body template
#[derive(Debug, Serialize)]
pub struct BodyContext<'a> {
    pub site: &'a SiteContent,
    pub print: bool,
    pub path: String,
    pub solution: Option<&'a Solution>,
    pub prompts: Option<PromptsView>,
    pub roi: Option<RoiView>,
}

/// A selectable tag or category
#[derive(Debug, Clone, Serialize)]
pub struct Chip {
    pub id: String,
    pub label: String,
    pub active: bool,
    /// Space-separated filter set, for categories
    pub filters: String,
}

/// A rendered prompt card
#[derive(Debug, Clone, Serialize)]
pub struct PromptCard {
    pub id: String,
    pub title: String,
    pub channel: &'static str,
    pub channel_label: &'static str,
    pub tags: Vec<String>,
    pub facets: String,
    pub variables: Vec<String>,
    /// Whether the entry passes the current filter
    pub visible: bool,
    #[serde(flatten)]
    pub rendered: RenderedPrompt,
}

impl PromptCard {
    fn new(entry: &PromptEntry, visible: bool) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            channel: entry.channel.as_str(),
            channel_label: entry.channel.label(),
            tags: entry.tags.clone(),
            facets: entry.facets().collect::<Vec<_>>().join(" "),
            variables: entry.variables.clone(),
            visible,
            rendered: render(entry, &RenderOptions::default()),
        }
    }
}

/// The prompt library page
///
/// Every card is present so the client script can refilter without a
/// round trip; cards failing the request's filter are marked hidden.
#[derive(Debug, Clone, Serialize)]
pub struct PromptsView {
    pub search: String,
    pub tags: Vec<Chip>,
    pub categories: Vec<Chip>,
    pub cards: Vec<PromptCard>,
    pub total: usize,
    pub shown: usize,
    pub filtered: bool,
    pub opt_out_suffix: &'static str,
}

impl PromptsView {
    pub fn build(library: &PromptLibrary, state: &FilterState) -> Self {
        debug!(?state, "PromptsView::build: called");
        let matching: Vec<&str> = library.filter(state).into_iter().map(|e| e.id.as_str()).collect();
        let cards: Vec<PromptCard> = library
            .entries()
            .iter()
            .map(|e| PromptCard::new(e, matching.contains(&e.id.as_str())))
            .collect();

        let tags = library
            .facets()
            .into_iter()
            .map(|facet| Chip {
                active: state.active_tags.contains(&facet),
                label: facet.clone(),
                id: facet,
                filters: String::new(),
            })
            .collect();

        let categories = library
            .categories()
            .iter()
            .map(|c| Chip {
                id: c.id.clone(),
                label: c.label.clone(),
                active: state.active_category.as_deref() == Some(c.id.as_str()),
                filters: c.filters.iter().cloned().collect::<Vec<_>>().join(" "),
            })
            .collect();

        Self {
            search: state.search_text.clone(),
            tags,
            categories,
            total: cards.len(),
            shown: matching.len(),
            cards,
            filtered: !state.is_empty(),
            opt_out_suffix: promptlib::OPT_OUT_SUFFIX,
        }
    }
}

/// Payback row for one tier
#[derive(Debug, Clone, Serialize)]
pub struct TierRow {
    pub id: String,
    pub name: String,
    pub cost: String,
    pub payback: String,
    pub infinite: bool,
}

/// ROI figures formatted for display
#[derive(Debug, Clone, Serialize)]
pub struct RoiView {
    pub inputs: RoiInputs,
    pub no_shows_per_month: i64,
    pub recovered_bookings: String,
    pub recovered_revenue: String,
    pub tiers: Vec<TierRow>,
}

impl RoiView {
    pub fn build(inputs: &RoiInputs, tiers: &[Tier]) -> Self {
        let result = calculate_roi(inputs, tiers);
        let rows = tiers
            .iter()
            .zip(&result.payback)
            .map(|(tier, p)| TierRow {
                id: tier.id.clone(),
                name: tier.name.clone(),
                cost: format_currency(tier.cost.round() as i64),
                payback: p.months.to_string(),
                infinite: p.months.is_infinite(),
            })
            .collect();

        Self {
            inputs: *inputs,
            no_shows_per_month: result.no_shows_per_month,
            recovered_bookings: format!("{:.1}", result.recovered_bookings),
            recovered_revenue: format_currency(result.recovered_revenue),
            tiers: rows,
        }
    }
}
