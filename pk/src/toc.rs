//! Table of contents and scroll-spy
//!
//! The outline is built on the server from the rendered page body. The
//! browser side (`assets/toc.js`) watches the same headings with an
//! IntersectionObserver using [`ROOT_MARGIN`] and highlights the entry whose
//! heading last entered the activation band.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

/// Observer root margin: the band from 20% below the top to 20% above the bottom
pub const ROOT_MARGIN: &str = "-20% 0px -20% 0px";

/// Fraction of the viewport excluded at the top and at the bottom
pub const BAND_INSET: f64 = 0.2;

/// Horizontal indent per heading level, in rem
pub const INDENT_STEP_REM: f64 = 0.75;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h([1-6])(\s[^>]*)?>(.*?)</h[1-6]\s*>").expect("valid heading regex"));

static ID_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)(?:^|\s)id\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid id regex"));

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// One outline entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocEntry {
    /// Heading element id, the scroll target
    pub id: String,
    /// Heading text with markup removed, still HTML-escaped as in the body
    pub text: String,
    /// Heading level, 1-6
    pub level: u8,
    /// Depth below the shallowest heading in the outline
    pub depth: u8,
    /// Left indent in rem
    pub indent_rem: f64,
    /// Whether this entry starts highlighted
    pub active: bool,
}

/// Outline headings that carry an id, in document order
pub fn extract_headings(html: &str) -> Vec<TocEntry> {
    let mut entries: Vec<TocEntry> = HEADING
        .captures_iter(html)
        .filter_map(|cap| {
            let level: u8 = cap[1].parse().ok()?;
            let attrs = cap.get(2).map(|m| m.as_str()).unwrap_or("");
            let id_cap = ID_ATTR.captures(attrs)?;
            let id = id_cap.get(1).or_else(|| id_cap.get(2))?.as_str().trim().to_string();
            if id.is_empty() {
                return None;
            }
            let text = TAG.replace_all(&cap[3], "");
            let text = SPACE.replace_all(text.trim(), " ").into_owned();
            Some(TocEntry {
                id,
                text,
                level,
                depth: 0,
                indent_rem: 0.0,
                active: false,
            })
        })
        .collect();

    if let Some(min) = entries.iter().map(|e| e.level).min() {
        for entry in &mut entries {
            entry.depth = entry.level - min;
            entry.indent_rem = f64::from(entry.depth) * INDENT_STEP_REM;
        }
    }

    let spy = ScrollSpy::new(entries.iter().map(|e| e.id.clone()).collect());
    if let Some(active) = spy.active() {
        for entry in &mut entries {
            entry.active = entry.id == active;
        }
    }

    debug!(count = entries.len(), "extract_headings: done");
    entries
}

/// Whether an element whose top edge sits at `top` (pixels from the viewport
/// top) is inside the activation band of a viewport `viewport_height` tall
pub fn in_activation_band(top: f64, viewport_height: f64) -> bool {
    let upper = viewport_height * BAND_INSET;
    let lower = viewport_height * (1.0 - BAND_INSET);
    top >= upper && top <= lower
}

/// Tracks which outline entry is highlighted
///
/// The last heading reported as intersecting wins. Headings leaving the band
/// do not clear the highlight, so fast scrolling may skip entries.
#[derive(Debug, Clone, Default)]
pub struct ScrollSpy {
    ids: Vec<String>,
    active: Option<String>,
}

impl ScrollSpy {
    /// Start with the first heading active
    pub fn new(ids: Vec<String>) -> Self {
        let active = ids.first().cloned();
        Self { ids, active }
    }

    /// Currently highlighted id
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Record an intersection callback for `id`
    ///
    /// Returns true when the highlight moved.
    pub fn observe(&mut self, id: &str, intersecting: bool) -> bool {
        if !intersecting || !self.ids.iter().any(|i| i == id) {
            return false;
        }
        if self.active.as_deref() == Some(id) {
            return false;
        }
        debug!(%id, "ScrollSpy::observe: activating");
        self.active = Some(id.to_string());
        true
    }
}
