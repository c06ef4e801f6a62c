//! Embedded page templates
//!
//! These are compiled into the binary from .hbs files at build time.

use tracing::debug;

/// Page chrome shared by every page
pub const LAYOUT: &str = include_str!("../../templates/layout.hbs");

/// Table of contents partial
pub const TOC: &str = include_str!("../../templates/toc.hbs");

pub const HOME: &str = include_str!("../../templates/home.hbs");
pub const PITCH: &str = include_str!("../../templates/pitch.hbs");
pub const SOLUTION: &str = include_str!("../../templates/solution.hbs");
pub const PRICING: &str = include_str!("../../templates/pricing.hbs");
pub const CONTACT: &str = include_str!("../../templates/contact.hbs");
pub const PROMPTS: &str = include_str!("../../templates/prompts.hbs");
pub const ROI: &str = include_str!("../../templates/roi.hbs");
pub const NOT_FOUND: &str = include_str!("../../templates/not_found.hbs");

/// Every template name, in registration order
pub const TEMPLATE_NAMES: [&str; 10] = [
    "layout",
    "toc",
    "home",
    "pitch",
    "solution",
    "pricing",
    "contact",
    "prompts",
    "roi",
    "not_found",
];

/// Get the embedded template by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    let template = match name {
        "layout" => LAYOUT,
        "toc" => TOC,
        "home" => HOME,
        "pitch" => PITCH,
        "solution" => SOLUTION,
        "pricing" => PRICING,
        "contact" => CONTACT,
        "prompts" => PROMPTS,
        "roi" => ROI,
        "not_found" => NOT_FOUND,
        _ => {
            debug!("get_embedded: no match found");
            return None;
        }
    };
    Some(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_is_embedded() {
        for name in TEMPLATE_NAMES {
            assert!(get_embedded(name).is_some(), "missing template {}", name);
        }
    }

    #[test]
    fn test_layout_embeds_body_unescaped() {
        assert!(LAYOUT.contains("{{{body}}}"));
        assert!(LAYOUT.contains("{{> toc}}"));
    }

    #[test]
    fn test_get_embedded_unknown() {
        assert!(get_embedded("unknown-template").is_none());
    }
}
