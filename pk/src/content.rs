//! Site content
//!
//! All copy, pricing and redirect rules live in one YAML document compiled
//! into the binary. A replacement file can be configured; it is loaded once
//! at startup and never changes afterwards.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::roi::{RoiInputs, Tier};

/// Site content compiled into the binary
pub const EMBEDDED_SITE: &str = include_str!("../content/site.yml");

/// Errors loading site content
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to read content file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse site content: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid site content: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
    pub tagline: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    pub industry: String,
    pub city: String,
    pub owner: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Highlight {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Home {
    pub headline: String,
    pub subheadline: String,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

/// One phase of the rollout plan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub duration: String,
    pub summary: String,
    #[serde(default)]
    pub deliverables: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pitch {
    pub headline: String,
    pub summary: String,
    #[serde(default)]
    pub problems: Vec<String>,
    #[serde(default)]
    pub phases: Vec<Phase>,
}

/// A solution with its own page under `/solutions/{slug}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Solution {
    pub slug: String,
    pub title: String,
    pub tagline: String,
    pub summary: String,
    #[serde(default)]
    pub how_it_works: Vec<String>,
    #[serde(default)]
    pub outcomes: Vec<String>,
    /// Prompt channels this solution uses, linking to the prompt library
    #[serde(default)]
    pub channels: Vec<String>,
}

/// A priced package
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingTier {
    pub id: String,
    pub name: String,
    pub cost: f64,
    pub summary: String,
    #[serde(default)]
    pub highlight: bool,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pricing {
    pub intro: String,
    #[serde(default)]
    pub tiers: Vec<PricingTier>,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    pub headline: String,
    pub text: String,
    pub email: String,
    pub phone: String,
    pub hours: String,
}

/// A deprecated path and the path that replaced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRule {
    pub from: String,
    pub to: String,
}

/// The whole site's static content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteContent {
    pub brand: Brand,
    pub client: Client,
    pub home: Home,
    pub pitch: Pitch,
    #[serde(default)]
    pub solutions: Vec<Solution>,
    pub pricing: Pricing,
    pub contact: Contact,
    /// Starting values for the ROI calculator
    #[serde(default)]
    pub roi: RoiInputs,
    #[serde(default)]
    pub redirects: Vec<RedirectRule>,
}

impl SiteContent {
    /// Load the embedded content
    pub fn embedded() -> Result<Self, ContentError> {
        debug!("SiteContent::embedded: called");
        Self::from_yaml_str(EMBEDDED_SITE)
    }

    /// Load from `path` if given, otherwise the embedded content
    pub fn load_or_embedded(path: Option<&Path>) -> Result<Self, ContentError> {
        match path {
            Some(p) => {
                debug!(?p, "SiteContent::load_or_embedded: reading override");
                let content = std::fs::read_to_string(p)?;
                let site = Self::from_yaml_str(&content)?;
                info!("Loaded site content from {}", p.display());
                Ok(site)
            }
            None => Self::embedded(),
        }
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ContentError> {
        let site: Self = serde_yaml::from_str(yaml)?;
        site.validate()?;
        Ok(site)
    }

    fn validate(&self) -> Result<(), ContentError> {
        let mut slugs = HashSet::new();
        for solution in &self.solutions {
            let valid = !solution.slug.is_empty()
                && solution
                    .slug
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
            if !valid {
                return Err(ContentError::Invalid(format!("bad solution slug '{}'", solution.slug)));
            }
            if !slugs.insert(solution.slug.as_str()) {
                return Err(ContentError::Invalid(format!("duplicate solution slug '{}'", solution.slug)));
            }
        }

        let mut ids = HashSet::new();
        for tier in &self.pricing.tiers {
            if !ids.insert(tier.id.as_str()) {
                return Err(ContentError::Invalid(format!("duplicate pricing tier '{}'", tier.id)));
            }
            if tier.cost.is_nan() || tier.cost < 0.0 {
                return Err(ContentError::Invalid(format!("pricing tier '{}' has a negative cost", tier.id)));
            }
        }

        for rule in &self.redirects {
            if !rule.from.starts_with('/') || !rule.to.starts_with('/') {
                return Err(ContentError::Invalid(format!(
                    "redirect {} -> {} must use absolute paths",
                    rule.from, rule.to
                )));
            }
        }
        Ok(())
    }

    /// Look up a solution by slug
    pub fn solution(&self, slug: &str) -> Option<&Solution> {
        self.solutions.iter().find(|s| s.slug == slug)
    }

    /// Pricing tiers as ROI payback tiers
    pub fn tiers(&self) -> Vec<Tier> {
        self.pricing
            .tiers
            .iter()
            .map(|t| Tier::new(t.id.clone(), t.name.clone(), t.cost))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::default_tiers;

    #[test]
    fn test_embedded_content_loads() {
        let site = SiteContent::embedded().unwrap();
        assert_eq!(site.client.name, "Harbor Street Salon");
        assert_eq!(site.solutions.len(), 3);
        assert!(site.solution("no-show-recovery").is_some());
        assert!(site.solution("nope").is_none());
    }

    #[test]
    fn test_embedded_tiers_match_standard_lineup() {
        let site = SiteContent::embedded().unwrap();
        assert_eq!(site.tiers(), default_tiers());
    }

    #[test]
    fn test_embedded_roi_defaults() {
        let site = SiteContent::embedded().unwrap();
        assert_eq!(site.roi, RoiInputs::default());
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let yaml = r#"
brand: { name: B, tagline: T, email: e }
client: { name: C, industry: I, city: X, owner: O }
home: { headline: H, subheadline: S }
pitch: { headline: H, summary: S }
pricing: { intro: I }
contact: { headline: H, text: T, email: E, phone: P, hours: H }
solutions:
  - { slug: a, title: A, tagline: T, summary: S }
  - { slug: a, title: B, tagline: T, summary: S }
"#;
        let err = SiteContent::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate solution slug"));
    }

    #[test]
    fn test_relative_redirect_rejected() {
        let yaml = r#"
brand: { name: B, tagline: T, email: e }
client: { name: C, industry: I, city: X, owner: O }
home: { headline: H, subheadline: S }
pitch: { headline: H, summary: S }
pricing: { intro: I }
contact: { headline: H, text: T, email: E, phone: P, hours: H }
redirects:
  - { from: deck, to: /pitch }
"#;
        assert!(matches!(
            SiteContent::from_yaml_str(yaml).unwrap_err(),
            ContentError::Invalid(_)
        ));
    }

    #[test]
    fn test_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.yml");
        let yaml = EMBEDDED_SITE.replace("Harbor Street Salon", "Elm Street Dental");
        std::fs::write(&path, yaml).unwrap();

        let site = SiteContent::load_or_embedded(Some(&path)).unwrap();
        assert_eq!(site.client.name, "Elm Street Dental");
    }
}
