//! Prompt filtering
//!
//! A [`FilterState`] combines three independent filters with logical AND:
//! search text, active tags and an optional category. Filtering never
//! reorders entries.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::PromptEntry;

/// A named group of facets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Identifier used in URLs
    pub id: String,

    /// Display label
    pub label: String,

    /// Channels or tags belonging to this category
    #[serde(default)]
    pub filters: BTreeSet<String>,
}

impl Category {
    /// Whether the category's filter set intersects the entry's channel and tags
    pub fn matches(&self, entry: &PromptEntry) -> bool {
        entry.facets().any(|f| self.filters.contains(f))
    }
}

/// Current search and filter selection of the prompt library view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Free text search
    #[serde(default)]
    pub search_text: String,

    /// Selected tags or channels
    #[serde(default)]
    pub active_tags: BTreeSet<String>,

    /// Selected category id
    #[serde(default)]
    pub active_category: Option<String>,
}

impl FilterState {
    /// Create an empty filter state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no filter is active
    pub fn is_empty(&self) -> bool {
        self.search_text.trim().is_empty() && self.active_tags.is_empty() && self.active_category.is_none()
    }

    /// Replace the search text
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Add the tag if absent, remove it if present
    ///
    /// Returns true when the tag is active afterwards.
    pub fn toggle_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        debug!(%tag, "FilterState::toggle_tag: called");
        if self.active_tags.remove(&tag) {
            false
        } else {
            self.active_tags.insert(tag);
            true
        }
    }

    /// Select a category, or clear it with `None`
    pub fn set_category(&mut self, category: Option<String>) {
        self.active_category = category.filter(|c| !c.trim().is_empty());
    }

    /// Clear every filter
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check a single entry against this state
    ///
    /// `needle` is the lowercased, trimmed search text and `category` the
    /// resolved active category.
    fn passes(&self, entry: &PromptEntry, needle: &str, category: Option<&Category>) -> bool {
        let text_ok = entry.matches_text(needle);
        let tags_ok = self.active_tags.is_empty() || entry.facets().any(|f| self.active_tags.contains(f));
        let category_ok = category.is_none_or(|c| c.matches(entry));
        text_ok && tags_ok && category_ok
    }
}

/// Return the entries that pass `state`, preserving their order
///
/// An unknown category id is ignored.
pub fn filter_entries<'a>(
    entries: &'a [PromptEntry],
    categories: &[Category],
    state: &FilterState,
) -> Vec<&'a PromptEntry> {
    debug!(?state, total = entries.len(), "filter_entries: called");
    let needle = state.search_text.trim().to_lowercase();
    let category = match state.active_category.as_deref() {
        Some(id) => {
            let found = categories.iter().find(|c| c.id == id);
            if found.is_none() {
                debug!(%id, "filter_entries: unknown category, ignoring");
            }
            found
        }
        None => None,
    };

    let visible: Vec<&PromptEntry> = entries
        .iter()
        .filter(|e| state.passes(e, &needle, category))
        .collect();
    debug!(visible = visible.len(), "filter_entries: done");
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Channel;
    use proptest::prelude::*;

    fn entry(id: &str, title: &str, channel: Channel, tags: &[&str]) -> PromptEntry {
        PromptEntry {
            id: id.to_string(),
            title: title.to_string(),
            body: format!("Body of {}", title),
            channel,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            max_chars: None,
            variables: vec![],
        }
    }

    fn fixture() -> (Vec<PromptEntry>, Vec<Category>) {
        let entries = vec![
            entry("a", "Morning reminder", Channel::Sms, &["reminder"]),
            entry("b", "Missed visit email", Channel::Email, &["no-show", "rebook"]),
            entry("c", "Weekly snapshot", Channel::OwnerReport, &["summary"]),
            entry("d", "Review nudge", Channel::Sms, &["review"]),
            entry("e", "Tracking tab", Channel::Sheet, &["no-show"]),
        ];
        let categories = vec![
            Category {
                id: "recovery".to_string(),
                label: "Recovery".to_string(),
                filters: ["no-show", "rebook"].iter().map(|s| s.to_string()).collect(),
            },
            Category {
                id: "reporting".to_string(),
                label: "Reporting".to_string(),
                filters: ["sheet", "owner-report"].iter().map(|s| s.to_string()).collect(),
            },
        ];
        (entries, categories)
    }

    fn ids(visible: &[&PromptEntry]) -> Vec<String> {
        visible.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_empty_state_passes_everything() {
        let (entries, categories) = fixture();
        let visible = filter_entries(&entries, &categories, &FilterState::new());
        assert_eq!(ids(&visible), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_unique_title_substring_returns_one() {
        let (entries, categories) = fixture();
        let mut state = FilterState::new();
        state.set_search("SNAPSHOT");
        let visible = filter_entries(&entries, &categories, &state);
        assert_eq!(ids(&visible), vec!["c"]);
    }

    #[test]
    fn test_search_matches_tags() {
        let (entries, categories) = fixture();
        let mut state = FilterState::new();
        state.set_search("rebook");
        assert_eq!(ids(&filter_entries(&entries, &categories, &state)), vec!["b"]);
    }

    #[test]
    fn test_tag_filter_matches_channel_or_tag() {
        let (entries, categories) = fixture();
        let mut state = FilterState::new();
        state.toggle_tag("sms");
        assert_eq!(ids(&filter_entries(&entries, &categories, &state)), vec!["a", "d"]);

        state.toggle_tag("no-show");
        assert_eq!(ids(&filter_entries(&entries, &categories, &state)), vec!["a", "b", "d", "e"]);
    }

    #[test]
    fn test_category_filter_intersects_facets() {
        let (entries, categories) = fixture();
        let mut state = FilterState::new();
        state.set_category(Some("reporting".to_string()));
        assert_eq!(ids(&filter_entries(&entries, &categories, &state)), vec!["c", "e"]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let (entries, categories) = fixture();
        let mut state = FilterState::new();
        state.set_category(Some("recovery".to_string()));
        state.toggle_tag("sheet");
        assert_eq!(ids(&filter_entries(&entries, &categories, &state)), vec!["e"]);

        state.set_search("email");
        assert!(filter_entries(&entries, &categories, &state).is_empty());
    }

    #[test]
    fn test_unknown_category_is_ignored() {
        let (entries, categories) = fixture();
        let mut state = FilterState::new();
        state.set_category(Some("does-not-exist".to_string()));
        assert_eq!(filter_entries(&entries, &categories, &state).len(), entries.len());
    }

    #[test]
    fn test_toggle_on_then_off_restores_state() {
        let (entries, categories) = fixture();
        let mut state = FilterState::new();
        assert!(state.toggle_tag("review"));
        assert_eq!(ids(&filter_entries(&entries, &categories, &state)), vec!["d"]);
        assert!(!state.toggle_tag("review"));
        assert_eq!(state, FilterState::new());
        assert_eq!(filter_entries(&entries, &categories, &state).len(), entries.len());
    }

    #[test]
    fn test_blank_category_clears_selection() {
        let mut state = FilterState::new();
        state.set_category(Some("  ".to_string()));
        assert!(state.active_category.is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = FilterState::new();
        state.set_search("abc");
        state.toggle_tag("sms");
        state.set_category(Some("recovery".to_string()));
        assert!(!state.is_empty());
        state.reset();
        assert!(state.is_empty());
    }

    proptest! {
        #[test]
        fn prop_filter_preserves_relative_order(search in "[a-z ]{0,4}", tag_mask in 0u8..32) {
            let (entries, categories) = fixture();
            let tags = ["sms", "email", "no-show", "review", "summary"];
            let mut state = FilterState::new();
            state.set_search(search);
            for (i, tag) in tags.iter().enumerate() {
                if tag_mask & (1 << i) != 0 {
                    state.toggle_tag(*tag);
                }
            }
            let visible = filter_entries(&entries, &categories, &state);
            let positions: Vec<usize> = visible
                .iter()
                .map(|v| entries.iter().position(|e| e.id == v.id).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
