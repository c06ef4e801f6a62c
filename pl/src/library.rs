//! Prompt library loading
//!
//! The library is loaded once, validated and never mutated afterwards.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::entry::PromptEntry;
use crate::error::{LibraryError, Result};
use crate::filter::{Category, FilterState, filter_entries};

/// Prompt dataset compiled into the binary
pub const EMBEDDED_LIBRARY: &str = include_str!("../data/prompts.yml");

/// The full, immutable prompt collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptLibrary {
    /// Category definitions used by the category filter
    #[serde(default)]
    categories: Vec<Category>,

    /// Prompt entries in display order
    #[serde(default)]
    prompts: Vec<PromptEntry>,
}

impl PromptLibrary {
    /// Load the embedded dataset
    pub fn embedded() -> Result<Self> {
        debug!("PromptLibrary::embedded: called");
        Self::from_yaml_str(EMBEDDED_LIBRARY)
    }

    /// Load a dataset from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(?path, "PromptLibrary::load: called");
        let content = std::fs::read_to_string(path)?;
        let library = Self::from_yaml_str(&content)?;
        info!("Loaded {} prompts from {}", library.len(), path.display());
        Ok(library)
    }

    /// Load from `path` if given, otherwise the embedded dataset
    pub fn load_or_embedded(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::embedded(),
        }
    }

    /// Parse and validate a YAML dataset
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let library: Self = serde_yaml::from_str(yaml)?;
        library.validate()?;
        debug!(
            prompts = library.prompts.len(),
            categories = library.categories.len(),
            "PromptLibrary::from_yaml_str: parsed"
        );
        Ok(library)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (i, entry) in self.prompts.iter().enumerate() {
            if entry.id.trim().is_empty() {
                return Err(LibraryError::EmptyId(i));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(LibraryError::DuplicateId(entry.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.id.as_str()) {
                return Err(LibraryError::DuplicateCategory(category.id.clone()));
            }
        }
        Ok(())
    }

    /// All entries in order
    pub fn entries(&self) -> &[PromptEntry] {
        &self.prompts
    }

    /// Category definitions
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Whether the library has no entries
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Look up an entry by id
    pub fn get(&self, id: &str) -> Option<&PromptEntry> {
        self.prompts.iter().find(|e| e.id == id)
    }

    /// Look up a category by id
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Every channel and tag in use, sorted
    pub fn facets(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.prompts.iter().flat_map(|e| e.facets()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Entries visible under `state`, in library order
    pub fn filter(&self, state: &FilterState) -> Vec<&PromptEntry> {
        filter_entries(&self.prompts, &self.categories, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_library_loads() {
        let library = PromptLibrary::embedded().unwrap();
        assert!(library.len() >= 10);
        assert!(library.get("sms-reminder-24h").is_some());
        assert!(library.category("recovery").is_some());
    }

    #[test]
    fn test_embedded_placeholders_are_declared() {
        // Every declared variable appears in its body
        let library = PromptLibrary::embedded().unwrap();
        for entry in library.entries() {
            let found = crate::render::placeholders(&entry.body);
            for var in &entry.variables {
                assert!(found.contains(var), "{} declares missing variable {}", entry.id, var);
            }
        }
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let yaml = r#"
prompts:
  - { id: a, title: A, body: x, channel: sms }
  - { id: a, title: B, body: y, channel: email }
"#;
        let err = PromptLibrary::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, LibraryError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn test_empty_id_rejected() {
        let yaml = r#"
prompts:
  - { id: "", title: A, body: x, channel: sms }
"#;
        assert!(matches!(
            PromptLibrary::from_yaml_str(yaml).unwrap_err(),
            LibraryError::EmptyId(0)
        ));
    }

    #[test]
    fn test_unknown_channel_is_parse_error() {
        let yaml = r#"
prompts:
  - { id: a, title: A, body: x, channel: fax }
"#;
        assert!(matches!(
            PromptLibrary::from_yaml_str(yaml).unwrap_err(),
            LibraryError::Parse(_)
        ));
    }

    #[test]
    fn test_facets_sorted_and_unique() {
        let library = PromptLibrary::embedded().unwrap();
        let facets = library.facets();
        let mut sorted = facets.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(facets, sorted);
        assert!(facets.contains(&"sms".to_string()));
        assert!(facets.contains(&"owner-report".to_string()));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts.yml");
        std::fs::write(&path, "prompts:\n  - { id: only, title: Only, body: text, channel: sheet }\n").unwrap();
        let library = PromptLibrary::load_or_embedded(Some(&path)).unwrap();
        assert_eq!(library.len(), 1);
        assert!(library.categories().is_empty());
    }

    #[test]
    fn test_filter_unique_title_in_embedded() {
        let library = PromptLibrary::embedded().unwrap();
        let mut state = FilterState::new();
        state.set_search("gap filler");
        let visible = library.filter(&state);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "sms-waitlist-fill");
    }
}
