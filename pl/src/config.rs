//! Configuration for promptlib

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Prompt dataset to use instead of the embedded one
    #[serde(default, rename = "library-path")]
    pub library_path: Option<PathBuf>,

    /// Title for exported documents
    #[serde(default = "default_export_title", rename = "export-title")]
    pub export_title: String,
}

fn default_export_title() -> String {
    crate::DEFAULT_EXPORT_TITLE.to_string()
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            return Ok(config);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("promptlib").join("config.yml")),
            Some(PathBuf::from("promptlib.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Config {
            export_title: default_export_title(),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("promptlib.yml");
        std::fs::write(&path, "library-path: /tmp/prompts.yml\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.library_path, Some(PathBuf::from("/tmp/prompts.yml")));
        assert_eq!(config.export_title, "Prompt Library");
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let path = PathBuf::from("/definitely/not/here.yml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
