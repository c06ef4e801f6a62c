//! PitchKit configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main PitchKit configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Analytics delivery configuration
    pub analytics: AnalyticsConfig,

    /// Content override configuration
    pub content: ContentConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .pitchkit.yml
        let local_config = PathBuf::from(".pitchkit.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/pitchkit/pitchkit.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("pitchkit").join("pitchkit.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is initialized
    ///
    /// Errors are swallowed; the full load reports them later.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates: Vec<PathBuf> = match config_path {
            Some(p) => vec![p.clone()],
            None => [
                Some(PathBuf::from(".pitchkit.yml")),
                dirs::config_dir().map(|d| d.join("pitchkit").join("pitchkit.yml")),
            ]
            .into_iter()
            .flatten()
            .collect(),
        };

        candidates
            .iter()
            .filter(|p| p.exists())
            .find_map(|p| Self::load_from_file(p).ok())
            .and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Analytics delivery configuration
///
/// Events are dropped silently when no endpoint is configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Collector URL receiving JSON event posts
    pub endpoint: Option<String>,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Source name attached to every event
    pub source: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: 2_000,
            source: "pitchkit".to_string(),
        }
    }
}

impl AnalyticsConfig {
    /// Whether an endpoint is configured
    pub fn is_enabled(&self) -> bool {
        self.endpoint.as_deref().is_some_and(|e| !e.trim().is_empty())
    }
}

/// Content override configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Site content YAML to use instead of the embedded one
    #[serde(rename = "site-file")]
    pub site_file: Option<PathBuf>,

    /// Prompt library YAML to use instead of the embedded one
    #[serde(rename = "prompts-file")]
    pub prompts_file: Option<PathBuf>,

    /// Directory with `{name}.hbs` files overriding embedded templates
    #[serde(rename = "templates-dir")]
    pub templates_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert!(!config.analytics.is_enabled());
        assert_eq!(config.analytics.timeout_ms, 2_000);
        assert!(config.content.site_file.is_none());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
log-level: debug

server:
  bind: 0.0.0.0:8080

analytics:
  endpoint: https://collector.example.com/events
  timeout-ms: 500
  source: harbor-pitch

content:
  templates-dir: ./templates
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert!(config.analytics.is_enabled());
        assert_eq!(config.analytics.timeout_ms, 500);
        assert_eq!(config.analytics.source, "harbor-pitch");
        assert_eq!(config.content.templates_dir, Some(PathBuf::from("./templates")));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
analytics:
  endpoint: "  "
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Blank endpoint counts as unconfigured
        assert!(!config.analytics.is_enabled());
        assert_eq!(config.analytics.source, "pitchkit");
        assert_eq!(config.server.bind, "127.0.0.1:3000");
    }

    #[test]
    fn test_load_log_level_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pitchkit.yml");
        std::fs::write(&path, "log-level: WARN\n").unwrap();

        assert_eq!(Config::load_log_level(Some(&path)).as_deref(), Some("WARN"));
        assert!(Config::load(Some(&path)).is_ok());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = PathBuf::from("/no/such/pitchkit.yml");
        assert!(Config::load(Some(&path)).is_err());
        assert!(Config::load_log_level(Some(&path)).is_none());
    }
}
