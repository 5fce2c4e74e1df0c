use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

const ENV_CONFIG_PATH: &str = "LEGALENZ_CONFIG_PATH";
const ENV_BASE_URL: &str = "LEGALENZ_BASE_URL";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Per-endpoint request timeouts, in seconds. Analysis dominates because the
/// backend extracts and summarizes the whole document in one call.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_analyze_secs")]
    pub analyze_secs: u64,
    #[serde(default = "default_highlights_secs")]
    pub highlights_secs: u64,
    #[serde(default = "default_ask_secs")]
    pub ask_secs: u64,
}

fn default_analyze_secs() -> u64 {
    180
}

fn default_highlights_secs() -> u64 {
    45
}

fn default_ask_secs() -> u64 {
    30
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            analyze_secs: default_analyze_secs(),
            highlights_secs: default_highlights_secs(),
            ask_secs: default_ask_secs(),
        }
    }
}

impl TimeoutConfig {
    pub fn analyze(&self) -> Duration {
        Duration::from_secs(self.analyze_secs)
    }

    pub fn highlights(&self) -> Duration {
        Duration::from_secs(self.highlights_secs)
    }

    pub fn ask(&self) -> Duration {
        Duration::from_secs(self.ask_secs)
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub base_url: Option<Url>,
    #[serde(default)]
    pub timeouts: Option<TimeoutConfig>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub timeouts: TimeoutConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file.
    ///
    /// `LEGALENZ_BASE_URL` wins over the config file, which wins over the
    /// built-in default.
    pub fn from_env() -> Self {
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let file = Self::load_config_file(&config_path).unwrap_or_default();

        let base_url = std::env::var(ENV_BASE_URL)
            .ok()
            .and_then(|raw| match Url::parse(&raw) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "Ignoring invalid LEGALENZ_BASE_URL");
                    None
                }
            })
            .or(file.base_url)
            .unwrap_or_else(|| Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"));

        Self {
            base_url,
            timeouts: file.timeouts.unwrap_or_default(),
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }
}
