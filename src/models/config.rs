use crate::assets::AssetLoader;
use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Upstream matching service
    #[serde(default)]
    pub matcher: MatcherConfig,

    /// Analysis pacing and presentation
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Connection settings for the matching service
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MatcherConfig {
    /// Base URL, e.g. `http://127.0.0.1:5000`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl MatcherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Minimum wall time of an analysis request; 0 disables the delay
    #[serde(default = "default_min_duration")]
    pub min_duration_ms: u64,

    /// Consensus entries shown as medal cards
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_min_duration() -> u64 {
    1200
}

fn default_top_n() -> usize {
    match_insight::DEFAULT_TOP_N
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: default_min_duration(),
            top_n: default_top_n(),
        }
    }
}

impl AnalysisConfig {
    pub fn min_duration(&self) -> Duration {
        Duration::from_millis(self.min_duration_ms)
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        matcher = %config.matcher.base_url,
                        min_duration_ms = config.analysis.min_duration_ms,
                        top_n = config.analysis.top_n,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Replace the matcher URL when one is given (MATCHER_URL env var)
    pub fn with_matcher_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!(%url, "Matcher URL overridden");
            self.matcher.base_url = url;
        }
        self
    }
}
