//! Briefing configuration.
//!
//! There are no flags and no config file. Defaults are compiled in and the
//! only environment input is the optional `OPENAI_API_KEY` credential, which
//! enables the language-generation renderer.

use serde::{Deserialize, Serialize};

/// Location used when the caller leaves it blank.
pub const DEFAULT_LOCATION: &str = "San Francisco";

/// Topic used when the caller leaves it blank.
pub const DEFAULT_TOPIC: &str = "technology";

/// Number of headlines gathered per briefing.
pub const DEFAULT_NEWS_COUNT: usize = 3;

/// Environment variable holding the optional backend credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Top-level configuration for a [`BriefingController`](crate::BriefingController).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BriefingConfig {
    /// Location substituted for blank input.
    pub default_location: String,
    /// News topic substituted for blank input.
    pub default_topic: String,
    /// Headlines per briefing (at least 1).
    pub news_count: usize,
    /// Language-generation backend; `None` renders with templates only.
    pub llm: Option<LlmConfig>,
}

impl Default for BriefingConfig {
    fn default() -> Self {
        Self {
            default_location: DEFAULT_LOCATION.to_string(),
            default_topic: DEFAULT_TOPIC.to_string(),
            news_count: DEFAULT_NEWS_COUNT,
            llm: None,
        }
    }
}

impl BriefingConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration, with the LLM renderer enabled when
    /// `OPENAI_API_KEY` is set and non-empty.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self::default().with_api_key(api_key)
    }

    /// Enable the LLM renderer with the given key, or disable it with `None`.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.llm = api_key.map(|key| LlmConfig {
            api_key: Some(key),
            ..LlmConfig::default()
        });
        self
    }

    /// Set the headline count (clamped to at least 1).
    pub fn with_news_count(mut self, count: usize) -> Self {
        self.news_count = count.max(1);
        self
    }
}

/// Settings for the OpenAI-compatible chat completions backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier.
    pub model: String,
    /// Bearer credential. Never serialized.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL of the API, without a trailing slash.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Sampling temperature.
    pub temperature: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 30,
            temperature: 0.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BriefingConfig::new();
        assert_eq!(config.default_location, "San Francisco");
        assert_eq!(config.default_topic, "technology");
        assert_eq!(config.news_count, 3);
        assert!(config.llm.is_none());
    }

    #[test]
    fn test_with_api_key_enables_llm() {
        let config = BriefingConfig::new().with_api_key(Some("sk-test".into()));
        let llm = config.llm.unwrap();
        assert_eq!(llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(llm.model, "gpt-4o-mini");

        let config = BriefingConfig::new().with_api_key(None);
        assert!(config.llm.is_none());
    }

    #[test]
    fn test_news_count_clamped() {
        assert_eq!(BriefingConfig::new().with_news_count(0).news_count, 1);
        assert_eq!(BriefingConfig::new().with_news_count(5).news_count, 5);
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = BriefingConfig::new().with_api_key(Some("sk-secret".into()));
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: BriefingConfig =
            serde_json::from_str(r#"{"default_topic": "world"}"#).unwrap();
        assert_eq!(config.default_topic, "world");
        assert_eq!(config.default_location, "San Francisco");
        assert_eq!(config.news_count, 3);
    }
}
