//! Data passed between the sub-agents.
//!
//! Results travel through the blackboard as JSON payloads; these are their
//! typed forms.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{BriefingConfig, DEFAULT_LOCATION, DEFAULT_NEWS_COUNT, DEFAULT_TOPIC};

/// One briefing request: where to report weather for and what news to follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefingRequest {
    pub location: String,
    pub topic: String,
    pub news_count: usize,
}

impl BriefingRequest {
    /// Build a request from raw user input, substituting the built-in
    /// defaults for blank fields.
    pub fn new(location: &str, topic: &str) -> Self {
        Self {
            location: or_default(location, DEFAULT_LOCATION),
            topic: or_default(topic, DEFAULT_TOPIC),
            news_count: DEFAULT_NEWS_COUNT,
        }
    }

    /// Build a request from raw user input using the configured defaults.
    pub fn from_input(location: &str, topic: &str, config: &BriefingConfig) -> Self {
        Self {
            location: or_default(location, &config.default_location),
            topic: or_default(topic, &config.default_topic),
            news_count: config.news_count.max(1),
        }
    }

    /// Set the headline count (clamped to at least 1).
    pub fn with_news_count(mut self, count: usize) -> Self {
        self.news_count = count.max(1);
        self
    }
}

impl Default for BriefingRequest {
    fn default() -> Self {
        Self::new("", "")
    }
}

fn or_default(input: &str, default: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// A weather reading for one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub location: String,
    /// Degrees Celsius.
    pub temperature: i32,
    pub condition: String,
    /// Relative humidity, 0-100.
    pub humidity: u8,
    /// ISO-8601.
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub summary: String,
}

/// Headlines for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsResult {
    pub topic: String,
    pub headlines: Vec<Headline>,
    pub count: usize,
    /// ISO-8601.
    pub timestamp: String,
}

/// The synthesized daily briefing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefingResult {
    /// Human-readable date, e.g. "October 18, 2026".
    pub date: String,
    pub weather_section: String,
    pub news_section: String,
    pub summary: String,
}

impl BriefingResult {
    /// Render the full report text.
    pub fn render(&self) -> String {
        format!(
            "Daily Briefing - {}\n\n{}\n\n{}\n\n{}",
            self.date, self.weather_section, self.news_section, self.summary
        )
    }
}

impl fmt::Display for BriefingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
