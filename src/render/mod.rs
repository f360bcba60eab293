//! Briefing renderers.
//!
//! A renderer turns the gathered weather and news into the three prose
//! sections of a briefing. [`TemplateRenderer`] is deterministic and is the
//! default; [`LlmRenderer`] asks a chat completions backend for the closing
//! summary. When a renderer fails, the synthesizer falls back to
//! [`plain_sections`].

pub mod llm;
pub mod template;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::types::{NewsResult, WeatherResult};

pub use llm::LlmRenderer;
pub use template::TemplateRenderer;

/// The rendered prose of a briefing, without the date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefingSections {
    pub weather_section: String,
    pub news_section: String,
    pub summary: String,
}

/// Produces briefing prose from gathered data.
#[async_trait]
pub trait BriefingRenderer: Send + Sync + std::fmt::Debug {
    /// Renderer name, for logs.
    fn name(&self) -> &str;

    /// Render synchronously.
    fn render(
        &self,
        weather: &WeatherResult,
        news: &NewsResult,
    ) -> Result<BriefingSections, RenderError>;

    /// Render asynchronously. Defaults to [`BriefingRenderer::render`].
    async fn arender(
        &self,
        weather: &WeatherResult,
        news: &NewsResult,
    ) -> Result<BriefingSections, RenderError> {
        self.render(weather, news)
    }
}

/// Data-dump rendering used when a renderer fails. Never fails itself.
pub fn plain_sections(weather: &WeatherResult, news: &NewsResult) -> BriefingSections {
    let weather_section = format!(
        "Weather for {}: {}°C, {}, humidity {}%",
        weather.location, weather.temperature, weather.condition, weather.humidity
    );

    let mut news_section = format!("News ({}):", news.topic);
    for (i, headline) in news.headlines.iter().enumerate() {
        news_section.push_str(&format!("\n{}. {} - {}", i + 1, headline.title, headline.summary));
    }

    let summary = format!(
        "Topic: {}; headlines: {}; location: {}",
        news.topic,
        news.headlines.len(),
        weather.location
    );

    BriefingSections {
        weather_section,
        news_section,
        summary,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::types::{Headline, NewsResult, WeatherResult};

    /// Number of numbered lines (`"1. ..."`) in a news section.
    pub fn count_enumerated(section: &str) -> usize {
        section
            .lines()
            .filter(|line| {
                let line = line.trim_start();
                match line.split_once(". ") {
                    Some((n, _)) => !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()),
                    None => false,
                }
            })
            .count()
    }

    pub fn weather() -> WeatherResult {
        WeatherResult {
            location: "Finland".into(),
            temperature: 20,
            condition: "Clear".into(),
            humidity: 50,
            timestamp: "2026-10-18T08:00:00+00:00".into(),
        }
    }

    pub fn news(count: usize) -> NewsResult {
        let headlines: Vec<Headline> = (1..=count)
            .map(|i| Headline {
                title: format!("Volcanoes story {}", i),
                summary: format!("Summary {} about volcanoes.", i),
            })
            .collect();
        NewsResult {
            topic: "volcanoes".into(),
            count: headlines.len(),
            headlines,
            timestamp: "2026-10-18T08:00:00+00:00".into(),
        }
    }
}
