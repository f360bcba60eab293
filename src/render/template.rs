//! Deterministic tera-template renderer.

use tera::{Context, Tera};

use super::{BriefingRenderer, BriefingSections};
use crate::error::RenderError;
use crate::types::{NewsResult, WeatherResult};

pub const WEATHER_TEMPLATE: &str = "{{ location }} is looking {{ condition | lower }} today, \
with a temperature of {{ temperature }}°C and humidity around {{ humidity }}%.";

pub const NEWS_TEMPLATE: &str = "Here are the top {{ count }} {{ topic | title }} \
stories making headlines:\
{% for h in headlines %}\n{{ loop.index }}. {{ h.title }}: {{ h.summary }}{% endfor %}";

pub const SUMMARY_TEMPLATE: &str = "Today's weather in {{ location }} brings \
{{ condition | lower }} conditions at {{ temperature }}°C. In {{ topic }} news, \
{{ count }} developments may shape your day. Stay informed and have a great day!";

/// Renders each section from a tera template.
///
/// Output depends only on the inputs and the templates.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    weather: String,
    news: String,
    summary: String,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::with_templates(WEATHER_TEMPLATE, NEWS_TEMPLATE, SUMMARY_TEMPLATE)
    }
}

impl TemplateRenderer {
    /// Renderer with the built-in templates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer with custom templates.
    ///
    /// The weather template sees `location`, `temperature`, `condition`,
    /// `humidity`; the news template sees `topic`, `count`, `headlines`
    /// (each with `title` and `summary`); the summary template sees all of
    /// them.
    pub fn with_templates(
        weather: impl Into<String>,
        news: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            weather: weather.into(),
            news: news.into(),
            summary: summary.into(),
        }
    }

    fn context(weather: &WeatherResult, news: &NewsResult) -> Context {
        let mut ctx = Context::new();
        ctx.insert("location", &weather.location);
        ctx.insert("temperature", &weather.temperature);
        ctx.insert("condition", &weather.condition);
        ctx.insert("humidity", &weather.humidity);
        ctx.insert("topic", &news.topic);
        ctx.insert("count", &news.headlines.len());
        ctx.insert("headlines", &news.headlines);
        ctx
    }
}

impl BriefingRenderer for TemplateRenderer {
    fn name(&self) -> &str {
        "template"
    }

    fn render(
        &self,
        weather: &WeatherResult,
        news: &NewsResult,
    ) -> Result<BriefingSections, RenderError> {
        let ctx = Self::context(weather, news);
        Ok(BriefingSections {
            weather_section: Tera::one_off(&self.weather, &ctx, false)?.trim().to_string(),
            news_section: Tera::one_off(&self.news, &ctx, false)?.trim().to_string(),
            summary: Tera::one_off(&self.summary, &ctx, false)?.trim().to_string(),
        })
    }
}
