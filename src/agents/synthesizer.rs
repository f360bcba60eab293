//! Synthesizer sub-agent: turns gathered weather and news into a briefing.

use serde_json::Value;

use super::{publish, SubAgent, NEWS_AGENT_ID, SYNTHESIZER_AGENT_ID, WEATHER_AGENT_ID};
use crate::blackboard::Blackboard;
use crate::error::AgentError;
use crate::render::{plain_sections, BriefingRenderer, TemplateRenderer};
use crate::types::{BriefingRequest, BriefingResult, NewsResult, WeatherResult};

/// Produces a [`BriefingResult`] from the weather and news entries.
///
/// Refuses to run unless both entries are present; it never produces a
/// partial briefing.
#[derive(Debug)]
pub struct SynthesizerAgent {
    renderer: Box<dyn BriefingRenderer>,
}

impl Default for SynthesizerAgent {
    fn default() -> Self {
        Self::new(Box::new(TemplateRenderer::new()))
    }
}

impl SynthesizerAgent {
    pub fn new(renderer: Box<dyn BriefingRenderer>) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &dyn BriefingRenderer {
        self.renderer.as_ref()
    }

    /// Build the briefing. A renderer failure degrades to the plain
    /// data-dump sections instead of failing.
    pub fn synthesize(&self, weather: &WeatherResult, news: &NewsResult) -> BriefingResult {
        let sections = match self.renderer.render(weather, news) {
            Ok(sections) => sections,
            Err(e) => {
                log::warn!(
                    "[{}] {} renderer failed ({}), using plain rendering",
                    self.name(),
                    self.renderer.name(),
                    e
                );
                plain_sections(weather, news)
            }
        };

        BriefingResult {
            date: chrono::Local::now().format("%B %d, %Y").to_string(),
            weather_section: sections.weather_section,
            news_section: sections.news_section,
            summary: sections.summary,
        }
    }

    fn read<T: serde::de::DeserializeOwned>(
        blackboard: &Blackboard,
        key: &str,
    ) -> Result<Option<T>, AgentError> {
        blackboard.get_as(key).map_err(|source| AgentError::Payload {
            key: key.to_string(),
            source,
        })
    }
}

impl SubAgent for SynthesizerAgent {
    fn id(&self) -> &str {
        SYNTHESIZER_AGENT_ID
    }

    fn name(&self) -> &str {
        "SynthesizerAgent"
    }

    fn role(&self) -> &str {
        "briefing synthesis"
    }

    fn execute(
        &self,
        _request: &BriefingRequest,
        blackboard: &mut Blackboard,
    ) -> Result<Value, AgentError> {
        let weather: Option<WeatherResult> = Self::read(blackboard, WEATHER_AGENT_ID)?;
        let news: Option<NewsResult> = Self::read(blackboard, NEWS_AGENT_ID)?;

        let (weather, news) = match (weather, news) {
            (Some(weather), Some(news)) => (weather, news),
            (weather, news) => {
                let mut missing = Vec::new();
                if weather.is_none() {
                    missing.push(WEATHER_AGENT_ID.to_string());
                }
                if news.is_none() {
                    missing.push(NEWS_AGENT_ID.to_string());
                }
                return Err(AgentError::MissingDependency {
                    agent: self.id().to_string(),
                    missing,
                });
            }
        };

        log::info!("[{}] Synthesizing daily briefing...", self.name());
        let briefing = self.synthesize(&weather, &news);
        publish(blackboard, self.id(), &briefing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{NewsAgent, WeatherAgent};
    use crate::render::fixtures::{self, count_enumerated};

    #[test]
    fn test_missing_dependency_produces_nothing() {
        let mut bb = Blackboard::new();
        let request = BriefingRequest::default();
        WeatherAgent::new().execute(&request, &mut bb).unwrap();

        let err = SynthesizerAgent::default().execute(&request, &mut bb).unwrap_err();
        match err {
            AgentError::MissingDependency { agent, missing } => {
                assert_eq!(agent, "synthesizer");
                assert_eq!(missing, vec!["news".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!bb.contains(SYNTHESIZER_AGENT_ID));
    }

    #[test]
    fn test_both_missing_listed() {
        let mut bb = Blackboard::new();
        let err = SynthesizerAgent::default()
            .execute(&BriefingRequest::default(), &mut bb)
            .unwrap_err();
        assert!(err.to_string().ends_with("weather, news"));
    }

    #[test]
    fn test_corrupt_entry_is_payload_error() {
        let mut bb = Blackboard::new();
        bb.set(WEATHER_AGENT_ID, serde_json::json!({"location": 5}));
        bb.set(NEWS_AGENT_ID, serde_json::json!({}));
        let err = SynthesizerAgent::default()
            .execute(&BriefingRequest::default(), &mut bb)
            .unwrap_err();
        assert!(matches!(err, AgentError::Payload { ref key, .. } if key == "weather"));
    }

    #[test]
    fn test_execute_writes_briefing() {
        let mut bb = Blackboard::new();
        let request = BriefingRequest::new("London", "world");
        WeatherAgent::new().execute(&request, &mut bb).unwrap();
        NewsAgent::new().execute(&request, &mut bb).unwrap();

        let payload = SynthesizerAgent::default().execute(&request, &mut bb).unwrap();
        let briefing: BriefingResult = serde_json::from_value(payload).unwrap();
        assert!(briefing.weather_section.contains("London"));
        assert_eq!(count_enumerated(&briefing.news_section), 3);
        assert!(bb.contains(SYNTHESIZER_AGENT_ID));
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let agent = SynthesizerAgent::default();
        let a = agent.synthesize(&fixtures::weather(), &fixtures::news(3));
        let b = agent.synthesize(&fixtures::weather(), &fixtures::news(3));
        assert_eq!(a.weather_section, b.weather_section);
        assert_eq!(a.news_section, b.news_section);
        assert_eq!(a.summary, b.summary);
    }

    #[test]
    fn test_render_failure_falls_back_to_plain() {
        let broken = TemplateRenderer::with_templates("{% if %}", "", "");
        let agent = SynthesizerAgent::new(Box::new(broken));
        let briefing = agent.synthesize(&fixtures::weather(), &fixtures::news(3));

        assert_eq!(briefing.weather_section, "Weather for Finland: 20°C, Clear, humidity 50%");
        assert_eq!(count_enumerated(&briefing.news_section), 3);
        assert!(briefing.summary.contains("volcanoes"));
    }
}
