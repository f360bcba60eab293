//! Renderer backed by an OpenAI-compatible chat completions API.
//!
//! Weather and news sections still come from the templates so the headline
//! enumeration stays exact; the model writes the closing summary. Any
//! backend problem is returned as a [`RenderError`] and the synthesizer
//! falls back to the plain rendering.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{BriefingRenderer, BriefingSections, TemplateRenderer};
use crate::config::LlmConfig;
use crate::error::RenderError;
use crate::types::{NewsResult, WeatherResult};

const SYSTEM_PROMPT: &str = "You write the closing paragraph of a short daily briefing. \
Use two or three friendly sentences, mention the location's weather and the news topic, \
and do not invent facts beyond the data you are given.";

/// LLM-backed renderer.
#[derive(Debug, Clone)]
pub struct LlmRenderer {
    config: LlmConfig,
    sections: TemplateRenderer,
}

impl LlmRenderer {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            sections: TemplateRenderer::new(),
        }
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Build the chat completions request body.
    pub fn build_request_body(&self, weather: &WeatherResult, news: &NewsResult) -> Value {
        let headlines: Vec<&str> = news.headlines.iter().map(|h| h.title.as_str()).collect();
        let user = format!(
            "Location: {}\nTemperature: {}°C\nConditions: {}\nHumidity: {}%\n\
             News topic: {}\nHeadlines:\n- {}",
            weather.location,
            weather.temperature,
            weather.condition,
            weather.humidity,
            news.topic,
            headlines.join("\n- ")
        );
        json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": user},
            ],
        })
    }

    async fn complete(&self, body: &Value) -> Result<String, RenderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(RenderError::MissingCredential)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()?;

        log::debug!("LlmRenderer: POST {} model={}", self.endpoint(), self.config.model);
        let response = client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", api_key))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let snippet: String = text.chars().take(300).collect();
            return Err(RenderError::Backend(format!("status {}: {}", status, snippet)));
        }

        let parsed: Value = serde_json::from_str(&text)
            .map_err(|e| RenderError::Backend(format!("invalid response body: {}", e)))?;
        extract_content(&parsed)
    }
}

/// Pull `choices[0].message.content` out of a completion response.
fn extract_content(response: &Value) -> Result<String, RenderError> {
    let content = response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| RenderError::Backend("response has no message content".into()))?
        .trim();
    if content.is_empty() {
        return Err(RenderError::EmptyResponse);
    }
    Ok(content.to_string())
}

#[async_trait]
impl BriefingRenderer for LlmRenderer {
    fn name(&self) -> &str {
        "llm"
    }

    /// Blocks on [`BriefingRenderer::arender`] with a private runtime.
    /// Must not be called from inside an async runtime.
    fn render(
        &self,
        weather: &WeatherResult,
        news: &NewsResult,
    ) -> Result<BriefingSections, RenderError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| RenderError::Backend(format!("failed to start runtime: {}", e)))?;
        rt.block_on(self.arender(weather, news))
    }

    async fn arender(
        &self,
        weather: &WeatherResult,
        news: &NewsResult,
    ) -> Result<BriefingSections, RenderError> {
        let mut sections = self.sections.render(weather, news)?;
        let body = self.build_request_body(weather, news);
        sections.summary = self.complete(&body).await?;
        Ok(sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures;

    #[test]
    fn test_missing_credential_fails_without_network() {
        let renderer = LlmRenderer::new(LlmConfig::default());
        let err = renderer
            .render(&fixtures::weather(), &fixtures::news(3))
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingCredential));
    }

    #[test]
    fn test_request_body() {
        let renderer = LlmRenderer::new(LlmConfig::default());
        let body = renderer.build_request_body(&fixtures::weather(), &fixtures::news(2));
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        let user = body["messages"][1]["content"].as_str().unwrap();
        assert!(user.contains("Location: Finland"));
        assert!(user.contains("- Volcanoes story 2"));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let renderer = LlmRenderer::new(LlmConfig {
            base_url: "http://localhost:8080/v1/".into(),
            ..LlmConfig::default()
        });
        assert_eq!(renderer.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_extract_content() {
        let ok = json!({"choices": [{"message": {"content": "  Have a great day.  "}}]});
        assert_eq!(extract_content(&ok).unwrap(), "Have a great day.");

        let empty = json!({"choices": [{"message": {"content": "   "}}]});
        assert!(matches!(extract_content(&empty), Err(RenderError::EmptyResponse)));

        let malformed = json!({"error": {"message": "bad key"}});
        assert!(matches!(extract_content(&malformed), Err(RenderError::Backend(_))));
    }
}
