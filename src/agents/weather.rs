//! Weather sub-agent.
//!
//! There is no weather provider behind this agent: readings come from a
//! fixed in-process catalog, with a generic reading for unlisted places.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::Value;

use super::{publish, SubAgent, WEATHER_AGENT_ID};
use crate::blackboard::Blackboard;
use crate::error::AgentError;
use crate::types::{BriefingRequest, WeatherResult};

/// Location reported when the input is blank.
pub const UNKNOWN_LOCATION: &str = "Unknown";

#[derive(Debug, Clone, Copy)]
struct Reading {
    temperature: i32,
    condition: &'static str,
    humidity: u8,
}

impl Reading {
    const fn new(temperature: i32, condition: &'static str, humidity: u8) -> Self {
        Self {
            temperature,
            condition,
            humidity,
        }
    }
}

const DEFAULT_READING: Reading = Reading::new(20, "Clear", 50);

/// Keyed by lowercase location.
static CATALOG: Lazy<HashMap<&'static str, Reading>> = Lazy::new(|| {
    HashMap::from([
        ("new york", Reading::new(22, "Partly Cloudy", 64)),
        ("london", Reading::new(15, "Rainy", 82)),
        ("tokyo", Reading::new(25, "Sunny", 58)),
        ("san francisco", Reading::new(18, "Foggy", 78)),
    ])
});

/// Produces a [`WeatherResult`] for the requested location.
#[derive(Debug, Clone, Default)]
pub struct WeatherAgent;

impl WeatherAgent {
    pub fn new() -> Self {
        Self
    }

    /// Look up the weather for `location`.
    ///
    /// Best effort: a blank location yields a reading for
    /// [`UNKNOWN_LOCATION`] instead of an error.
    pub fn get_weather(&self, location: &str) -> WeatherResult {
        let location = location.trim();
        let (location, reading) = if location.is_empty() {
            (UNKNOWN_LOCATION, DEFAULT_READING)
        } else {
            let reading = CATALOG
                .get(location.to_lowercase().as_str())
                .copied()
                .unwrap_or(DEFAULT_READING);
            (location, reading)
        };

        WeatherResult {
            location: location.to_string(),
            temperature: reading.temperature,
            condition: reading.condition.to_string(),
            humidity: reading.humidity,
            timestamp: chrono::Local::now().to_rfc3339(),
        }
    }
}

impl SubAgent for WeatherAgent {
    fn id(&self) -> &str {
        WEATHER_AGENT_ID
    }

    fn name(&self) -> &str {
        "WeatherAgent"
    }

    fn role(&self) -> &str {
        "weather lookup"
    }

    fn execute(
        &self,
        request: &BriefingRequest,
        blackboard: &mut Blackboard,
    ) -> Result<Value, AgentError> {
        log::info!("[{}] Gathering weather data for {}", self.name(), request.location);
        let weather = self.get_weather(&request.location);
        log::debug!(
            "[{}] {}: {}°C, {}, {}% humidity",
            self.name(),
            weather.location,
            weather.temperature,
            weather.condition,
            weather.humidity
        );
        publish(blackboard, self.id(), &weather)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_location() {
        let weather = WeatherAgent::new().get_weather("London");
        assert_eq!(weather.location, "London");
        assert_eq!(weather.temperature, 15);
        assert_eq!(weather.condition, "Rainy");
        assert!(weather.humidity <= 100);
        assert!(chrono::DateTime::parse_from_rfc3339(&weather.timestamp).is_ok());
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_keeps_spelling() {
        let weather = WeatherAgent::new().get_weather("  tokyo ");
        assert_eq!(weather.location, "tokyo");
        assert_eq!(weather.condition, "Sunny");
    }

    #[test]
    fn test_unlisted_location_uses_default_reading() {
        let weather = WeatherAgent::new().get_weather("Finland");
        assert_eq!(weather.location, "Finland");
        assert_eq!(weather.temperature, 20);
        assert_eq!(weather.condition, "Clear");
    }

    #[test]
    fn test_blank_location_is_unknown() {
        let weather = WeatherAgent::new().get_weather("   ");
        assert_eq!(weather.location, "Unknown");
    }

    #[test]
    fn test_execute_overwrites_entry() {
        let agent = WeatherAgent::new();
        let mut bb = Blackboard::new();
        let request = BriefingRequest::new("London", "");

        agent.execute(&request, &mut bb).unwrap();
        agent.execute(&request, &mut bb).unwrap();

        assert_eq!(bb.len(), 1);
        let slot = bb.get_slot(WEATHER_AGENT_ID).unwrap();
        assert_eq!(slot.meta.revision, 2);
        assert_eq!(slot.value["location"], "London");
        assert!(slot.value.is_object());
    }
}
