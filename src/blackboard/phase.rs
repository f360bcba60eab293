//! Scoped `&mut Blackboard` access for one tree node.
//!
//! An action node runs its agent inside a [`Phase`]; the phase writes a
//! start marker when it begins and an end marker with the elapsed time
//! when it is dropped, so the trace reads:
//!
//! ```text
//! >>phase:WeatherCollection
//! weather
//! <<phase:WeatherCollection:0ms
//! ```

use super::view::Blackboard;

/// A named phase holding the blackboard for its duration.
///
/// # Example
///
/// ```
/// use daily_briefing::blackboard::{Blackboard, Phase};
///
/// let mut bb = Blackboard::new();
/// {
///     let mut phase = Phase::begin(&mut bb, "WeatherCollection");
///     phase.bb().set("weather", serde_json::json!({"location": "Oslo"}));
/// }
/// assert_eq!(bb.trace().len(), 3);
/// ```
pub struct Phase<'a> {
    blackboard: &'a mut Blackboard,
    name: String,
    start_epoch: i64,
}

impl<'a> Phase<'a> {
    /// Begin a named phase.
    pub fn begin(blackboard: &'a mut Blackboard, name: impl Into<String>) -> Self {
        let name = name.into();
        blackboard.record_phase_start(&name);
        Self {
            blackboard,
            name,
            start_epoch: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn bb(&mut self) -> &mut Blackboard {
        self.blackboard
    }

    pub fn bb_ref(&self) -> &Blackboard {
        self.blackboard
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elapsed_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis() - self.start_epoch
    }
}

impl Drop for Phase<'_> {
    fn drop(&mut self) {
        let elapsed = self.elapsed_ms();
        self.blackboard.record_phase_end(&self.name, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_records_markers() {
        let mut bb = Blackboard::new();
        {
            let mut phase = Phase::begin(&mut bb, "NewsCollection");
            assert_eq!(phase.name(), "NewsCollection");
            phase.bb().set("news", serde_json::json!({"topic": "world"}));
        }

        let trace = bb.trace();
        assert_eq!(trace.len(), 3);
        assert_eq!(trace[0], ">>phase:NewsCollection");
        assert_eq!(trace[1], "news");
        assert!(trace[2].starts_with("<<phase:NewsCollection:"));
    }

    #[test]
    fn test_sequential_phases_share_data() {
        let mut bb = Blackboard::new();
        {
            let mut phase = Phase::begin(&mut bb, "gather");
            phase.bb().set("weather", serde_json::json!(1));
        }
        {
            let phase = Phase::begin(&mut bb, "check");
            assert!(phase.bb_ref().contains("weather"));
        }
        assert_eq!(bb.trace().len(), 5);
    }
}
