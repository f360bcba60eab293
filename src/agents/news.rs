//! News sub-agent.
//!
//! Headlines come from a small curated catalog for a few common topics.
//! Any other topic, and any shortfall when more headlines are requested
//! than the catalog holds, is filled with headlines generated around the
//! topic name.

use serde_json::Value;

use super::{publish, SubAgent, NEWS_AGENT_ID};
use crate::blackboard::Blackboard;
use crate::config::DEFAULT_TOPIC;
use crate::error::AgentError;
use crate::types::{BriefingRequest, Headline, NewsResult};

const TECHNOLOGY: &[(&str, &str)] = &[
    (
        "AI Breakthrough: New Language Model Achieves Human-Level Performance",
        "Researchers report benchmark scores that rival human experts across reasoning tasks.",
    ),
    (
        "Tech Giants Report Strong Q3 Earnings Despite Market Volatility",
        "Cloud and advertising revenue carried the quarter while hardware sales slowed.",
    ),
    (
        "Quantum Computing Milestone Reached by Leading Research Team",
        "A new error-correction result keeps logical qubits stable longer than ever recorded.",
    ),
];

const WORLD: &[(&str, &str)] = &[
    (
        "Global Climate Summit Announces New Sustainability Initiatives",
        "Delegates agreed on funding targets for clean energy in developing economies.",
    ),
    (
        "International Trade Agreements Show Positive Economic Impact",
        "Early figures point to lower tariffs lifting exports across partner nations.",
    ),
    (
        "Space Agency Successfully Launches New Mars Exploration Mission",
        "The orbiter is on course to map subsurface ice ahead of future crewed missions.",
    ),
];

const BUSINESS: &[(&str, &str)] = &[
    (
        "Stock Markets Reach New Heights Amid Economic Recovery",
        "Major indices closed at record levels as consumer spending held firm.",
    ),
    (
        "Renewable Energy Sector Sees Record Investment Growth",
        "Solar and storage projects drew the largest share of new capital this year.",
    ),
    (
        "Cryptocurrency Market Shows Signs of Stabilization",
        "Trading volumes steadied after months of sharp swings in digital asset prices.",
    ),
];

/// `{topic}` is replaced by the topic, `{Topic}` by its title-cased form.
const GENERATED: &[(&str, &str)] = &[
    (
        "New Research Sheds Light on {Topic}",
        "Scientists published findings this week that change how experts think about {topic}.",
    ),
    (
        "{Topic} in Focus: What Experts Are Watching",
        "Analysts outline the {topic} developments most likely to matter in the coming months.",
    ),
    (
        "Communities Respond to the Latest {Topic} Developments",
        "Local leaders discuss how recent {topic} news is affecting daily life.",
    ),
    (
        "The Numbers Behind This Week's {Topic} Headlines",
        "A data-driven look at the trends shaping {topic} coverage.",
    ),
];

fn curated(topic: &str) -> &'static [(&'static str, &'static str)] {
    match topic.to_lowercase().as_str() {
        "technology" | "tech" => TECHNOLOGY,
        "world" => WORLD,
        "business" => BUSINESS,
        _ => &[],
    }
}

fn title_case(topic: &str) -> String {
    topic
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn generated(topic: &str, index: usize) -> Headline {
    let (title, summary) = GENERATED[index % GENERATED.len()];
    let titled = title_case(topic);
    let mut title = title.replace("{Topic}", &titled).replace("{topic}", topic);
    let round = index / GENERATED.len();
    if round > 0 {
        title = format!("{} (Part {})", title, round + 1);
    }
    Headline {
        title,
        summary: summary.replace("{Topic}", &titled).replace("{topic}", topic),
    }
}

/// Produces a [`NewsResult`] with exactly the requested number of headlines.
#[derive(Debug, Clone, Default)]
pub struct NewsAgent;

impl NewsAgent {
    pub fn new() -> Self {
        Self
    }

    /// Top `count` headlines for `topic`.
    ///
    /// A blank topic silently becomes the default topic; a zero count is
    /// raised to 1.
    pub fn top_headlines(&self, topic: &str, count: usize) -> NewsResult {
        let topic = match topic.trim() {
            "" => DEFAULT_TOPIC,
            t => t,
        };
        let count = count.max(1);

        let catalog = curated(topic);
        let headlines: Vec<Headline> = (0..count)
            .map(|i| match catalog.get(i) {
                Some((title, summary)) => Headline {
                    title: title.to_string(),
                    summary: summary.to_string(),
                },
                None => generated(topic, i - catalog.len()),
            })
            .collect();

        NewsResult {
            topic: topic.to_string(),
            count: headlines.len(),
            headlines,
            timestamp: chrono::Local::now().to_rfc3339(),
        }
    }
}

impl SubAgent for NewsAgent {
    fn id(&self) -> &str {
        NEWS_AGENT_ID
    }

    fn name(&self) -> &str {
        "NewsAgent"
    }

    fn role(&self) -> &str {
        "headline lookup"
    }

    fn execute(
        &self,
        request: &BriefingRequest,
        blackboard: &mut Blackboard,
    ) -> Result<Value, AgentError> {
        log::info!("[{}] Gathering news headlines for topic: {}", self.name(), request.topic);
        let news = self.top_headlines(&request.topic, request.news_count);
        log::debug!("[{}] {} headlines collected", self.name(), news.count);
        publish(blackboard, self.id(), &news)
    }
}
