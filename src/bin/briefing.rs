//! Interactive daily briefing binary.
//!
//! Walks the demo requests first, then drops into the prompt loop.
//!
//! # Environment Variables
//!
//! - `OPENAI_API_KEY`: optional; enables the LLM-written summary
//! - `RUST_LOG`: tracing filter (default: "warn,daily_briefing=info")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin briefing
//! ```

use std::io;

use daily_briefing::{BriefingConfig, InteractiveDriver};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with the briefing on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,daily_briefing=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    ctrlc::set_handler(|| {
        println!("\n\nDaily Briefing Agent interrupted by user");
        std::process::exit(0);
    })?;

    let config = BriefingConfig::from_env();
    tracing::info!(
        llm = config.llm.is_some(),
        news_count = config.news_count,
        "daily briefing agent starting"
    );

    let mut driver = InteractiveDriver::from_config(config);
    let succeeded = driver.run_demo(io::stdout())?;
    tracing::info!(succeeded, "demo pass finished");

    let stdin = io::stdin();
    let attempted = driver.run(stdin.lock(), io::stdout())?;

    tracing::info!(attempted, "daily briefing agent finished");
    Ok(())
}
