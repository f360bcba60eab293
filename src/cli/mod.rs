//! Interactive line-based driver.
//!
//! Prompts for a location and a news topic, runs the controller and prints
//! the briefing or the failure. Blank answers take the configured defaults;
//! `quit` (any case) at either prompt, or end of input, leaves the loop.
//! A failed run is reported and the loop keeps going.
//!
//! [`InteractiveDriver::run_demo`] walks a fixed set of requests first and
//! prints each sub-agent's state after every briefing.

use std::io::{BufRead, Write};

use crate::config::BriefingConfig;
use crate::controller::BriefingController;
use crate::error::DriverError;
use crate::types::BriefingRequest;

/// Command that ends the interactive loop.
pub const QUIT_COMMAND: &str = "quit";

const SEPARATOR: &str = "------------------------------";

/// Requests walked by [`InteractiveDriver::run_demo`], as (location, topic).
pub const DEMO_REQUESTS: [(&str, &str); 3] = [
    ("New York", "technology"),
    ("London", "world"),
    ("Tokyo", "business"),
];

/// One answer read from the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    /// The user asked to leave, or input ended.
    Quit,
    /// Trimmed answer; may be empty.
    Answer(String),
}

/// Classify one raw input line.
pub fn parse_input(line: &str) -> PromptInput {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case(QUIT_COMMAND) {
        PromptInput::Quit
    } else {
        PromptInput::Answer(trimmed.to_string())
    }
}

/// Write `text`, then read one line.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> Result<PromptInput, DriverError> {
    write!(output, "{}", text)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(PromptInput::Quit);
    }
    Ok(parse_input(&line))
}

/// Drives a [`BriefingController`] from a line-based prompt.
#[derive(Debug)]
pub struct InteractiveDriver {
    controller: BriefingController,
    config: BriefingConfig,
}

impl InteractiveDriver {
    pub fn new(controller: BriefingController, config: BriefingConfig) -> Self {
        Self { controller, config }
    }

    /// Driver wired from `config`.
    pub fn from_config(config: BriefingConfig) -> Self {
        let controller = BriefingController::from_config(&config);
        Self::new(controller, config)
    }

    pub fn controller(&self) -> &BriefingController {
        &self.controller
    }

    /// Run one briefing and write it, or the failure, to `output`.
    fn brief<W: Write>(
        &mut self,
        request: &BriefingRequest,
        output: &mut W,
    ) -> Result<bool, DriverError> {
        match self.controller.run(request) {
            Ok(briefing) => {
                writeln!(output, "{}", briefing)?;
                Ok(true)
            }
            Err(failure) => {
                writeln!(output, "Failed to generate daily briefing: {}", failure)?;
                Ok(false)
            }
        }
    }

    /// Run every [`DEMO_REQUESTS`] entry, printing the briefing and the
    /// sub-agent states after each. Returns how many briefings succeeded.
    pub fn run_demo<W: Write>(&mut self, mut output: W) -> Result<usize, DriverError> {
        writeln!(output, "Daily Briefing Agent Demo")?;
        writeln!(output, "{}", "=".repeat(50))?;

        let mut succeeded = 0;
        for (i, (location, topic)) in DEMO_REQUESTS.iter().enumerate() {
            let request = BriefingRequest::from_input(location, topic, &self.config);
            writeln!(output, "\nDemo {}: {}, {}", i + 1, request.location, request.topic)?;
            writeln!(output, "{}", SEPARATOR)?;

            if self.brief(&request, &mut output)? {
                succeeded += 1;
            }

            writeln!(output, "\nAgent States:")?;
            for (agent, state) in self.controller.agent_states() {
                writeln!(output, "  {}: {}", agent, state)?;
            }
            writeln!(output, "\n{}", "=".repeat(50))?;
        }
        Ok(succeeded)
    }

    /// Loop until the user quits. Returns how many briefings were attempted.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> Result<usize, DriverError> {
        writeln!(output, "Daily Briefing Agent")?;
        writeln!(output, "Enter '{}' to exit", QUIT_COMMAND)?;

        let mut attempted = 0;
        loop {
            writeln!(output, "\n{}", SEPARATOR)?;

            let location_prompt = format!(
                "Enter location (default: {}): ",
                self.config.default_location
            );
            let location = match prompt(&mut input, &mut output, &location_prompt)? {
                PromptInput::Quit => break,
                PromptInput::Answer(answer) => answer,
            };

            let topic_prompt = format!(
                "Enter news topic (default: {}): ",
                self.config.default_topic
            );
            let topic = match prompt(&mut input, &mut output, &topic_prompt)? {
                PromptInput::Quit => break,
                PromptInput::Answer(answer) => answer,
            };

            let request = BriefingRequest::from_input(&location, &topic, &self.config);
            writeln!(
                output,
                "\nGenerating briefing for {}, {}...\n",
                request.location, request.topic
            )?;

            attempted += 1;
            self.brief(&request, &mut output)?;
        }

        writeln!(output, "\nThank you for using Daily Briefing Agent!")?;
        Ok(attempted)
    }
}
