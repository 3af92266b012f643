//! Scripted demo session.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use crate::orchestrator::Orchestrator;
use std::path::Path;

/// The three questions asked, in order, over one session.
pub const DEMO_QUESTIONS: [&str; 3] = [
    "What's the weather like in Seattle today?",
    "Can you recommend a travel package for Seattle?",
    "What is the cancellation policy and how much refund can I get?",
];

/// Run the demo command.
pub async fn run_demo(transcript: Option<&str>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Agent, &settings) {
        Output::error(&format!("{}", e));
        return Err(e);
    }

    let desk = Orchestrator::new(settings).await?;
    let agent = desk.agent();
    let mut session = agent.create_session();

    Output::header(&format!("{} demo session", agent.name()));
    Output::kv("Session", &session.id().to_string());

    for question in DEMO_QUESTIONS {
        Output::speaker("User", question);

        let spinner = Output::spinner("Thinking...");
        let result = agent.run(question, Some(&mut session)).await;
        spinner.finish_and_clear();

        let response = result?;
        Output::tool_calls(&response.tool_calls);
        Output::speaker(agent.name(), &response.content);
    }

    if let Some(path) = transcript {
        let json = serde_json::to_string_pretty(&session)?;
        std::fs::write(Path::new(path), json)?;
        Output::success(&format!("Transcript written to {}", path));
    }

    Ok(())
}
