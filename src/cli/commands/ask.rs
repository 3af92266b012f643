//! Ask command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use crate::orchestrator::Orchestrator;

/// Run the ask command.
pub async fn run_ask(question: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Agent, &settings) {
        Output::error(&format!("{}", e));
        return Err(e);
    }

    let desk = Orchestrator::new(settings).await?;
    let agent = desk.agent();

    let spinner = Output::spinner("Thinking...");
    let result = agent.run(question, None).await;
    spinner.finish_and_clear();

    let response = result?;
    Output::tool_calls(&response.tool_calls);
    Output::speaker(agent.name(), &response.content);

    Ok(())
}
