//! Interactive chat command.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use crate::orchestrator::Orchestrator;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the interactive chat command.
pub async fn run_chat(settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Agent, &settings) {
        Output::error(&format!("{}", e));
        return Err(e);
    }

    let desk = Orchestrator::new(settings).await?;
    let agent = desk.agent();
    let mut session = agent.create_session();

    println!("\n{}", style(format!("{} Chat", agent.name())).bold().cyan());
    println!(
        "{}\n",
        style("Type your questions, or 'exit' to quit. Use 'clear' to reset conversation.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            session.clear();
            Output::info("Conversation history cleared.");
            continue;
        }

        match agent.run(input, Some(&mut session)).await {
            Ok(response) => {
                for call in &response.tool_calls {
                    println!("{}", style(format!("  [{}]", call)).dim());
                }
                Output::speaker(agent.name(), &response.content);
            }
            Err(e) => {
                // The session is left as it was before this input.
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    Ok(())
}
