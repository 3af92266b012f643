//! Tourdesk CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tourdesk::cli::{commands, Cli, Commands, Output};
use tourdesk::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Credentials may live in a .env file next to the working directory.
    dotenvy::dotenv().ok();

    let config_path = cli.config.as_deref().map(Settings::expand_path);

    // Load configuration
    let mut settings = Settings::load_from(config_path.as_ref())?;
    settings.apply_env();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("tourdesk={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Execute command
    match &cli.command {
        Commands::Ask { question } => {
            commands::run_ask(question, settings).await?;
        }

        Commands::Chat => {
            commands::run_chat(settings).await?;
        }

        Commands::Demo { transcript } => {
            commands::run_demo(transcript.as_deref(), settings).await?;
        }

        Commands::Search { query, limit } => {
            commands::run_search(query, *limit, settings).await?;
        }

        Commands::Tools => {
            commands::run_tools(settings).await?;
        }

        Commands::Config { action } => {
            let path: Option<PathBuf> = config_path;
            if let Err(e) = commands::run_config(action, path, settings) {
                Output::error(&format!("{}", e));
                return Err(e);
            }
        }
    }

    Ok(())
}
