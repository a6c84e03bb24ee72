use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use worldcheck::cli;

#[derive(Parser)]
#[command(name = "worldcheck", version)]
#[command(about = "Check a WorldCrafter world snapshot for narrative consistency", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all consistency checks over a world snapshot
    Check {
        /// Path to the snapshot JSON ({"entities": [...], "relationships": [...]})
        snapshot: String,

        /// Report output path (prints to stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Path to config file (defaults to ./worldcheck.toml or ~/.config/worldcheck/config.toml)
        #[arg(long)]
        config: Option<String>,

        /// Override LLM provider (anthropic, openai, openai-compatible)
        #[arg(long)]
        provider: Option<String>,

        /// Override LLM model (e.g., "claude-sonnet-4-20250514", "gpt-4o")
        #[arg(long)]
        model: Option<String>,

        /// Override base URL for OpenAI-compatible APIs
        #[arg(long)]
        base_url: Option<String>,

        /// Use the offline stub oracle instead of a live provider
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            snapshot,
            output,
            config,
            provider,
            model,
            base_url,
            dry_run,
        } => {
            let passed =
                cli::check::run(snapshot, output, config, provider, model, base_url, dry_run)
                    .await?;
            // Automation contract: non-zero exit when anything high or
            // critical was found.
            if !passed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
