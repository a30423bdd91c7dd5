mod cli;

use anyhow::Result;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load env variables from .env if present
    let _ = dotenvy::dotenv();
    // init logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let cli = <Cli as clap::Parser>::parse();

    match cli.command {
        Commands::Info => cli::handle_info(cli.project).await,
        Commands::Files => cli::handle_files(cli.project).await,
        Commands::Search(args) => cli::handle_search(cli.project, args).await,
        Commands::Set(args) => cli::handle_set(cli.project, args).await,
    }
}
