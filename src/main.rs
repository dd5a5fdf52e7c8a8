mod board;
mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::board::{self as board_cmd, BoardArgs};
use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::tickets::{self, CreateArgs, ListArgs, StatusArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::http::HttpHelpdeskClient;

const LOG_ENV: &str = "DESKLINE_LOG";

#[derive(Parser)]
#[command(name = "deskline", author, version, about = "Support ticket helpdesk client")]
struct Cli {
    /// Helpdesk API base URL, e.g. http://127.0.0.1:8000/api.
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Log requests and state changes to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive ticket board.
    Board(BoardArgs),
    /// List tickets, optionally filtered.
    List(ListArgs),
    /// Show aggregate ticket statistics.
    Stats,
    /// Ask the helpdesk for a category/priority suggestion.
    Classify {
        description: String,
    },
    /// Submit a new ticket.
    Create(CreateArgs),
    /// Change a ticket's status.
    Status(StatusArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(error) = run(cli).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "deskline=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> AppResult<()> {
    let api_base = cli.api_base;

    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Board(args) => board_cmd::run(&build_context(api_base)?, args).await,
        Commands::List(args) => tickets::list(&build_context(api_base)?, args).await,
        Commands::Stats => tickets::stats(&build_context(api_base)?).await,
        Commands::Classify { description } => {
            tickets::classify(&build_context(api_base)?, &description).await
        }
        Commands::Create(args) => tickets::create(&build_context(api_base)?, args).await,
        Commands::Status(args) => tickets::set_status(&build_context(api_base)?, args).await,
    }
}

fn build_context(api_base: Option<String>) -> AppResult<AppContext> {
    let config = AppConfig::load(api_base)?;
    tracing::debug!(api_base = %config.api_base, "using helpdesk");
    let helpdesk = Arc::new(HttpHelpdeskClient::new(config.api_base.clone()));
    Ok(AppContext::new(config, helpdesk))
}
