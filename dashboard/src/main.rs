//! `stockroom`: inventory reservation dashboard for the terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use stockroom_client::{InventoryClient, Mode};
use stockroom_core::environment::SystemClock;
use stockroom_dashboard::cli::{self, Command};
use stockroom_dashboard::config::DEFAULT_LOG_FILTER;
use stockroom_dashboard::{Config, Session};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "stockroom", version, about = "Reserve and allocate inventory against orders", long_about = None)]
struct Cli {
    /// Backend mode (development | production); overrides STOCKROOM_MODE
    #[arg(long)]
    mode: Option<Mode>,

    /// Explicit backend base URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Entry>,
}

#[derive(Subcommand, Debug)]
enum Entry {
    #[command(flatten)]
    Run(Command),
    /// Interactive dashboard shell
    Shell,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(mode) = cli.mode {
        config = Config {
            mode,
            api: stockroom_client::ApiConfig::for_mode(mode).with_origin(config.api.origin),
        };
    }
    if let Some(base_url) = cli.base_url {
        config.api = config.api.with_base_url(base_url);
    }
    tracing::info!(mode = %config.mode, base_url = %config.api.base_url, "Starting stockroom");

    let client = InventoryClient::new(&config.api).context("Failed to configure the inventory client")?;
    let mut session = Session::new(Arc::new(client), Arc::new(SystemClock), config.api.timeout * 2);

    match cli.command.unwrap_or(Entry::Run(Command::List)) {
        Entry::Shell => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            cli::run_shell(&mut session, stdin, &mut stdout)
                .await
                .context("Shell I/O failed")?;
        },
        Entry::Run(command) => {
            let (view, result) = cli::execute(&mut session, command).await;
            println!("{view}");
            result.context("Command failed")?;
        },
    }

    Ok(())
}
