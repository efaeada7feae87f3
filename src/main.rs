//! canvas-fetch command line client.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI args ──┐
//!              ├─▶ FetchConfig ─▶ FetchClient ─────────────┐
//!   TOML file ─┘                   │                        │
//!                                  ▼                        ▼
//!                          ┌──────────────┐        ┌─────────────────────┐
//!                          │ ResponseCache│        │ AssignmentAggregator│
//!                          └──────────────┘        │  (join_all fan-out) │
//!                                  │               └─────────────────────┘
//!                                  ▼
//!                 ┌───────────────────────────────────┐
//!                 │ ladder: direct → relay → relay …  │ × passes
//!                 └───────────────────────────────────┘
//!                                  │
//!                                  ▼
//!                             Canvas REST API
//! ```

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use canvas_fetch::canvas::AssignmentAggregator;
use canvas_fetch::client::messages::describe;
use canvas_fetch::client::{FetchClient, FetchError};
use canvas_fetch::config::loader::load_config;
use canvas_fetch::config::FetchConfig;
use canvas_fetch::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "canvas-fetch")]
#[command(about = "Fetch Canvas courses and assignments through a relay ladder", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Instance base URL, e.g. school.instructure.com.
    #[arg(short, long, env = "CANVAS_BASE_URL")]
    base_url: Option<String>,

    /// API access token.
    #[arg(short, long, env = "CANVAS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Override observability.log_level.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the token against the identity endpoint
    Validate,
    /// List active courses
    Courses,
    /// List upcoming assignments across active courses
    Assignments,
    /// Fetch an arbitrary endpoint path
    Get {
        /// Endpoint path, e.g. /api/v1/users/self/todo
        endpoint: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FetchConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }
    if cli.base_url.is_some() {
        config.target.base_url = cli.base_url.clone();
    }
    if cli.token.is_some() {
        config.target.token = cli.token.clone();
    }

    logging::init_logging(&config.observability.log_level);

    if let Some(address) = &config.observability.metrics_address {
        match address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(metrics_address = %address, "Failed to parse metrics address"),
        }
    }

    let base_url = config
        .target
        .base_url
        .clone()
        .ok_or("no base URL given (use --base-url or CANVAS_BASE_URL)")?;
    let token = config
        .target
        .token
        .clone()
        .ok_or("no token given (use --token or CANVAS_TOKEN)")?;

    tracing::info!(
        base_url = %base_url,
        passes = config.retries.passes,
        relays = config.ladder.relays.len(),
        "Configuration loaded"
    );

    let client = FetchClient::from_config(&config)?;

    match run(cli.command, client, &config, &base_url, &token).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::debug!(error = %e, "Command failed");
            eprintln!("Error: {}", describe(&e));
            std::process::exit(1);
        }
    }
}

async fn run(
    command: Commands,
    client: FetchClient,
    config: &FetchConfig,
    base_url: &str,
    token: &str,
) -> Result<(), FetchError> {
    match command {
        Commands::Validate => {
            let normalized = client.validate_credential(base_url, token).await?;
            print_json(&serde_json::json!({ "valid": true, "base_url": normalized }));
        }
        Commands::Courses => {
            let aggregator = AssignmentAggregator::new(client, config.api.clone());
            print_json(&aggregator.fetch_courses(base_url, token).await?);
        }
        Commands::Assignments => {
            let aggregator = AssignmentAggregator::new(client, config.api.clone());
            print_json(&aggregator.fetch_assignments(base_url, token).await?);
        }
        Commands::Get { endpoint } => {
            print_json(&client.fetch(&endpoint, base_url, token).await?);
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error: failed to serialize output: {}", e),
    }
}
