//! discerning-duck CLI
//!
//! Looks up a query on DuckDuckGo Instant Answers and prints the answer.

#![allow(clippy::print_stdout)]

mod config;
mod markup;
mod render;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use integration_duckduckgo::{DuckDuckGoClient, DuckDuckGoConfig, QuerySession};
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

/// discerning-duck CLI
#[derive(Parser)]
#[command(name = "discerning-duck")]
#[command(author, version, about = "DuckDuckGo instant answers in the terminal", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to ./discerning-duck.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Instant Answer API root
    #[arg(long)]
    api_root: Option<String>,

    /// User-Agent header sent with every request
    #[arg(long)]
    user_agent: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the answer as JSON
    #[arg(long)]
    json: bool,

    /// Query words; empty looks up "DuckDuckGo"
    query: Vec<String>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut DuckDuckGoConfig) {
        if let Some(api_root) = &self.api_root {
            config.api_root.clone_from(api_root);
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent.clone_from(user_agent);
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
    }

    fn query_string(&self) -> String {
        self.query.join(" ").trim().to_string()
    }
}

/// Maps verbosity count to a tracing filter level string
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays parseable
    let filter = log_filter_from_verbosity(cli.verbose);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut app_config =
        AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_overrides(&mut app_config.duckduckgo);

    let client = DuckDuckGoClient::new(app_config.duckduckgo)
        .context("invalid DuckDuckGo configuration")?;
    let session = QuerySession::new(Arc::new(client));

    let handle = session.handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling query");
            handle.cancel();
        }
    });

    let query = cli.query_string();
    match session.run(&query).await {
        Ok(_) if session.is_cancelled() => {
            println!("⏹️  Query cancelled");
            std::process::exit(130);
        },
        Ok(answer) if cli.json => {
            println!("{}", serde_json::to_string_pretty(&answer)?);
        },
        Ok(answer) if answer.is_empty() => {
            println!("No results");
        },
        Ok(answer) => {
            let mut stdout = std::io::stdout().lock();
            render::write_answer(&mut stdout, &answer)?;
        },
        Err(e) => {
            error!(error = %e, query = %query, "Query failed");
            println!("❌ Query failed, run with -v for details");
            std::process::exit(1);
        },
    }

    Ok(())
}
