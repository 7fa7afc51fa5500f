//! Repocrawl command-line interface.
//!
//! Reads a search request from stdin and prints the results as JSON:
//!
//! ```bash
//! echo '{"keywords": ["nginx"], "result_type": "Repositories"}' | repocrawl
//! ```
//!
//! Logs go to stderr. Set `RUST_LOG=debug` for per-request detail.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use repocrawl::prelude::*;
use repocrawl::process::{read_request, render_records};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "repocrawl")]
#[command(about = "Search a code-hosting site and extract result links and language stats")]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(long, env = "REPOCRAWL_CONFIG")]
    config: Option<PathBuf>,

    /// Host to search instead of the configured one
    #[arg(long)]
    host: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<f64>,

    /// Only list result links, without visiting repository pages
    #[arg(long)]
    no_extra: bool,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<CrawlerConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            CrawlerConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => CrawlerConfig::default(),
    };

    if let Some(host) = &cli.host {
        config.host.clone_from(host);
    }
    if let Some(timeout) = cli.timeout {
        config.fetch.timeout_seconds = timeout;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = load_config(&cli)?;
    let request = read_request(io::stdin().lock()).context("reading request from stdin")?;
    tracing::info!(
        keywords = ?request.keywords,
        result_type = %request.result_type,
        host = %config.host,
        "Request received"
    );

    let records = if cli.no_extra {
        Crawler::http(&config.for_request(&request))?
            .search(&request)
            .await?
    } else {
        Crawler::oneshot(&request, &config).await?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", render_records(&records)?)?;
    Ok(())
}
