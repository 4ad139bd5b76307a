//! search-blocks - compile block sets and query the upstream services
//!
//! Subcommands:
//! - `compile`: read blocks as JSON and print the query and its search URL
//! - `translate`: turn free text into blocks through the natural-language service
//! - `search`: fetch and analyze tweets for a query

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use search_blocks::compiler::compile;
use search_blocks::ingest::{ingest_now, parse_block_list, RawBlock};
use search_blocks::services::{
    search_url, AiSearchRequest, HttpSearchService, NaturalLanguageRequest, SearchMode,
    ServiceConfig,
};

#[derive(Parser, Debug)]
#[command(name = "search-blocks")]
#[command(about = "Compile search blocks into a query string")]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile blocks from a JSON file (or stdin) into a query
    Compile {
        /// `{"blocks": [...]}` or a bare array of `{type, value}` objects
        #[arg(long)]
        file: Option<PathBuf>,

        /// Result ordering for the search URL (latest, top)
        #[arg(long, default_value = "latest")]
        mode: SearchMode,

        /// Search front-end base URL
        #[arg(long, env = "SEARCH_BASE_URL", default_value = "https://x.com")]
        base_url: String,
    },

    /// Convert a natural-language request into blocks and a query
    Translate {
        text: String,
    },

    /// Fetch and analyze tweets for a compiled query
    Search {
        query: String,

        #[arg(long, default_value = "latest")]
        section: String,

        #[arg(long, default_value_t = 5)]
        limit: u32,
    },
}

fn read_blocks(file: Option<&PathBuf>) -> anyhow::Result<Vec<RawBlock>> {
    let mut payload = String::new();
    match file {
        Some(path) => {
            payload = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
        }
        None => {
            std::io::stdin()
                .read_to_string(&mut payload)
                .context("reading stdin")?;
        }
    }

    parse_block_list(&payload).context("expected {\"blocks\": [...]} or an array of blocks")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("search_blocks={},warn", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match args.command {
        Command::Compile {
            file,
            mode,
            base_url,
        } => {
            let raw = read_blocks(file.as_ref())?;
            debug!(blocks = raw.len(), "read blocks");

            let blocks = ingest_now(raw);
            let query = compile(&blocks);
            if query.is_empty() {
                bail!("blocks compile to an empty query");
            }

            println!("{}", query);
            if let Some(url) = search_url(&base_url, &query, mode) {
                println!("{}", url);
            }
        }

        Command::Translate { text } => {
            let config = ServiceConfig::from_env()?;
            let service = HttpSearchService::from_config(&config);

            let response = service
                .natural_language(NaturalLanguageRequest::new(text))
                .await
                .map_err(|e| anyhow::anyhow!(e.to_body(config.dev_mode).error))?;

            info!(blocks = response.blocks.len(), "translated");
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Command::Search {
            query,
            section,
            limit,
        } => {
            let config = ServiceConfig::from_env()?;
            let service = HttpSearchService::from_config(&config);

            let request = AiSearchRequest {
                section: Some(section),
                limit: Some(limit.into()),
                ..AiSearchRequest::new(query.clone())
            };
            let response = service.ai_search(request).await.map_err(|e| {
                let mut body = e.to_body(config.dev_mode);
                if !e.is_validation() {
                    body = body.with_query(query);
                }
                debug!(body = ?body, "search failed");
                anyhow::anyhow!(
                    "{}{}",
                    body.error,
                    body.error_detail.map(|d| format!(": {}", d)).unwrap_or_default()
                )
            })?;

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
