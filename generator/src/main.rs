//! Folkbörsen feed generator
//!
//! Scrapes the press release listing, optionally enriches the newest
//! releases from their article pages and writes `folkborsen_feed.xml`,
//! the file the feed API serves. When scraping fails a deterministic
//! sample feed is written instead so scheduled runs never leave the
//! deployment without a feed.

mod article;
mod client;
mod html;
mod listing;
mod models;
mod robots;
mod rss;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use client::{PageClient, LISTING_TIMEOUT};
use models::PressRelease;
use rss::FeedMeta;

#[derive(Debug, Parser)]
#[command(name = "folkborsen-generator", version, about = "Generate the Folkbörsen RSS feed")]
struct Cli {
    /// Where to write the feed
    #[arg(short, long, default_value = "folkborsen_feed.xml")]
    output: PathBuf,

    /// Press release listing to scrape
    #[arg(long, default_value = listing::LISTING_URL)]
    listing_url: String,

    /// Parse a saved listing page instead of fetching it
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,

    /// Keep releases hidden with `display: none`
    #[arg(long)]
    include_hidden: bool,

    /// Number of article pages to fetch for richer titles (0 disables)
    #[arg(long, default_value_t = 1)]
    enrich: usize,

    /// Pause between article fetches, in milliseconds
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,

    /// Also drop releases whose normalised titles repeat
    #[arg(long)]
    dedupe_by_title: bool,

    /// Print the scraped items as JSON instead of writing the feed
    #[arg(long)]
    json: bool,
}

async fn scrape(cli: &Cli, client: &PageClient) -> Result<Vec<PressRelease>> {
    let page = match &cli.html {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => client.get_text(&cli.listing_url, LISTING_TIMEOUT).await?,
    };

    let mut items = listing::parse_listing(&page, cli.include_hidden)?;
    tracing::info!(count = items.len(), "Scraped press releases");

    if cli.enrich > 0 {
        tracing::info!(max = cli.enrich, "Enriching items from article pages");
        article::enrich_with_articles(
            client,
            &mut items,
            cli.enrich,
            Duration::from_millis(cli.delay_ms),
        )
        .await;
    }

    Ok(items)
}

/// Scrape, generate and write the feed (or print items with `--json`).
///
/// Scraping failures are absorbed into the sample feed; only writing the
/// output can fail the run.
async fn run(cli: &Cli) -> Result<()> {
    let client = PageClient::new()?;

    let items = match scrape(cli, &client).await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(error = %e, "Scraping failed, falling back to sample feed");
            PressRelease::samples(&Utc::now().date_naive().to_string())
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    let xml = rss::generate_rss(&items, &FeedMeta::default(), cli.dedupe_by_title)?;
    tokio::fs::write(&cli.output, xml)
        .await
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    tracing::info!(path = %cli.output.display(), items = items.len(), "Wrote feed");

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr, stdout carries --json output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli).await
}
