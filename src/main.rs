//! Payhip Scraper main entry point
//!
//! This is the command-line interface for the Payhip product scraper.

use anyhow::Context;
use clap::Parser;
use payhip_scraper::config::{load_or_default, Config};
use payhip_scraper::crawler::{crawl, Coordinator};
use payhip_scraper::output::ExportFormat;
use payhip_scraper::prompt::{
    finish_run, resolve_export, resolve_settings, resolve_target, Prompt, StdinPrompt,
};
use payhip_scraper::url::CrawlTarget;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Payhip Scraper: export a store's products to JSON or CSV
///
/// Crawls every page of a Payhip store's collection, fetches each product's
/// description and writes the results to a file. Any value not given on the
/// command line is asked for interactively.
#[derive(Parser, Debug)]
#[command(name = "payhip-scraper")]
#[command(version)]
#[command(about = "Scrape Payhip product pages and export them as JSON or CSV", long_about = None)]
struct Cli {
    /// Store URL, e.g. https://payhip.com/<username>/collection/all
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Seconds to wait after each product
    #[arg(short, long, value_name = "SECS")]
    delay: Option<u64>,

    /// Export format
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Export file name, without extension
    #[arg(short, long, value_name = "NAME")]
    output: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Resolve the page count and show what would be crawled without scraping
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Invalid built-in configuration".to_string(),
    })?;

    let mut prompt = StdinPrompt;
    print_banner();

    let target = resolve_target(cli.url.as_deref(), &config.site, &mut prompt)
        .context("No valid store URL entered")?;

    if cli.dry_run {
        return handle_dry_run(&config, &target).await;
    }

    handle_crawl(&cli, &config, target, &mut prompt).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("payhip_scraper=info,warn"),
            1 => EnvFilter::new("payhip_scraper=debug,info"),
            2 => EnvFilter::new("payhip_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn print_banner() {
    println!("Payhip Scraper v{}", env!("CARGO_PKG_VERSION"));
    println!("Scrape Payhip product pages and export data in JSON or CSV.");
    println!("----------------------------------------------------------");
}

/// Handles the --dry-run mode: shows the configuration and the pages that would be crawled
async fn handle_dry_run(config: &Config, target: &CrawlTarget) -> anyhow::Result<()> {
    println!("=== Payhip Scraper Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Page size: {}", config.site.page_size);
    println!("  Default delay: {}s", config.crawler.delay_seconds);
    println!(
        "  Description attempts: {} ({}ms apart)",
        config.crawler.description_attempts, config.crawler.retry_interval_ms
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  User agent: {}", config.user_agent.header);

    let coordinator = Coordinator::new(config, Duration::ZERO)?;
    let pages = coordinator.plan_pages(target).await;

    println!("\nListing pages ({}):", pages.len());
    for page in &pages {
        println!("  - {}", page);
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(
    cli: &Cli,
    config: &Config,
    target: CrawlTarget,
    prompt: &mut dyn Prompt,
) -> anyhow::Result<()> {
    let settings = resolve_settings(target, cli.delay, &config.crawler, prompt)?;

    tracing::info!(
        "Starting crawl of {} ({}s between products)",
        settings.target,
        settings.delay.as_secs()
    );
    let output = crawl(config, &settings).await?;

    let choice = resolve_export(cli.format, cli.output.as_deref(), prompt)?;
    finish_run(&output, &choice, Path::new("."), prompt);

    Ok(())
}
