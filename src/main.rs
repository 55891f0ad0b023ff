//! Sitegraph main entry point
//!
//! This is the command-line interface for the Sitegraph structural site mapper.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use sitegraph::config::{load_config_with_hash, Config};
use sitegraph::crawler::crawl;
use sitegraph::output::{export, print_statistics, GraphStatistics, GraphWriter, JsonGraphWriter};
use sitegraph::url::{parse_site_url, registrable_domain};
use sitegraph::RuleTable;

/// Sitegraph: a structural site mapper
///
/// Sitegraph crawls a web site from a root URL and writes a graph of its
/// logical pages. URLs differing only by ids, query values or site-specific
/// segments collapse into one page; redirects merge pages.
#[derive(Parser, Debug)]
#[command(name = "sitegraph")]
#[command(version)]
#[command(about = "A structural site mapper", long_about = None)]
struct Cli {
    /// Root URL of the crawl
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the JSON graph (overrides the configuration)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Maximum link depth from the root (overrides the configuration)
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(depth) = cli.max_depth {
        config.crawler.max_depth = depth;
    }
    if let Some(output) = &cli.output {
        config.output.graph_path = output.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config, &cli.url)
    } else {
        handle_crawl(&config, &cli.url).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitegraph=info,warn"),
            1 => EnvFilter::new("sitegraph=debug,info"),
            2 => EnvFilter::new("sitegraph=trace,debug"),
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

/// Handles the --dry-run mode: validates input and shows what would be crawled
fn handle_dry_run(config: &Config, url: &str) -> anyhow::Result<()> {
    let root = parse_site_url(url)?;
    let domain = registrable_domain(&root)?;
    let rules = RuleTable::with_overrides(&config.rules);

    println!("=== Sitegraph Dry Run ===\n");

    println!("Root: {}", root);
    println!("Registrable domain: {}", domain);

    println!("\nCrawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Request delay: {}ms", config.crawler.request_delay);
    println!("  Timeout: {}s", config.crawler.timeout);

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Graph: {}", config.output.graph_path);

    let keywords = rules.keywords_for(&domain);
    println!("\nCustom Rules for {} ({}):", domain, keywords.len());
    for keyword in keywords {
        println!("  - /{}/*", keyword);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, url: &str) -> anyhow::Result<()> {
    tracing::info!(
        "Max depth: {}, max pages: {}",
        config.crawler.max_depth,
        config.crawler.max_pages
    );

    let graph = match crawl(config, url).await {
        Ok(graph) => graph,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let document = export(&graph);
    let writer = JsonGraphWriter::new(Path::new(&config.output.graph_path));
    writer
        .write(&document)
        .with_context(|| format!("Failed to write graph to {}", writer.path().display()))?;

    print_statistics(&GraphStatistics::collect(&graph, &document));

    Ok(())
}
