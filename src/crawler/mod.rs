//! Crawler module for web page fetching and processing
//!
//! This module contains the crawl engine and its link handler:
//! - The link handler, which turns anchors into page graph updates
//! - HTTP fetching with redirect following
//! - HTML anchor extraction
//! - Breadth-first scheduling and request pacing
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod handler;
mod parser;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use handler::{AnchorEvent, LinkHandler, Visit};
pub use parser::{parse_html, ParsedPage};
pub use scheduler::{QueuedRequest, Scheduler};

use crate::config::Config;
use crate::graph::SiteGraph;
use crate::SiteGraphError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Load the custom rules for the root's registrable domain
/// 2. Build the HTTP client
/// 3. Fetch pages breadth-first from the root
/// 4. Feed every anchor to the link handler and follow the visits it asks for
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `root_url` - The URL the crawl starts from
///
/// # Returns
///
/// * `Ok(SiteGraph)` - Crawl completed successfully
/// * `Err(SiteGraphError)` - Crawl failed
pub async fn crawl(config: &Config, root_url: &str) -> Result<SiteGraph, SiteGraphError> {
    run_crawl(config, root_url).await
}
