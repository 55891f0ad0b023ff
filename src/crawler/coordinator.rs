//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop. Requests are processed one at a time,
//! so the link handler sees every anchor in discovery order and never
//! concurrently.

use crate::config::Config;
use crate::crawler::handler::{AnchorEvent, LinkHandler};
use crate::crawler::parser::parse_html;
use crate::crawler::scheduler::{QueuedRequest, Scheduler};
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::graph::SiteGraph;
use crate::pattern::RuleTable;
use crate::state::RequestContext;
use crate::url::parse_site_url;
use crate::Result;
use reqwest::Client;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    scheduler: Scheduler,
    client: Client,
    handler: LinkHandler,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `root_url` - The URL the crawl starts from
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator, root queued
    /// * `Err(SiteGraphError)` - Invalid root URL, rule, or HTTP client setup
    pub fn new(config: &Config, root_url: &str) -> Result<Self> {
        let root = parse_site_url(root_url)?;
        let rules = RuleTable::with_overrides(&config.rules);
        let mut handler = LinkHandler::new(&root, &rules)?;
        let client = build_http_client(config)?;

        let mut scheduler = Scheduler::new(config.crawler.clone());
        let context = handler.start(&root);
        scheduler.enqueue(root, 0, context);

        Ok(Self {
            scheduler,
            client,
            handler,
        })
    }

    /// The handler, with the graph built so far
    pub fn handler(&self) -> &LinkHandler {
        &self.handler
    }

    /// Runs the crawl loop until the frontier is exhausted
    ///
    /// Fetch failures are logged and skipped. Errors from the link handler
    /// abort the run.
    ///
    /// # Returns
    ///
    /// * `Ok(SiteGraph)` - The finished page graph
    /// * `Err(SiteGraphError)` - A fatal condition ended the crawl
    pub async fn run(mut self) -> Result<SiteGraph> {
        tracing::info!("Starting crawl of {}", self.handler.domain());
        let start_time = std::time::Instant::now();

        while let Some(request) = self.scheduler.next_request().await {
            self.process_request(request).await?;

            let issued = self.scheduler.issued();
            if issued % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages fetched, {} in frontier, {} logical pages",
                    issued,
                    self.scheduler.frontier_size(),
                    self.handler.graph().len()
                );
            }
        }

        tracing::info!(
            "Crawl completed: {} pages fetched in {:?}",
            self.scheduler.issued(),
            start_time.elapsed()
        );

        Ok(self.handler.into_graph())
    }

    /// Fetches one request and feeds its anchors to the handler
    async fn process_request(&mut self, request: QueuedRequest) -> Result<()> {
        let QueuedRequest {
            url,
            depth,
            mut context,
        } = request;
        tracing::debug!("Fetching {} (depth {})", url, depth);

        let (final_url, body) = match fetch_url(&self.client, &url).await {
            FetchResult::Success {
                final_url,
                status_code,
                body,
                ..
            } => {
                tracing::trace!("{} answered {} from {}", url, status_code, final_url);
                (final_url, body)
            }
            FetchResult::ContentMismatch { content_type } => {
                tracing::debug!("Skipping {}: expected HTML, got {}", url, content_type);
                return Ok(());
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("HTTP {} for {}", status_code, url);
                return Ok(());
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Failed to fetch {}: {}", url, error);
                return Ok(());
            }
        };

        self.handler.on_page(&mut context, &final_url)?;

        let parsed = parse_html(&body);
        if let Some(title) = &parsed.title {
            tracing::debug!("{}: {}", final_url, title);
        }

        for (index, href) in parsed.hrefs.into_iter().enumerate() {
            let event = AnchorEvent {
                request_url: final_url.clone(),
                href,
                depth,
                index,
            };
            let Some(visit) = self.handler.on_anchor(&mut context, &event)? else {
                continue;
            };
            self.queue_visit(&final_url, depth + 1, visit.href, visit.context);
        }

        Ok(())
    }

    fn queue_visit(&mut self, base: &Url, depth: u32, href: String, context: RequestContext) {
        match base.join(&href) {
            Ok(url) => {
                if self.scheduler.enqueue(url, depth, context) {
                    tracing::trace!("Queued {}", href);
                }
            }
            Err(e) => tracing::warn!("Cannot visit {}: {}", href, e),
        }
    }
}

/// Runs a complete crawl and returns the page graph
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `root_url` - The URL the crawl starts from
pub async fn run_crawl(config: &Config, root_url: &str) -> Result<SiteGraph> {
    Coordinator::new(config, root_url)?.run().await
}
