//! Scheduler for managing the crawl frontier and politeness delay
//!
//! This module handles:
//! - Breadth-first queue of requests to issue
//! - Deduplication of requested URLs
//! - Depth and page limits
//! - Minimum delay between two requests

use crate::config::CrawlerConfig;
use crate::state::RequestContext;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

/// A request queued for fetching
#[derive(Debug, Clone)]
pub struct QueuedRequest {
    /// The URL to fetch
    pub url: Url,

    /// Link distance from the crawl root
    pub depth: u32,

    /// Context handed to every anchor callback of this request
    pub context: RequestContext,
}

/// Scheduler manages the frontier queue and request pacing
///
/// Requests come out in the order they were queued, which yields a
/// breadth-first crawl.
pub struct Scheduler {
    /// Requests waiting to be issued
    frontier: VecDeque<QueuedRequest>,

    /// URLs already queued once, without fragment
    seen: HashSet<String>,

    /// Number of requests handed out
    issued: u32,

    /// When the previous request was handed out
    last_request: Option<Instant>,

    /// Crawler configuration
    config: CrawlerConfig,
}

impl Scheduler {
    /// Creates an empty scheduler
    pub fn new(config: CrawlerConfig) -> Self {
        Self {
            frontier: VecDeque::new(),
            seen: HashSet::new(),
            issued: 0,
            last_request: None,
            config,
        }
    }

    /// Queues a request unless its URL was queued before or it is too deep
    ///
    /// # Returns
    ///
    /// `true` if the request was queued
    pub fn enqueue(&mut self, url: Url, depth: u32, context: RequestContext) -> bool {
        if depth > self.config.max_depth {
            tracing::trace!("Not queueing {} (depth {} > {})", url, depth, self.config.max_depth);
            return false;
        }

        if !self.seen.insert(visit_key(&url)) {
            return false;
        }

        self.frontier.push_back(QueuedRequest {
            url,
            depth,
            context,
        });
        true
    }

    /// Gets the next request to issue
    ///
    /// Waits until the configured delay since the previous request has passed.
    ///
    /// # Returns
    ///
    /// * `Some(QueuedRequest)` - A request that may be issued now
    /// * `None` - The frontier is empty or the page limit is reached
    pub async fn next_request(&mut self) -> Option<QueuedRequest> {
        if self.issued >= self.config.max_pages {
            if !self.frontier.is_empty() {
                tracing::info!(
                    "Page limit of {} reached, {} requests left unvisited",
                    self.config.max_pages,
                    self.frontier.len()
                );
                self.frontier.clear();
            }
            return None;
        }

        let request = self.frontier.pop_front()?;

        if let Some(last) = self.last_request {
            let ready_at = last + Duration::from_millis(self.config.request_delay);
            tokio::time::sleep_until(ready_at).await;
        }
        self.last_request = Some(Instant::now());
        self.issued += 1;

        Some(request)
    }

    /// Number of requests waiting in the frontier
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// Returns true if no requests are waiting
    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Number of requests handed out so far
    pub fn issued(&self) -> u32 {
        self.issued
    }
}

/// URL identity used for deduplication
fn visit_key(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.to_string()
}
