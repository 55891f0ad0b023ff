//! Anchor handler
//!
//! The handler is the only place where crawl events reach the page graph. The
//! crawl engine calls it synchronously, one anchor at a time, and receives back
//! the hrefs worth visiting next.

use crate::graph::SiteGraph;
use crate::output::{export, GraphDocument};
use crate::pattern::{PatternEngine, RuleTable};
use crate::state::RequestContext;
use crate::url::{classify_href, registrable_domain, site_path, LinkTarget};
use crate::Result;
use url::Url;

/// Prefix of patterns that denote the main page again
const INDEX_PREFIX: &str = "/index.htm";

/// One anchor discovered on a fetched page
#[derive(Debug, Clone)]
pub struct AnchorEvent {
    /// URL the page was served from, after redirects
    pub request_url: Url,
    /// Raw `href` attribute value
    pub href: String,
    /// Crawl depth of the page
    pub depth: u32,
    /// Position of the anchor on its page, starting at 0
    pub index: usize,
}

/// Command to visit a newly discovered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    /// The href exactly as it appeared on the page
    pub href: String,
    /// Context for the spawned request
    pub context: RequestContext,
}

/// Turns crawl events into page graph mutations
#[derive(Debug)]
pub struct LinkHandler {
    graph: SiteGraph,
    engine: PatternEngine,
    domain: String,
}

impl LinkHandler {
    /// Creates a handler for a crawl rooted at `root_url`
    ///
    /// Custom rules for the root's registrable domain are loaded from `rules`
    /// once, here.
    ///
    /// # Arguments
    ///
    /// * `root_url` - The crawl root
    /// * `rules` - Custom rule table keyed by registrable domain
    ///
    /// # Returns
    ///
    /// * `Ok(LinkHandler)` - Handler with an empty graph
    /// * `Err(SiteGraphError)` - The root has no host or a rule does not compile
    pub fn new(root_url: &Url, rules: &RuleTable) -> Result<Self> {
        let domain = registrable_domain(root_url)?;
        let engine = PatternEngine::for_domain(&domain, rules)?;
        tracing::debug!(
            "Loaded {} custom rules for {}",
            engine.custom_rule_count(),
            domain
        );

        Ok(Self {
            graph: SiteGraph::new(),
            engine,
            domain,
        })
    }

    /// Registrable domain of the crawl
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn engine(&self) -> &PatternEngine {
        &self.engine
    }

    pub fn graph(&self) -> &SiteGraph {
        &self.graph
    }

    pub fn into_graph(self) -> SiteGraph {
        self.graph
    }

    /// Renumbers and serializes the graph built so far
    pub fn export(&self) -> GraphDocument {
        export(&self.graph)
    }

    /// Registers the root page and returns the root request's context
    pub fn start(&mut self, root_url: &Url) -> RequestContext {
        let path = site_path(root_url);
        let pattern = self.engine.canonicalize(&path);
        self.graph.add_page(&pattern);
        tracing::info!("Root page: {}", pattern);
        RequestContext::for_request(&path, &pattern)
    }

    /// Runs the redirect check of a request
    ///
    /// Does nothing after the first call for the same context. When the served
    /// URL's pattern differs from the one the request was recorded under, the
    /// graph learns the redirect. Redirects that leave the site are ignored.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The request's context
    /// * `served_url` - The URL the server actually answered from
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The check ran or was already done
    /// * `Err(SiteGraphError)` - The request's pattern is not a known page
    pub fn on_page(&mut self, ctx: &mut RequestContext, served_url: &Url) -> Result<()> {
        if !ctx.state().is_pending() {
            return Ok(());
        }
        ctx.resolve();

        let Some(before) = ctx.pattern().map(str::to_string) else {
            return Ok(());
        };
        let served_path = match classify_href(served_url, served_url.as_str(), &self.domain)? {
            LinkTarget::Page(path) => path,
            other => {
                tracing::debug!("Redirect from {} leaves the site: {:?}", before, other);
                return Ok(());
            }
        };
        if ctx.path() == Some(served_path.as_str()) {
            return Ok(());
        }

        let after = self.engine.canonicalize(&served_path);
        if after != before {
            tracing::debug!("Redirect: {} -> {}", before, after);
            self.graph.add_redirect(&before, &after)?;
        }
        Ok(())
    }

    /// Handles one anchor of a fetched page
    ///
    /// The first anchor of a request also runs the redirect check, using the
    /// event's request URL as the served URL.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The context of the request the anchor was found on
    /// * `event` - The anchor
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Visit))` - The target is a new page of the site
    /// * `Ok(None)` - The anchor was recorded or skipped; nothing to visit
    /// * `Err(SiteGraphError)` - The href cannot be resolved, or the redirect
    ///   check failed
    pub fn on_anchor(
        &mut self,
        ctx: &mut RequestContext,
        event: &AnchorEvent,
    ) -> Result<Option<Visit>> {
        self.on_page(ctx, &event.request_url)?;

        let source = match ctx.pattern() {
            Some(pattern) => pattern.to_string(),
            None => self.engine.canonicalize(&site_path(&event.request_url)),
        };

        let (path, pattern, visitable) =
            match classify_href(&event.request_url, &event.href, &self.domain)? {
                LinkTarget::Skip(reason) => {
                    tracing::trace!("Skipping {} ({})", event.href, reason);
                    return Ok(None);
                }
                LinkTarget::Tenant(host_path) => {
                    let pattern = self.engine.canonicalize(&host_path);
                    (host_path, pattern, false)
                }
                LinkTarget::Page(path) => {
                    let pattern = self.engine.canonicalize(&path);
                    (path, pattern, true)
                }
            };

        if pattern == source || self.same_page(&source, &pattern) {
            return Ok(None);
        }
        if pattern.starts_with(INDEX_PREFIX) {
            return Ok(None);
        }

        let known = self.graph.has_page(&pattern);
        self.graph.add_link(&source, &pattern);
        tracing::trace!(
            "[depth {} #{}] {} -> {}",
            event.depth,
            event.index,
            source,
            pattern
        );

        if known || !visitable {
            return Ok(None);
        }
        Ok(Some(Visit {
            href: event.href.clone(),
            context: RequestContext::for_request(&path, &pattern),
        }))
    }

    /// Returns true if both patterns already resolve to one page
    fn same_page(&self, a: &str, b: &str) -> bool {
        match (self.graph.page(a), self.graph.page(b)) {
            (Some(x), Some(y)) => x.id() == y.id(),
            _ => false,
        }
    }
}
