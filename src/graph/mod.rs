//! Page graph module for Sitegraph
//!
//! The graph owns every logical page discovered during a crawl and the weighted
//! edges between them. Pages live in an arena indexed by [`PageId`]; a separate
//! index maps every known pattern (names and aliases alike) to its page.

mod page;

pub use page::{LogicalPage, PageId};

use crate::{GraphError, GraphResult};
use std::collections::HashMap;

/// Arena slot of a page
#[derive(Debug, Clone)]
enum Slot {
    Live(LogicalPage),
    /// Folded into another page by a redirect; the name resolves through the index
    Merged { name: String },
}

/// Deduplicated graph of logical pages
///
/// Invariants:
/// - every pattern in the index resolves to a live page
/// - every live page's name is in the index, mapped to itself
/// - no two live pages share a name
#[derive(Debug, Clone, Default)]
pub struct SiteGraph {
    slots: Vec<Slot>,
    by_pattern: HashMap<String, PageId>,
    root: Option<PageId>,
}

impl SiteGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page for `pattern` unless one is already known
    ///
    /// The first page ever added becomes the root of the graph.
    ///
    /// # Returns
    ///
    /// The id of the page `pattern` resolves to
    pub fn add_page(&mut self, pattern: &str) -> PageId {
        if let Some(&id) = self.by_pattern.get(pattern) {
            return id;
        }

        let id = self.slots.len();
        self.slots.push(Slot::Live(LogicalPage::new(id, pattern)));
        self.by_pattern.insert(pattern.to_string(), id);
        if self.root.is_none() {
            self.root = Some(id);
        }

        tracing::debug!("New page: {}", pattern);
        id
    }

    /// Returns true if `pattern` is a page name or alias
    pub fn has_page(&self, pattern: &str) -> bool {
        self.by_pattern.contains_key(pattern)
    }

    /// Records one observation of the edge `source` → `target`
    ///
    /// Both endpoints are created on demand; the first observation sets the
    /// weight to 1.
    pub fn add_link(&mut self, source: &str, target: &str) {
        let source_id = self.add_page(source);
        let target_id = self.add_page(target);
        if let Slot::Live(page) = &mut self.slots[source_id] {
            page.add_link(target_id);
        }
    }

    /// Records that a request for `before` was served as `after`
    ///
    /// - `after` unknown: it becomes an alias of `before`'s page, and its name if
    ///   shorter than the page's current name
    /// - `after` already the same page: nothing to do
    /// - `after` a different page: `before`'s page is removed and folds into it
    ///
    /// The length comparison is made against the current name, not `before`. When
    /// `before` is an alias, the page may already carry a shorter name from an
    /// earlier redirect, and a longer `after` must not replace it.
    ///
    /// Edges that targeted the removed page keep its old id; they resolve to the
    /// survivor at export time.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The redirect was recorded
    /// * `Err(GraphError)` - `before` is not a known page
    pub fn add_redirect(&mut self, before: &str, after: &str) -> GraphResult<()> {
        let before_id = *self
            .by_pattern
            .get(before)
            .ok_or_else(|| GraphError::UnknownRedirectSource(before.to_string()))?;

        match self.by_pattern.get(after).copied() {
            None => {
                self.by_pattern.insert(after.to_string(), before_id);
                if let Slot::Live(page) = &mut self.slots[before_id] {
                    page.add_alias(after);
                    if after.len() < page.name.len() {
                        tracing::debug!("Renaming page {} to {}", page.name, after);
                        page.rename(after);
                    } else {
                        tracing::debug!("New alias of {}: {}", page.name, after);
                    }
                }
            }
            Some(after_id) if after_id == before_id => {}
            Some(after_id) => self.merge(before_id, after_id),
        }

        Ok(())
    }

    /// Folds page `from` into page `into`
    fn merge(&mut self, from: PageId, into: PageId) {
        let Slot::Live(removed) = &self.slots[from] else {
            return;
        };
        let name = removed.name.clone();
        let Slot::Live(removed) = std::mem::replace(&mut self.slots[from], Slot::Merged { name })
        else {
            return;
        };

        if let Slot::Live(survivor) = &mut self.slots[into] {
            tracing::debug!("Merging page {} into {}", removed.name, survivor.name);

            for pattern in std::iter::once(&removed.name).chain(removed.aliases.iter()) {
                survivor.add_alias(pattern);
                self.by_pattern.insert(pattern.clone(), into);
            }
            for (&target, &weight) in &removed.links {
                *survivor.links.entry(target).or_insert(0) += weight;
            }
        }

        if self.root == Some(from) {
            self.root = Some(into);
        }
    }

    /// Resolves a possibly stale page id to the live page it denotes now
    ///
    /// Merged pages are followed through the pattern index by their old name.
    pub fn resolve_id(&self, id: PageId) -> Option<PageId> {
        let mut current = id;
        for _ in 0..=self.slots.len() {
            match self.slots.get(current)? {
                Slot::Live(_) => return Some(current),
                Slot::Merged { name } => current = *self.by_pattern.get(name)?,
            }
        }
        None
    }

    /// Returns the page `pattern` resolves to
    pub fn page(&self, pattern: &str) -> Option<&LogicalPage> {
        self.by_pattern
            .get(pattern)
            .and_then(|&id| self.page_by_id(id))
    }

    /// Returns the live page with the given id
    pub fn page_by_id(&self, id: PageId) -> Option<&LogicalPage> {
        match self.slots.get(id)? {
            Slot::Live(page) => Some(page),
            Slot::Merged { .. } => None,
        }
    }

    /// The crawl root, or None for an empty graph
    pub fn root(&self) -> Option<&LogicalPage> {
        self.root.and_then(|id| self.page_by_id(id))
    }

    /// Live pages in discovery order
    pub fn pages(&self) -> impl Iterator<Item = &LogicalPage> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Live(page) => Some(page),
            Slot::Merged { .. } => None,
        })
    }

    /// Number of live pages
    pub fn len(&self) -> usize {
        self.pages().count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of patterns known to the graph, names and aliases together
    pub fn pattern_count(&self) -> usize {
        self.by_pattern.len()
    }
}
