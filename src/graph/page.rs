use std::collections::BTreeMap;

/// Stable page identifier, assigned at creation
///
/// Ids are never reused. A page removed by a redirect merge leaves its id behind,
/// and the exporter renumbers surviving pages densely.
pub type PageId = usize;

/// A logical page: one node of the site graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalPage {
    pub(crate) id: PageId,
    pub(crate) name: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) links: BTreeMap<PageId, u32>,
}

impl LogicalPage {
    pub(crate) fn new(id: PageId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            aliases: Vec::new(),
            links: BTreeMap::new(),
        }
    }

    /// Id assigned when the page was created
    pub fn id(&self) -> PageId {
        self.id
    }

    /// The pattern chosen to represent this page
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Other patterns that resolve to this page, in the order they were added
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Outgoing edges: target id (as recorded) to number of observations
    ///
    /// Target ids may refer to pages merged away since the edge was recorded;
    /// resolve them through [`SiteGraph::resolve_id`](crate::graph::SiteGraph::resolve_id).
    pub fn links(&self) -> &BTreeMap<PageId, u32> {
        &self.links
    }

    /// Returns true if `pattern` is this page's name or one of its aliases
    pub fn answers_to(&self, pattern: &str) -> bool {
        self.name == pattern || self.aliases.iter().any(|a| a == pattern)
    }

    /// Adds an alias unless the page already answers to it
    pub(crate) fn add_alias(&mut self, pattern: &str) {
        if !self.answers_to(pattern) {
            self.aliases.push(pattern.to_string());
        }
    }

    /// Makes `pattern` the page name, keeping the old name as an alias
    pub(crate) fn rename(&mut self, pattern: &str) {
        if self.name == pattern {
            return;
        }
        self.aliases.retain(|a| a != pattern);
        let old = std::mem::replace(&mut self.name, pattern.to_string());
        self.aliases.push(old);
    }

    /// Records one more observation of the edge to `target`
    pub(crate) fn add_link(&mut self, target: PageId) {
        *self.links.entry(target).or_insert(0) += 1;
    }
}
