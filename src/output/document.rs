//! Graph export
//!
//! Renumbers the surviving pages densely and flattens the page graph into a
//! node/link document for visualization.

use crate::graph::{PageId, SiteGraph};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Role of a node in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeGroup {
    /// The crawl root
    Home,
    /// Any other page
    Page,
}

/// A page in the exported document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Dense 0-based id; the root is always 0
    pub id: usize,
    /// Display name (the page pattern)
    pub name: String,
    pub group: NodeGroup,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

/// A weighted edge in the exported document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub source: usize,
    pub target: usize,
    /// Number of times the edge was observed, at least 1
    pub value: u32,
}

/// Node/link document of a finished crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphDocument {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl GraphDocument {
    /// Finds a node by name or alias
    pub fn node(&self, pattern: &str) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|n| n.name == pattern || n.aliases.iter().any(|a| a == pattern))
    }

    /// Weight of the link between two node ids, if any
    pub fn link_weight(&self, source: usize, target: usize) -> Option<u32> {
        self.links
            .iter()
            .find(|l| l.source == source && l.target == target)
            .map(|l| l.value)
    }
}

/// Exports the page graph as a node/link document
///
/// # Algorithm
///
/// 1. Number the root 0, then every other surviving page in discovery order
/// 2. Resolve every recorded edge target through the pattern index, since a
///    redirect merge may have removed the page the edge was recorded against
/// 3. Sum edges that now share a (source, target) pair; drop edges that merging
///    turned into self loops
///
/// # Arguments
///
/// * `graph` - The page graph of a finished crawl
///
/// # Returns
///
/// The document, with links sorted by source then target
pub fn export(graph: &SiteGraph) -> GraphDocument {
    let root_id = graph.root().map(|p| p.id());
    let ordered: Vec<_> = root_id
        .and_then(|id| graph.page_by_id(id))
        .into_iter()
        .chain(graph.pages().filter(|p| Some(p.id()) != root_id))
        .collect();

    let dense: HashMap<PageId, usize> = ordered
        .iter()
        .enumerate()
        .map(|(index, page)| (page.id(), index))
        .collect();

    let nodes = ordered
        .iter()
        .enumerate()
        .map(|(index, page)| Node {
            id: index,
            name: page.name().to_string(),
            group: if Some(page.id()) == root_id {
                NodeGroup::Home
            } else {
                NodeGroup::Page
            },
            aliases: page.aliases().to_vec(),
        })
        .collect();

    let mut weights: BTreeMap<(usize, usize), u32> = BTreeMap::new();
    for page in &ordered {
        let source = dense[&page.id()];
        for (&recorded, &weight) in page.links() {
            let Some(target) = graph.resolve_id(recorded).and_then(|id| dense.get(&id)) else {
                tracing::warn!("Dropping edge from {} to unknown page {}", page.name(), recorded);
                continue;
            };
            if *target == source {
                tracing::trace!("Dropping self loop on {}", page.name());
                continue;
            }
            *weights.entry((source, *target)).or_insert(0) += weight;
        }
    }

    let links = weights
        .into_iter()
        .map(|((source, target), value)| Link {
            source,
            target,
            value,
        })
        .collect();

    GraphDocument { nodes, links }
}
