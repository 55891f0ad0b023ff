//! Statistics over a finished page graph

use crate::graph::SiteGraph;
use crate::output::GraphDocument;

/// Graph statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStatistics {
    /// Number of logical pages
    pub pages: usize,

    /// Number of distinct edges
    pub links: usize,

    /// Sum of all edge weights (hyperlinks observed)
    pub observed_links: u64,

    /// Number of alias patterns across all pages
    pub aliases: usize,

    /// Page with the most incoming observations, with that count
    pub most_linked: Option<(String, u64)>,
}

impl GraphStatistics {
    /// Collects statistics from a graph and its exported document
    pub fn collect(graph: &SiteGraph, document: &GraphDocument) -> Self {
        let mut incoming = vec![0u64; document.nodes.len()];
        for link in &document.links {
            incoming[link.target] += u64::from(link.value);
        }

        let most_linked = incoming
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(&a.0)))
            .map(|(index, &count)| (document.nodes[index].name.clone(), count));

        Self {
            pages: document.nodes.len(),
            links: document.links.len(),
            observed_links: document.links.iter().map(|l| u64::from(l.value)).sum(),
            aliases: graph.pages().map(|p| p.aliases().len()).sum(),
            most_linked,
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &GraphStatistics) {
    println!("=== Site Graph Statistics ===\n");
    println!("  Logical pages: {}", stats.pages);
    println!("  Distinct links: {}", stats.links);
    println!("  Hyperlinks observed: {}", stats.observed_links);
    println!("  Alias patterns: {}", stats.aliases);
    if let Some((name, count)) = &stats.most_linked {
        println!("  Most linked page: {} ({} links in)", name, count);
    }
}
