//! Output module for exporting the site graph
//!
//! This module handles:
//! - Renumbering and flattening the page graph into a node/link document
//! - Writing the document as JSON
//! - Summarizing the graph for the terminal

mod document;
mod json;
pub mod stats;
mod traits;

pub use document::{export, GraphDocument, Link, Node, NodeGroup};
pub use json::{write_graph_json, JsonGraphWriter};
pub use stats::{print_statistics, GraphStatistics};
pub use traits::{GraphWriter, OutputError, OutputResult};
