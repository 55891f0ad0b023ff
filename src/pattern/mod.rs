//! Pattern module for Sitegraph
//!
//! This module turns concrete paths into patterns, the identities of logical pages,
//! and holds the per-domain table of custom segment rules.

mod engine;
mod rules;

pub use engine::PatternEngine;
pub use rules::RuleTable;
