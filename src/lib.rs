//! Sitegraph: a structural site mapper
//!
//! This crate crawls a web site from a root URL and builds a deduplicated graph of
//! its logical pages. Concrete URLs that differ only by numeric ids, query values or
//! site-specific segments collapse into one pattern, and redirects fold the requested
//! page into the page the server actually served.

pub mod config;
pub mod crawler;
pub mod graph;
pub mod output;
pub mod pattern;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sitegraph operations
#[derive(Debug, Error)]
pub enum SiteGraphError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Pattern rule error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid rule entry: {0}")]
    InvalidRule(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Page graph errors
///
/// These indicate that the caller broke a precondition of the graph and abort the run.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Redirect source is not a known page: {0}")]
    UnknownRedirectSource(String),
}

/// Result type alias for Sitegraph operations
pub type Result<T> = std::result::Result<T, SiteGraphError>;

/// Result type alias for page graph operations
pub type GraphResult<T> = std::result::Result<T, GraphError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{AnchorEvent, LinkHandler, Visit};
pub use graph::{LogicalPage, PageId, SiteGraph};
pub use output::{export, GraphDocument};
pub use pattern::{PatternEngine, RuleTable};
pub use state::{RequestContext, RequestState};
pub use url::{classify_href, registrable_domain, strip_domain, LinkTarget, SkipReason};
