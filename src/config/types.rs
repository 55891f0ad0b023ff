use serde::Deserialize;

/// Main configuration structure for Sitegraph
///
/// Every section is optional; missing values take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub rules: Vec<RuleEntry>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum link depth from the root page
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of pages fetched in one run
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Minimum time between two requests (milliseconds)
    #[serde(rename = "request-delay")]
    pub request_delay: u64,

    /// Request timeout (seconds)
    pub timeout: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_pages: 500,
            request_delay: 200,
            timeout: 30,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "sitegraph".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(url) => format!("{}/{} (+{})", self.crawler_name, self.crawler_version, url),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON graph document
    #[serde(rename = "graph-path")]
    pub graph_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            graph_path: "webgraph.json".to_string(),
        }
    }
}

/// Custom pattern rules for one registrable domain
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleEntry {
    /// Registrable domain (e.g., "example.com")
    pub domain: String,

    /// Path-segment keywords whose following segment is generalized to `*`
    pub keywords: Vec<String>,
}
