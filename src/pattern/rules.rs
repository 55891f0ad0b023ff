use crate::config::RuleEntry;
use std::collections::HashMap;

/// Built-in custom rules, keyed by registrable domain
///
/// Each keyword names a path segment whose following segment is site-specific
/// (an author name, a tag, a shop) and collapses to `*`.
const BUILTIN_RULES: &[(&str, &[&str])] = &[
    ("toscrape.com", &["author", "tag", "catalogue"]),
    ("yohobuy.com", &["shop", "tags"]),
    ("ruanyifeng.com", &["blog", "survivor", "road"]),
];

/// Static table of custom path-segment keywords per registrable domain
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    entries: HashMap<String, Vec<String>>,
}

impl RuleTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the table of built-in rules
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (domain, keywords) in BUILTIN_RULES {
            table.insert(domain, keywords.iter().map(|k| k.to_string()).collect());
        }
        table
    }

    /// Creates the built-in table with configured entries layered on top
    ///
    /// A configured entry replaces the built-in keyword list of the same domain.
    pub fn with_overrides(entries: &[RuleEntry]) -> Self {
        let mut table = Self::builtin();
        for entry in entries {
            table.insert(&entry.domain, entry.keywords.clone());
        }
        table
    }

    /// Sets the keyword list for a domain
    pub fn insert(&mut self, domain: &str, keywords: Vec<String>) {
        self.entries.insert(domain.to_lowercase(), keywords);
    }

    /// Returns the keywords for a registrable domain, empty if it has no entry
    pub fn keywords_for(&self, domain: &str) -> &[String] {
        self.entries
            .get(&domain.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of domains with rules
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
