use crate::pattern::RuleTable;
use regex::Regex;
use std::sync::LazyLock;

/// `/page#tag` and `/page/#tag` both become `/page`
static FRAGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/?#.*$").unwrap_or_else(|_| panic!("Invalid Regex")));

static QUERY_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=[^&=]*").unwrap_or_else(|_| panic!("Invalid Regex")));

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").unwrap_or_else(|_| panic!("Invalid Regex")));

/// Last segment before an `.htm`/`.html` extension
static HTML_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*/)[^./]*(\.html?.*)$").unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Turns concrete paths into patterns
///
/// The engine is pure apart from the custom rules it is built with, which are
/// compiled once per crawl from the rule table entry of the crawled domain.
#[derive(Debug, Clone, Default)]
pub struct PatternEngine {
    custom: Vec<Regex>,
}

impl PatternEngine {
    /// Creates an engine with custom rules for the given keywords
    ///
    /// # Arguments
    ///
    /// * `keywords` - Literal path segments whose following segment is generalized
    ///
    /// # Returns
    ///
    /// * `Ok(PatternEngine)` - Engine with one compiled rule per keyword
    /// * `Err(regex::Error)` - A rule failed to compile
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self, regex::Error> {
        let custom = keywords
            .iter()
            .map(|keyword| {
                Regex::new(&format!(
                    r"(^|/)({})/[^/?]+",
                    regex::escape(keyword.as_ref())
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { custom })
    }

    /// Creates an engine with the custom rules the table holds for `domain`
    pub fn for_domain(domain: &str, table: &RuleTable) -> Result<Self, regex::Error> {
        let keywords = table.keywords_for(domain);
        if !keywords.is_empty() {
            tracing::debug!("Loaded {} custom rules for {}", keywords.len(), domain);
        }
        Self::new(keywords)
    }

    /// Number of custom rules loaded
    pub fn custom_rule_count(&self) -> usize {
        self.custom.len()
    }

    /// Converts a path (with optional query) into its pattern
    ///
    /// # Rule Order
    ///
    /// 1. Strip the fragment and the slash preceding it
    /// 2. Custom rules: `/author/alice` → `/author/*`
    /// 3. Query values: `/query?id=123` → `/query?id=*`
    /// 4. Digit runs: `/page/123` → `/page/*`
    /// 5. Only if a `*` is present by now: `/vip/gd*.html` → `/vip/*.html`
    ///
    /// # Examples
    ///
    /// ```
    /// use sitegraph::pattern::PatternEngine;
    ///
    /// let engine = PatternEngine::default();
    /// assert_eq!(engine.canonicalize("/tag/5"), "/tag/*");
    /// assert_eq!(engine.canonicalize("/query?id=123"), "/query?id=*");
    /// ```
    pub fn canonicalize(&self, path: &str) -> String {
        let mut pattern = FRAGMENT_RE.replace(path, "").into_owned();

        for re in &self.custom {
            pattern = re.replace_all(&pattern, "${1}${2}/*").into_owned();
        }

        if let Some((head, query)) = pattern.split_once('?') {
            pattern = format!("{}?{}", head, QUERY_VALUE_RE.replace_all(query, "=*"));
        }

        pattern = DIGITS_RE.replace_all(&pattern, "*").into_owned();

        if pattern.contains('*') {
            pattern = HTML_NAME_RE.replace(&pattern, "${1}*${2}").into_owned();
        }

        pattern
    }
}
