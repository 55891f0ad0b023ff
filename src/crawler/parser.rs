//! HTML parser for extracting anchors and metadata
//!
//! Hrefs are returned exactly as written. Deciding what they point to is the
//! link handler's job, so nothing is resolved or filtered here beyond anchors
//! marked as downloads.

use scraper::{Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Raw `href` values of the page's anchors, in document order
    pub hrefs: Vec<String>,
}

/// Parses HTML content and extracts anchors and the title
///
/// # Arguments
///
/// * `html` - The HTML content to parse
///
/// # Returns
///
/// The page title and the raw hrefs of every `<a href>` without a `download`
/// attribute
///
/// # Example
///
/// ```
/// use sitegraph::crawler::parse_html;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let parsed = parse_html(html);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.hrefs, ["/page"]);
/// ```
pub fn parse_html(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        hrefs: extract_hrefs(&document),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts the href of every anchor
fn extract_hrefs(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter(|element| element.value().attr("download").is_none())
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title() {
        let html = r#"<html><head><title>Test Page</title></head><body></body></html>"#;
        assert_eq!(parse_html(html).title, Some("Test Page".to_string()));
    }

    #[test]
    fn test_extract_title_with_whitespace() {
        let html = r#"<html><head><title>  Test Page  </title></head><body></body></html>"#;
        assert_eq!(parse_html(html).title, Some("Test Page".to_string()));
    }

    #[test]
    fn test_no_title() {
        let html = r#"<html><head></head><body></body></html>"#;
        assert_eq!(parse_html(html).title, None);
    }

    #[test]
    fn test_hrefs_are_raw() {
        let html = r##"
            <html>
            <body>
                <a href="other">Relative</a>
                <a href="https://other.com/page">Absolute</a>
                <a href="#section">Jump</a>
                <a href="mailto:test@example.com">Email</a>
            </body>
            </html>
        "##;
        assert_eq!(
            parse_html(html).hrefs,
            ["other", "https://other.com/page", "#section", "mailto:test@example.com"]
        );
    }

    #[test]
    fn test_skip_download_link() {
        let html = r#"<html><body><a href="/file.pdf" download>Download</a></body></html>"#;
        assert!(parse_html(html).hrefs.is_empty());
    }

    #[test]
    fn test_anchor_without_href() {
        let html = r#"<html><body><a name="top">Top</a><a href="">Empty</a></body></html>"#;
        assert_eq!(parse_html(html).hrefs, [""]);
    }

    #[test]
    fn test_canonical_link_is_not_an_anchor() {
        let html = r#"<html><head><link rel="canonical" href="https://example.com/c" /></head><body></body></html>"#;
        assert!(parse_html(html).hrefs.is_empty());
    }
}
