use crate::UrlError;
use url::Url;

/// Returns true if the last path segment looks like an HTML page
///
/// A path ending in `/` is a directory and counts as HTML, as do the `.` and
/// `..` segments. Any other segment without an extension counts as HTML;
/// otherwise the extension must start with `htm`.
pub fn is_html(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or("");
    if path.ends_with('/') {
        return true;
    }

    let segment = path.rsplit('/').next().unwrap_or("");
    if segment == "." || segment == ".." {
        return true;
    }
    match segment.rfind('.') {
        None => true,
        Some(i) => segment[i + 1..].to_ascii_lowercase().starts_with("htm"),
    }
}

/// Ensures a path ends with exactly one slash
pub fn with_trailing_slash(path: &str) -> String {
    format!("{}/", path.trim_end_matches('/'))
}

/// Returns the site-absolute path of a URL with its query, trailing slash enforced
///
/// The slash goes on the path component, never after the query string.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitegraph::url::site_path;
///
/// let url = Url::parse("https://example.com/list?page=2#top").unwrap();
/// assert_eq!(site_path(&url), "/list/?page=2");
/// ```
pub fn site_path(url: &Url) -> String {
    let path = with_trailing_slash(url.path());
    match url.query() {
        Some(query) if !query.is_empty() => format!("{}?{}", path, query),
        _ => path,
    }
}

/// Resolves an href against a base URL
pub fn resolve(base: &Url, href: &str) -> Result<Url, UrlError> {
    base.join(href)
        .map_err(|e| UrlError::Parse(format!("cannot resolve '{}' against {}: {}", href, base, e)))
}

/// Resolves an href against a base URL into a site-absolute path
///
/// # Arguments
///
/// * `base` - The URL of the page the href was found on
/// * `href` - The href, already stripped of the site's own domain
///
/// # Returns
///
/// * `Ok(String)` - Path with query and exactly one trailing slash on the path
/// * `Err(UrlError)` - The href cannot be resolved at all
pub fn resolve_path(base: &Url, href: &str) -> Result<String, UrlError> {
    resolve(base, href).map(|url| site_path(&url))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/docs/guide/intro/").unwrap()
    }

    #[test]
    fn test_is_html() {
        assert!(is_html("/about"));
        assert!(is_html("/about/"));
        assert!(is_html("/index.html"));
        assert!(is_html("/old/page.htm"));
        assert!(is_html("/page.HTML"));
        assert!(is_html("/list?sort=a.b"));
        assert!(is_html("/v1.2/guide"));
    }

    #[test]
    fn test_is_html_directories() {
        assert!(is_html("/releases/v1.2/"));
        assert!(is_html("/assets.d/?x=1"));
        assert!(is_html(".."));
        assert!(is_html("."));
        assert!(is_html("../"));
        assert!(is_html("./"));
        assert!(is_html("/a/.."));
    }

    #[test]
    fn test_is_not_html() {
        assert!(!is_html("/logo.png"));
        assert!(!is_html("/files/report.pdf"));
        assert!(!is_html("/style.css?v=3"));
        assert!(!is_html("/news.aspx"));
    }

    #[test]
    fn test_with_trailing_slash() {
        assert_eq!(with_trailing_slash("/a"), "/a/");
        assert_eq!(with_trailing_slash("/a/"), "/a/");
        assert_eq!(with_trailing_slash("/a//"), "/a/");
        assert_eq!(with_trailing_slash("/"), "/");
        assert_eq!(with_trailing_slash(""), "/");
    }

    #[test]
    fn test_site_path_drops_fragment() {
        let url = Url::parse("https://example.com/a#frag").unwrap();
        assert_eq!(site_path(&url), "/a/");
    }

    #[test]
    fn test_resolve_absolute_path() {
        assert_eq!(resolve_path(&base(), "/about").unwrap(), "/about/");
    }

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(resolve_path(&base(), "next").unwrap(), "/docs/guide/intro/next/");
        assert_eq!(resolve_path(&base(), "../setup").unwrap(), "/docs/guide/setup/");
        assert_eq!(resolve_path(&base(), "../../../../").unwrap(), "/");
    }

    #[test]
    fn test_resolve_keeps_query() {
        assert_eq!(
            resolve_path(&base(), "/search?q=rust&page=2").unwrap(),
            "/search/?q=rust&page=2"
        );
        assert_eq!(resolve_path(&base(), "?page=3").unwrap(), "/docs/guide/intro/?page=3");
    }
}
