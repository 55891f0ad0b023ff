use crate::UrlError;
use url::{Host, Url};

/// Where a parsed URL sits relative to the crawled site
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SiteLocation {
    /// The host is the site itself or its `www.` subdomain
    SameSite,
    /// Another subdomain of the site, kept as host (with port, if any)
    Tenant(String),
    /// An unrelated host, or no host at all
    Foreign,
}

/// Extracts the registrable domain (apex plus one label) from a URL
///
/// # Arguments
///
/// * `url` - The URL to extract the domain from
///
/// # Returns
///
/// * `Ok(String)` - Lowercase registrable domain; IP literals and single-label hosts are returned whole
/// * `Err(UrlError)` - The URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitegraph::url::registrable_domain;
///
/// let url = Url::parse("https://www.example.com/").unwrap();
/// assert_eq!(registrable_domain(&url).unwrap(), "example.com");
/// ```
pub fn registrable_domain(url: &Url) -> Result<String, UrlError> {
    match url.host() {
        Some(Host::Domain(host)) => {
            let host = host.trim_end_matches('.').to_lowercase();
            let labels: Vec<&str> = host.split('.').collect();
            if labels.len() <= 2 {
                Ok(host)
            } else {
                Ok(labels[labels.len() - 2..].join("."))
            }
        }
        Some(Host::Ipv4(addr)) => Ok(addr.to_string()),
        Some(Host::Ipv6(addr)) => Ok(format!("[{}]", addr)),
        None => Err(UrlError::MissingDomain),
    }
}

/// Returns true if `host` is `domain` itself or one of its subdomains
fn host_matches_domain(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{}", domain))
}

/// Locates a parsed URL relative to the site's registrable domain
pub(crate) fn locate(url: &Url, domain: &str) -> SiteLocation {
    let Some(host) = url.host_str() else {
        return SiteLocation::Foreign;
    };
    let host = host.trim_end_matches('.').to_lowercase();
    let domain = domain.to_lowercase();

    if !host_matches_domain(&host, &domain) {
        return SiteLocation::Foreign;
    }

    let subdomain = host[..host.len() - domain.len()].trim_end_matches('.');
    if subdomain.is_empty() || subdomain == "www" {
        return SiteLocation::SameSite;
    }
    match url.port() {
        Some(port) => SiteLocation::Tenant(format!("{}:{}", host, port)),
        None => SiteLocation::Tenant(host),
    }
}

/// Parses an href that carries its own host (`scheme://` or `//`)
fn parse_absolute(href: &str) -> Option<Url> {
    let url = if href.starts_with("//") {
        Url::parse(&format!("http:{}", href)).ok()?
    } else {
        Url::parse(href).ok()?
    };
    url.host_str().is_some().then_some(url)
}

/// Strips scheme and the site's domain from an href
///
/// If the subdomain is empty or `www`, only the path (with query) is kept. Any
/// other subdomain keeps the full host and path. Hrefs on unrelated hosts and
/// relative hrefs are returned unchanged.
///
/// # Examples
///
/// ```
/// use sitegraph::url::strip_domain;
///
/// assert_eq!(strip_domain("//www.example.com/news.aspx", "example.com"), "/news.aspx");
/// assert_eq!(strip_domain("//travel.example.com/", "example.com"), "travel.example.com/");
/// ```
pub fn strip_domain(href: &str, domain: &str) -> String {
    let Some(url) = parse_absolute(href) else {
        return href.to_string();
    };

    let rest = match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    };
    match locate(&url, domain) {
        SiteLocation::SameSite => rest,
        SiteLocation::Tenant(host) => format!("{}{}", host, rest),
        SiteLocation::Foreign => href.to_string(),
    }
}
