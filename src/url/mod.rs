//! URL handling module for Sitegraph
//!
//! This module strips the crawled site's domain from hrefs, resolves relative
//! hrefs against the page they were found on, and decides whether a target is
//! part of the site graph at all.

mod domain;
mod resolve;

use crate::UrlError;
use domain::{locate, SiteLocation};
use std::fmt;
use url::Url;

// Re-export main functions
pub use domain::{registrable_domain, strip_domain};
pub use resolve::{is_html, resolve, resolve_path, site_path, with_trailing_slash};

/// Schemes that never lead to a page
const SKIPPED_SCHEMES: &[&str] = &["mailto:", "javascript:", "tel:", "data:"];

/// Why an href was left out of the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Empty href attribute
    Empty,
    /// Same-page anchor (`#section`)
    Fragment,
    /// `mailto:`, `javascript:`, `tel:` or `data:`
    Scheme,
    /// Points to another site
    OffSite,
    /// Points to a non-HTML asset
    Asset,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Empty => "empty",
            Self::Fragment => "fragment",
            Self::Scheme => "scheme",
            Self::OffSite => "off-site",
            Self::Asset => "asset",
        };
        write!(f, "{}", reason)
    }
}

/// Classification of a discovered href
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Page of the crawled site, as a site-absolute path with query
    Page(String),
    /// Page on a sibling subdomain, as host + path; recorded but never visited
    Tenant(String),
    /// Not part of the graph
    Skip(SkipReason),
}

/// Classifies an href found on a page of the crawled site
///
/// Skip conditions are checked in order:
/// 1. Empty href, fragment-only href, or a non-page scheme
/// 2. Absolute href to a host outside the registrable domain
/// 3. Non-HTML asset (an extension not starting with `htm`)
///
/// Every href is resolved against `base` first, so the asset check sees the
/// resolved path and absolute hrefs are split by the URL parser, never by hand.
///
/// # Arguments
///
/// * `base` - The URL of the request the href was found on
/// * `href` - The raw href attribute value
/// * `domain` - The registrable domain of the crawl
///
/// # Returns
///
/// * `Ok(LinkTarget)` - The classification of the target
/// * `Err(UrlError)` - The href could not be resolved at all
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitegraph::url::{classify_href, LinkTarget, SkipReason};
///
/// let base = Url::parse("https://example.com/blog/").unwrap();
/// assert_eq!(
///     classify_href(&base, "post?id=7", "example.com").unwrap(),
///     LinkTarget::Page("/blog/post/?id=7".to_string())
/// );
/// assert_eq!(
///     classify_href(&base, "https://other.org/", "example.com").unwrap(),
///     LinkTarget::Skip(SkipReason::OffSite)
/// );
/// ```
pub fn classify_href(base: &Url, href: &str, domain: &str) -> Result<LinkTarget, UrlError> {
    let href = href.trim();

    if href.is_empty() {
        return Ok(LinkTarget::Skip(SkipReason::Empty));
    }
    if href.starts_with('#') {
        return Ok(LinkTarget::Skip(SkipReason::Fragment));
    }
    let lowered = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
        return Ok(LinkTarget::Skip(SkipReason::Scheme));
    }

    let scheme = href_scheme(href);
    if let Some(scheme) = scheme {
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Ok(LinkTarget::Skip(SkipReason::Scheme));
        }
    }
    let absolute = scheme.is_some() || href.starts_with("//");

    let url = resolve(base, href)?;
    let tenant = if absolute {
        match locate(&url, domain) {
            SiteLocation::Foreign => return Ok(LinkTarget::Skip(SkipReason::OffSite)),
            SiteLocation::Tenant(host) => Some(host),
            SiteLocation::SameSite => None,
        }
    } else {
        None
    };

    if !is_html(url.path()) {
        return Ok(LinkTarget::Skip(SkipReason::Asset));
    }
    Ok(match tenant {
        Some(host) => LinkTarget::Tenant(format!("{}{}", host, site_path(&url))),
        None => LinkTarget::Page(site_path(&url)),
    })
}

/// Returns the `scheme:` prefix of an href, if it has one
fn href_scheme(href: &str) -> Option<&str> {
    let (scheme, _) = href.split_once(':')?;
    let valid = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c));
    valid.then_some(scheme)
}

/// Parses a URL that must carry a host
pub fn parse_site_url(url: &str) -> Result<Url, UrlError> {
    let parsed = Url::parse(url).map_err(|e| UrlError::Parse(format!("{}: {}", url, e)))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(UrlError::InvalidScheme(parsed.scheme().to_string()));
    }
    if parsed.host().is_none() {
        return Err(UrlError::MissingDomain);
    }
    Ok(parsed)
}
