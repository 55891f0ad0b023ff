use crate::state::RequestState;
use std::collections::HashMap;

/// Key of the path a request was issued for, before any redirect
const PATH_KEY: &str = "path";

/// Key of the pattern the request's page was recorded under
const PATTERN_KEY: &str = "pattern";

/// Per-request key/value store
///
/// The crawl engine creates one context per request and hands it to every anchor
/// callback of that request. A context built for a visit travels with the spawned
/// request, which is how a page learns the pattern it was discovered under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    values: HashMap<String, String>,
    state: RequestState,
}

impl RequestContext {
    /// Creates an empty, pending context
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the context of a request for `path`, recorded under `pattern`
    pub fn for_request(path: &str, pattern: &str) -> Self {
        let mut ctx = Self::new();
        ctx.put(PATH_KEY, path);
        ctx.put(PATTERN_KEY, pattern);
        ctx
    }

    /// Stores a value, replacing any previous one
    pub fn put(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    /// Reads a value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The path the request was issued for
    pub fn path(&self) -> Option<&str> {
        self.get(PATH_KEY)
    }

    /// The pattern of the page this request belongs to
    pub fn pattern(&self) -> Option<&str> {
        self.get(PATTERN_KEY)
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Marks the redirect check as done
    pub fn resolve(&mut self) {
        self.state = RequestState::Resolved;
    }
}
