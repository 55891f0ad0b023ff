//! Request state definitions for redirect detection
//!
//! Every request starts `Pending`. The first anchor found on the served page (or the
//! page itself, if the crawl engine reports it) runs the redirect check and moves the
//! request to `Resolved`; later anchors never check again.

use std::fmt;

/// Represents where a request is in its redirect check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestState {
    /// The served path has not been compared with the requested path yet
    #[default]
    Pending,

    /// The redirect check ran; the request's page identity is settled
    Resolved,
}

impl RequestState {
    /// Returns true if the redirect check still has to run
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Converts the state to its string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
