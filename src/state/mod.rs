//! State module for tracking requests during a crawl
//!
//! # Components
//!
//! - `RequestState`: Whether a request's redirect check has run yet
//! - `RequestContext`: Per-request key/value store carried from a page to the requests it spawns

mod context;
mod request_state;

// Re-export main types
pub use context::RequestContext;
pub use request_state::RequestState;
