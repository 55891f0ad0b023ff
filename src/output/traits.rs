//! Output writer traits and error types
//!
//! This module defines the trait interface for graph writers and the errors
//! they report.

use crate::output::GraphDocument;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize graph: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for graph writers
///
/// A writer receives the document of a finished crawl exactly once.
pub trait GraphWriter {
    /// Writes the exported document
    ///
    /// # Arguments
    ///
    /// * `document` - The exported node/link document
    fn write(&self, document: &GraphDocument) -> OutputResult<()>;
}
