//! JSON graph writer

use crate::output::traits::{GraphWriter, OutputResult};
use crate::output::GraphDocument;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes the graph document as pretty-printed JSON
///
/// # Arguments
///
/// * `document` - The exported node/link document
/// * `output_path` - Path where the JSON file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the file
/// * `Err(OutputError)` - Failed to serialize or write
pub fn write_graph_json(document: &GraphDocument, output_path: &Path) -> OutputResult<()> {
    let json = serde_json::to_string_pretty(document)?;

    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;

    Ok(())
}

/// Graph writer targeting a JSON file
#[derive(Debug, Clone)]
pub struct JsonGraphWriter {
    path: PathBuf,
}

impl JsonGraphWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GraphWriter for JsonGraphWriter {
    fn write(&self, document: &GraphDocument) -> OutputResult<()> {
        write_graph_json(document, &self.path)?;
        tracing::info!("Graph written to {}", self.path.display());
        Ok(())
    }
}
