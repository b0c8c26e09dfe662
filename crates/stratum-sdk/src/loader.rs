//! Loads normalized diagrams from disk.

use std::path::Path;

use stratum_common::error::{Result, StratumError};
use stratum_diagram::NormalizedGraph;

/// Reads and parses a normalized diagram JSON file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read,
/// [`StratumError::MissingInput`] if the document is `null`, or a
/// serialization error for malformed JSON.
pub fn load_graph(path: &Path) -> Result<NormalizedGraph> {
    tracing::info!(path = %path.display(), "loading diagram");

    let content = std::fs::read_to_string(path).map_err(|e| StratumError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let graph = NormalizedGraph::from_json(&content)?;

    tracing::debug!(nodes = graph.len(), edges = graph.edges.len(), "diagram loaded");
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_a_diagram_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"nodes": {{"vpc": {{"id": "vpc", "kind": "container", "resourceType": "vpc"}}}}}}"#
        )
        .expect("write");

        let graph = load_graph(file.path()).expect("load");
        assert_eq!(graph.len(), 1);
        assert!(graph.node("vpc").expect("vpc").config.is_empty());
    }

    #[test]
    fn null_document_is_missing_input() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "null").expect("write");
        let err = load_graph(file.path()).unwrap_err();
        assert!(matches!(err, StratumError::MissingInput { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_graph(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StratumError::Io { .. }));
    }
}
