use crate::error::Result;
use crate::model::Document;
use std::path::Path;

/// Read-only source of the documentation versions.
///
/// Implementors own the list of [`Document`]s; this crate never mutates it.
/// Versions are assumed unique, and lookups return the first match.
///
/// # Examples
///
/// ```
/// use docview_core::{Document, DocumentRegistry, StaticRegistry};
///
/// let registry = StaticRegistry::new(vec![
///     Document::new("1.x", vec![]),
///     Document::new("2.x", vec![]),
/// ]);
///
/// assert_eq!(registry.versions(), vec!["1.x", "2.x"]);
/// assert!(registry.find("2.x").is_some());
/// assert!(registry.find("3.x").is_none());
/// ```
pub trait DocumentRegistry: Send + Sync {
    /// Returns all documents in registry order.
    fn documents(&self) -> &[Document];

    /// Returns the first document whose version equals `version`.
    fn find(&self, version: &str) -> Option<&Document> {
        self.documents().iter().find(|doc| doc.version == version)
    }

    /// Returns the version identifiers in registry order.
    fn versions(&self) -> Vec<&str> {
        self.documents()
            .iter()
            .map(|doc| doc.version.as_str())
            .collect()
    }
}

/// Registry backed by a fixed list of documents.
///
/// Usually built from the JSON manifest emitted alongside the markdown
/// content: a top-level array of documents.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    documents: Vec<Document>,
}

impl StaticRegistry {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Parses a JSON manifest.
    ///
    /// # Errors
    ///
    /// Returns `DocsError::Json` if the manifest is not an array of documents.
    pub fn from_json(json: &str) -> Result<Self> {
        let documents: Vec<Document> = serde_json::from_str(json)?;

        for (index, doc) in documents.iter().enumerate() {
            if documents[..index]
                .iter()
                .any(|earlier| earlier.version == doc.version)
            {
                tracing::warn!(
                    "duplicate documentation version {} in manifest, first entry wins",
                    doc.version
                );
            }
        }

        tracing::debug!("loaded manifest with {} versions", documents.len());
        Ok(Self { documents })
    }

    /// Reads and parses a JSON manifest from disk.
    ///
    /// # Errors
    ///
    /// Returns `DocsError::Io` if the file cannot be read, or
    /// `DocsError::Json` if it is not a valid manifest.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("reading manifest {:?}", path);
        Self::from_json(&content)
    }
}

impl DocumentRegistry for StaticRegistry {
    fn documents(&self) -> &[Document] {
        &self.documents
    }
}
