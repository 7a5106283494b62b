//! In-memory document store and JSON snapshot loading

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use super::errors::{StoreError, StoreResult};
use super::traits::DocumentStore;
use crate::models::{Document, FieldValue};

/// Document store held entirely in memory
///
/// Documents keep their insertion order; inserting a document at an existing
/// path replaces it in place.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    documents: Vec<Arc<Document>>,
    index: HashMap<String, usize>,
    current: Option<String>,
}

/// On-disk snapshot shapes: a bare list of documents, or a vault object that
/// also names the current document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Documents(Vec<RawDocument>),
    Vault {
        documents: Vec<RawDocument>,
        #[serde(default)]
        current: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    path: String,
    #[serde(default)]
    fields: serde_json::Map<String, serde_json::Value>,
}

impl RawDocument {
    fn into_document(self) -> Document {
        let mut fields = BTreeMap::new();
        for (name, raw) in self.fields {
            match FieldValue::from_json(&raw) {
                Some(value) => {
                    fields.insert(name, value);
                }
                None => {
                    tracing::debug!(path = %self.path, field = %name, "Skipping non-scalar field");
                }
            }
        }
        Document {
            path: self.path,
            fields,
        }
    }
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a list of documents
    pub fn from_documents<I>(documents: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = Document>,
    {
        let mut store = Self::new();
        for document in documents {
            store.insert(document)?;
        }
        Ok(store)
    }

    /// Parse a JSON snapshot
    pub fn from_json_str(json: &str) -> StoreResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let (raw_documents, current) = match snapshot {
            Snapshot::Documents(documents) => (documents, None),
            Snapshot::Vault { documents, current } => (documents, current),
        };

        let mut store =
            Self::from_documents(raw_documents.into_iter().map(RawDocument::into_document))?;
        if let Some(path) = current {
            store.set_current(&path)?;
        }

        tracing::debug!(
            documents = store.len(),
            current = ?store.current,
            "Loaded document snapshot"
        );
        Ok(store)
    }

    /// Load a JSON snapshot from disk
    pub fn load_path<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Add a document, replacing any document already stored at the same path
    pub fn insert(&mut self, document: Document) -> StoreResult<()> {
        if document.path.trim().is_empty() {
            return Err(StoreError::InvalidDocument(
                "document path cannot be empty".to_string(),
            ));
        }

        let path = document.path.clone();
        match self.index.get(&path) {
            Some(&position) => {
                tracing::warn!(path = %path, "Duplicate document path, replacing earlier entry");
                self.documents[position] = Arc::new(document);
            }
            None => {
                self.index.insert(path, self.documents.len());
                self.documents.push(Arc::new(document));
            }
        }
        Ok(())
    }

    /// Fetch a document by path
    pub fn get(&self, path: &str) -> Option<Arc<Document>> {
        self.index
            .get(path)
            .map(|&position| Arc::clone(&self.documents[position]))
    }

    /// Mark the document at `path` as the current document
    pub fn set_current(&mut self, path: &str) -> StoreResult<()> {
        if !self.index.contains_key(path) {
            return Err(StoreError::NotFound(path.to_string()));
        }
        self.current = Some(path.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for InMemoryStore {
    fn all_documents(&self) -> Vec<Arc<Document>> {
        self.documents.clone()
    }

    fn current_document(&self) -> Option<Arc<Document>> {
        self.current.as_deref().and_then(|path| self.get(path))
    }
}
