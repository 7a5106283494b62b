//! The read-only document store contract consumed by the scorer

use std::fmt::Debug;
use std::sync::Arc;

use crate::models::{Document, FieldValue};

/// Read-only access to a collection of documents
///
/// The scorer only ever enumerates documents, looks up documents by field value
/// and asks for the current document. Implementations own the documents; the
/// scorer shares them through `Arc` and never mutates them.
pub trait DocumentStore: Debug {
    /// Every document in the store, in a stable order
    fn all_documents(&self) -> Vec<Arc<Document>>;

    /// The document the user is currently looking at, if any
    fn current_document(&self) -> Option<Arc<Document>>;

    /// Read a field of a document
    fn field_value<'d>(&self, document: &'d Document, field: &str) -> Option<&'d FieldValue> {
        document.field(field)
    }

    /// Documents whose `field` shares at least one scalar with `values`
    ///
    /// The default implementation scans [`DocumentStore::all_documents`].
    /// Stores that keep a field index should override it; the result must be
    /// the same set either way.
    fn documents_by_field(&self, field: &str, values: &[String]) -> Vec<Arc<Document>> {
        if values.is_empty() {
            return Vec::new();
        }

        self.all_documents()
            .into_iter()
            .filter(|doc| {
                self.field_value(doc, field)
                    .is_some_and(|value| value.intersects(values))
            })
            .collect()
    }
}
