//! Domain models for documents and their metadata

pub mod document;

pub use document::{Document, DocumentBuilder, FieldValue};
