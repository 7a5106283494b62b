//! Path-addressed documents with free-form metadata fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Value stored under a document field
///
/// Metadata is schema-less: any field may hold either a single scalar or an
/// ordered list of scalars. Matching treats both shapes as a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldValue {
    /// A single scalar value
    Scalar(String),

    /// An ordered list of scalar values
    List(Vec<String>),
}

impl FieldValue {
    /// View the value as a list of scalars
    pub fn as_slice(&self) -> &[String] {
        match self {
            FieldValue::Scalar(value) => std::slice::from_ref(value),
            FieldValue::List(values) => values.as_slice(),
        }
    }

    /// Coerce the value into an owned list of scalars
    pub fn to_list(&self) -> Vec<String> {
        self.as_slice().to_vec()
    }

    /// Whether any scalar of this value equals `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.as_slice().iter().any(|value| value == needle)
    }

    /// Whether this value shares at least one scalar with `targets`
    pub fn intersects(&self, targets: &[String]) -> bool {
        targets.iter().any(|target| self.contains(target))
    }

    /// Whether the value carries no scalars at all
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Convert loosely-typed JSON metadata into a field value.
    ///
    /// Strings are kept as-is, numbers and booleans are stringified and arrays
    /// keep their scalar members. `null`, objects and arrays without a single
    /// scalar member yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Array(items) => {
                let values: Vec<String> = items.iter().filter_map(json_scalar).collect();
                if values.is_empty() && !items.is_empty() {
                    None
                } else {
                    Some(FieldValue::List(values))
                }
            }
            other => json_scalar(other).map(FieldValue::Scalar),
        }
    }
}

fn json_scalar(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::List(values)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        FieldValue::List(values.into_iter().map(str::to_string).collect())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Scalar(value) => write!(f, "{}", value),
            FieldValue::List(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

/// A note addressed by its hierarchical path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Forward-slash delimited path, unique within a store
    pub path: String,

    /// Metadata fields keyed by name
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Document {
    /// Create a document with no metadata
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self {
            path: path.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Create a builder for a document at `path`
    pub fn builder<S: Into<String>>(path: S) -> DocumentBuilder {
        DocumentBuilder::new(path)
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Set (or replace) a field value
    pub fn set_field<K: Into<String>, V: Into<FieldValue>>(&mut self, name: K, value: V) {
        self.fields.insert(name.into(), value.into());
    }

    /// Path segments, ignoring empty segments from leading, trailing or doubled slashes
    pub fn segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// Segments of the containing folder (every segment but the last)
    pub fn directory(&self) -> Vec<&str> {
        let mut segments = self.segments();
        segments.pop();
        segments
    }

    /// The last path segment
    pub fn name(&self) -> &str {
        self.path
            .rsplit('/')
            .find(|s| !s.is_empty())
            .unwrap_or(self.path.as_str())
    }
}

/// Builder for creating Document instances
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self {
            document: Document::new(path),
        }
    }

    /// Set a single-valued field
    pub fn field<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.document
            .set_field(name.into(), FieldValue::Scalar(value.into()));
        self
    }

    /// Set a list-valued field
    pub fn list<K: Into<String>>(mut self, name: K, values: Vec<&str>) -> Self {
        self.document.set_field(name.into(), FieldValue::from(values));
        self
    }

    /// Set a field from an existing value
    pub fn value<K: Into<String>>(mut self, name: K, value: FieldValue) -> Self {
        self.document.set_field(name.into(), value);
        self
    }

    pub fn build(self) -> Document {
        self.document
    }
}
