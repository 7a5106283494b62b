//! Path proximity between a candidate and the reference document
//!
//! Proximity is decided on whole path segments, so `A/Bx/c.md` is not inside
//! the folder `A/B`.

use serde::{Deserialize, Serialize};

use crate::models::Document;

/// Points for a document in the same folder as the reference
pub const EXACT_FOLDER_POINTS: f64 = 2.0;

/// Points for a document anywhere below the reference's folder
pub const SUBFOLDER_POINTS: f64 = 1.0;

/// Upper bound of the path contribution to a score
pub const MAX_PATH_POINTS: f64 = EXACT_FOLDER_POINTS;

/// Where a candidate sits relative to the reference's folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathRelation {
    /// Same folder, same depth
    ExactFolder,

    /// In a descendant folder, at any depth
    Subfolder,

    /// Elsewhere, or the reference itself
    Unrelated,
}

impl PathRelation {
    pub fn points(self) -> f64 {
        match self {
            PathRelation::ExactFolder => EXACT_FOLDER_POINTS,
            PathRelation::Subfolder => SUBFOLDER_POINTS,
            PathRelation::Unrelated => 0.0,
        }
    }
}

/// The reference document's folder, computed once per scoring call
#[derive(Debug, Clone)]
pub struct ReferenceFolder<'a> {
    path: &'a str,
    segments: Vec<&'a str>,
}

impl<'a> ReferenceFolder<'a> {
    pub fn of(reference: &'a Document) -> Self {
        Self {
            path: reference.path.as_str(),
            segments: reference.directory(),
        }
    }

    /// Folder depth in segments; 0 for a document at the root
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Classify `candidate` relative to this folder
    pub fn relation(&self, candidate: &Document) -> PathRelation {
        if candidate.path == self.path {
            return PathRelation::Unrelated;
        }

        let directory = candidate.directory();
        if directory == self.segments {
            PathRelation::ExactFolder
        } else if directory.len() > self.segments.len() && directory.starts_with(&self.segments) {
            PathRelation::Subfolder
        } else {
            PathRelation::Unrelated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relation(reference: &str, candidate: &str) -> PathRelation {
        let reference = Document::new(reference);
        ReferenceFolder::of(&reference).relation(&Document::new(candidate))
    }

    #[test]
    fn test_depth_rule() {
        assert_eq!(relation("A/B/doc.md", "A/B/other.md"), PathRelation::ExactFolder);
        assert_eq!(relation("A/B/doc.md", "A/B/C/other.md"), PathRelation::Subfolder);
        assert_eq!(relation("A/B/doc.md", "A/B/C/D/E/deep.md"), PathRelation::Subfolder);
        assert_eq!(relation("A/B/doc.md", "A/other.md"), PathRelation::Unrelated);
        assert_eq!(relation("A/B/doc.md", "X/B/other.md"), PathRelation::Unrelated);
    }

    #[test]
    fn test_reference_is_unrelated_to_itself() {
        assert_eq!(relation("A/B/doc.md", "A/B/doc.md"), PathRelation::Unrelated);
    }

    #[test]
    fn test_segment_prefix_not_string_prefix() {
        assert_eq!(relation("A/B/doc.md", "A/Bx/other.md"), PathRelation::Unrelated);
        assert_eq!(relation("A/B/doc.md", "A/Bx/C/other.md"), PathRelation::Unrelated);
    }

    #[test]
    fn test_root_level_reference() {
        assert_eq!(relation("doc.md", "other.md"), PathRelation::ExactFolder);
        assert_eq!(relation("doc.md", "A/other.md"), PathRelation::Subfolder);
    }

    #[test]
    fn test_points() {
        assert_eq!(PathRelation::ExactFolder.points(), 2.0);
        assert_eq!(PathRelation::Subfolder.points(), 1.0);
        assert_eq!(PathRelation::Unrelated.points(), 0.0);
        assert_eq!(ReferenceFolder::of(&Document::new("A/B/doc.md")).depth(), 2);
    }
}
