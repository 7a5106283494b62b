//! Options controlling related-page scoring
//!
//! [`RelatedOptions`] enumerates every recognised knob with its default. It is
//! deserialized (with defaults filled in) from configuration files and is
//! treated as immutable once a scorer has been built from it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::criteria::CriterionValue;

/// Fields matched against the reference document when no criteria are configured
pub const DEFAULT_CRITERIA_FIELDS: &[&str] = &["subject", "type", "domain"];

/// Whether and how path proximity contributes to a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "IncludePathRepr", into = "IncludePathRepr")]
pub enum IncludePath {
    /// Path proximity is not scored at all
    Off,

    /// Path proximity adds up to 2 points
    #[default]
    On,

    /// Path proximity is scored and candidates outside the reference folder are dropped
    Strict,
}

impl IncludePath {
    /// Whether path proximity is scored
    pub fn is_enabled(self) -> bool {
        !matches!(self, IncludePath::Off)
    }
}

/// Accepts `true`, `false` or `"strict"` (plus the string forms of the booleans)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum IncludePathRepr {
    Flag(bool),
    Mode(String),
}

impl TryFrom<IncludePathRepr> for IncludePath {
    type Error = String;

    fn try_from(repr: IncludePathRepr) -> Result<Self, Self::Error> {
        match repr {
            IncludePathRepr::Flag(true) => Ok(IncludePath::On),
            IncludePathRepr::Flag(false) => Ok(IncludePath::Off),
            IncludePathRepr::Mode(mode) => mode.parse(),
        }
    }
}

impl From<IncludePath> for IncludePathRepr {
    fn from(value: IncludePath) -> Self {
        match value {
            IncludePath::Off => IncludePathRepr::Flag(false),
            IncludePath::On => IncludePathRepr::Flag(true),
            IncludePath::Strict => IncludePathRepr::Mode("strict".to_string()),
        }
    }
}

impl FromStr for IncludePath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "true" | "on" | "yes" => Ok(IncludePath::On),
            "false" | "off" | "no" => Ok(IncludePath::Off),
            "strict" => Ok(IncludePath::Strict),
            other => Err(format!(
                "Invalid include_path value '{}': expected true, false or strict",
                other
            )),
        }
    }
}

impl fmt::Display for IncludePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncludePath::Off => write!(f, "false"),
            IncludePath::On => write!(f, "true"),
            IncludePath::Strict => write!(f, "strict"),
        }
    }
}

/// Configuration for related-page scoring
///
/// # Example
///
/// ```no_run
/// use kindred::related::{CriterionValue, IncludePath, RelatedOptions};
///
/// let options = RelatedOptions {
///     include_path: IncludePath::Off,
///     min_score: 0.0,
///     ..Default::default()
/// }
/// .with_criterion("type", CriterionValue::Flag(true))
/// .with_criterion("subject", CriterionValue::from(vec!["PKM", "Rust"]));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedOptions {
    /// Field name to criterion. `true` matches the reference's own value,
    /// `false`/`null` ignores the field, anything else is an explicit target.
    ///
    /// Omitting the option selects `subject`, `type` and `domain` from the
    /// reference. An explicitly empty map selects no fields.
    #[serde(alias = "matchCriteria")]
    pub match_criteria: BTreeMap<String, CriterionValue>,

    /// Path proximity scoring. Default: true
    #[serde(alias = "includePath")]
    pub include_path: IncludePath,

    /// Drop candidates that received no path proximity points. Default: false
    #[serde(alias = "strictPath")]
    pub strict_path: bool,

    /// Minimum confidence as a fraction (0.0 - 1.0). Default: 0.66
    #[serde(alias = "minScore")]
    pub min_score: f64,

    /// Maximum number of results returned. Default: 10
    #[serde(alias = "maxResults")]
    pub max_results: usize,

    /// Points awarded for each matched value. Default: 1.5
    #[serde(alias = "scoreMultiplier")]
    pub score_multiplier: f64,
}

impl Default for RelatedOptions {
    fn default() -> Self {
        Self {
            match_criteria: default_match_criteria(),
            include_path: IncludePath::On,
            strict_path: false,
            min_score: 0.66,
            max_results: 10,
            score_multiplier: 1.5,
        }
    }
}

/// `subject`, `type` and `domain`, each resolved from the reference document
pub fn default_match_criteria() -> BTreeMap<String, CriterionValue> {
    DEFAULT_CRITERIA_FIELDS
        .iter()
        .map(|field| (field.to_string(), CriterionValue::Flag(true)))
        .collect()
}

impl RelatedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only documents in the reference's folder tree, ranked by metadata
    pub fn folder_focused() -> Self {
        Self {
            include_path: IncludePath::Strict,
            min_score: 0.3,
            ..Default::default()
        }
    }

    /// Metadata matches only, ignoring where documents live
    pub fn metadata_only() -> Self {
        Self {
            include_path: IncludePath::Off,
            ..Default::default()
        }
    }

    /// Add or replace a criterion
    pub fn with_criterion<S: Into<String>>(mut self, field: S, value: CriterionValue) -> Self {
        self.match_criteria.insert(field.into(), value);
        self
    }

    /// Whether candidates outside the reference folder tree are dropped
    pub fn effective_strict_path(&self) -> bool {
        self.strict_path || self.include_path == IncludePath::Strict
    }

    /// Validate the options
    ///
    /// Returns an error if:
    /// - `score_multiplier` is not a finite number > 0.0
    /// - `max_results` is 0
    /// - `min_score` is outside 0.0 - 1.0
    /// - a criterion has an empty field name
    pub fn validate(&self) -> Result<(), String> {
        if !self.score_multiplier.is_finite() || self.score_multiplier <= 0.0 {
            return Err(format!(
                "score_multiplier must be a finite number > 0.0, got {}",
                self.score_multiplier
            ));
        }
        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(format!(
                "min_score must be between 0.0 and 1.0, got {}",
                self.min_score
            ));
        }
        if self.match_criteria.keys().any(|field| field.trim().is_empty()) {
            return Err("match_criteria field names cannot be empty".to_string());
        }

        Ok(())
    }
}
