//! Match criteria and their resolution against a reference document

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::Document;
use crate::store::DocumentStore;

/// Fields that double as coarse candidate pre-filters
pub const PREFILTER_FIELDS: &[&str] = &["subject", "domain"];

/// A criterion as written in configuration
///
/// Configuration accepts `null`, a boolean, a scalar or a list of scalars.
/// Numbers and booleans inside lists are read as their string form, so a
/// criterion of `2024` matches a document field holding `"2024"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CriterionValue {
    /// `null`: the field is ignored
    Unset,

    /// `true` matches the reference's own value, `false` ignores the field
    Flag(bool),

    /// A single explicit target value
    Value(String),

    /// Explicit target values, order preserved
    Values(Vec<String>),
}

impl From<&str> for CriterionValue {
    fn from(value: &str) -> Self {
        CriterionValue::Value(value.to_string())
    }
}

impl From<Vec<&str>> for CriterionValue {
    fn from(values: Vec<&str>) -> Self {
        CriterionValue::Values(values.into_iter().map(str::to_string).collect())
    }
}

impl From<bool> for CriterionValue {
    fn from(flag: bool) -> Self {
        CriterionValue::Flag(flag)
    }
}

struct CriterionValueVisitor;

impl<'de> Visitor<'de> for CriterionValueVisitor {
    type Value = CriterionValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a boolean, a scalar value or a list of scalar values")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(CriterionValue::Unset)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(CriterionValue::Unset)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(CriterionValue::Flag(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(CriterionValue::Value(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(CriterionValue::Value(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(CriterionValue::Value(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(CriterionValue::Value(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(CriterionValue::Value(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(Scalar(value)) = seq.next_element()? {
            values.push(value);
        }
        Ok(CriterionValue::Values(values))
    }
}

impl<'de> Deserialize<'de> for CriterionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CriterionValueVisitor)
    }
}

/// One element of an explicit target list
struct Scalar(String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl Visitor<'_> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a scalar value")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// How a criterion obtains its target values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "values")]
pub enum CriterionMode {
    /// Read the reference document's value at resolution time
    UseCurrent,

    /// Match against configured values
    Explicit(Vec<String>),

    /// Do not match this field
    Ignore,
}

/// One configured rule for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCriterion {
    pub field: String,
    pub mode: CriterionMode,
}

impl MatchCriterion {
    /// Interpret a configured value for `field`
    pub fn from_config(field: &str, value: &CriterionValue) -> Self {
        let mode = match value {
            CriterionValue::Unset | CriterionValue::Flag(false) => CriterionMode::Ignore,
            CriterionValue::Flag(true) => CriterionMode::UseCurrent,
            CriterionValue::Value(v) => CriterionMode::Explicit(vec![v.clone()]),
            CriterionValue::Values(vs) => CriterionMode::Explicit(vs.clone()),
        };
        Self {
            field: field.to_string(),
            mode,
        }
    }
}

/// A criterion with concrete target values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCriterion {
    pub field: String,

    /// Values to match; duplicates are kept and each counts once per match
    pub targets: Vec<String>,

    /// Whether the targets were read from the reference document
    pub from_reference: bool,
}

/// The outcome of resolving every configured criterion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCriteria {
    /// Criteria that take part in matching, in field-name order
    pub criteria: Vec<ResolvedCriterion>,

    /// Fields configured as ignored (`false` or `null`)
    pub ignored: Vec<String>,

    /// Fields that resolved to no target values, such as a `true` criterion
    /// for a field the reference does not have. They contribute nothing to
    /// either the score or the maximum score.
    pub unresolved: Vec<String>,

    /// Pre-filter fields (`subject`, `domain`) among the matching criteria
    pub prefilter_fields: Vec<String>,
}

impl ResolvedCriteria {
    /// Resolve configured criteria against `reference`
    pub fn resolve<S>(
        match_criteria: &BTreeMap<String, CriterionValue>,
        reference: &Document,
        store: &S,
    ) -> Self
    where
        S: DocumentStore + ?Sized,
    {
        let mut resolved = ResolvedCriteria::default();

        for (field, value) in match_criteria {
            let criterion = MatchCriterion::from_config(field, value);
            let (targets, from_reference) = match criterion.mode {
                CriterionMode::Ignore => {
                    resolved.ignored.push(criterion.field);
                    continue;
                }
                CriterionMode::UseCurrent => (
                    store
                        .field_value(reference, field)
                        .map(|value| value.to_list())
                        .unwrap_or_default(),
                    true,
                ),
                CriterionMode::Explicit(values) => (values, false),
            };

            if targets.is_empty() {
                resolved.unresolved.push(criterion.field);
                continue;
            }

            if PREFILTER_FIELDS.contains(&field.as_str()) {
                resolved.prefilter_fields.push(field.clone());
            }
            resolved.criteria.push(ResolvedCriterion {
                field: criterion.field,
                targets,
                from_reference,
            });
        }

        resolved
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedCriterion> {
        self.criteria.iter()
    }

    /// Total number of target values across all criteria
    pub fn target_count(&self) -> usize {
        self.criteria.iter().map(|c| c.targets.len()).sum()
    }
}
