//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use std::collections::BTreeMap;
use std::path::Path;

/// Builder for creating KindredConfig instances.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: KindredConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: KindredConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: KindredConfig) -> Self {
        Self { config }
    }

    /// Add or replace the criterion for `field`.
    pub fn with_criterion(mut self, field: impl Into<String>, value: CriterionValue) -> Self {
        self.config.related.match_criteria.insert(field.into(), value);
        self
    }

    /// Remove `field` from the criteria entirely.
    pub fn without_criterion(mut self, field: &str) -> Self {
        self.config.related.match_criteria.remove(field);
        self
    }

    /// Replace every criterion.
    pub fn with_match_criteria(mut self, criteria: BTreeMap<String, CriterionValue>) -> Self {
        self.config.related.match_criteria = criteria;
        self
    }

    /// Configure path proximity scoring.
    pub fn with_include_path(mut self, include_path: IncludePath) -> Self {
        self.config.related.include_path = include_path;
        self
    }

    /// Drop candidates outside the reference folder tree.
    pub fn with_strict_path(mut self, strict: bool) -> Self {
        self.config.related.strict_path = strict;
        self
    }

    /// Set the minimum confidence as a fraction (0.0 - 1.0).
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.config.related.min_score = min_score;
        self
    }

    /// Set the maximum number of results.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.config.related.max_results = max_results;
        self
    }

    /// Set the points awarded per matched value.
    pub fn with_score_multiplier(mut self, multiplier: f64) -> Self {
        self.config.related.score_multiplier = multiplier;
        self
    }

    /// Replace all related-page options at once.
    pub fn with_related_options(mut self, options: RelatedOptions) -> Self {
        self.config.related = options;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Configuration for development: debug logging in a readable format.
    pub fn development() -> Self {
        Self::new()
            .with_log_level(LogLevel::Debug)
            .with_log_format(LogFormat::Pretty)
    }

    /// Configuration for tests: every match is returned, errors only in logs.
    pub fn testing() -> Self {
        Self::new().with_min_score(0.0).with_log_level(LogLevel::Error)
    }

    /// Only documents in the reference's folder tree.
    pub fn folder_focused() -> Self {
        Self::new().with_related_options(RelatedOptions::folder_focused())
    }

    /// Metadata matches only, ignoring document locations.
    pub fn metadata_only() -> Self {
        Self::new().with_related_options(RelatedOptions::metadata_only())
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<KindredConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}
