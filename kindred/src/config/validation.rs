//! Configuration validation utilities.

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
pub fn validate_config(config: &KindredConfig) -> Result<(), ConfigError> {
    validate_related_options(&config.related)?;
    validate_logging_config(&config.logging)?;

    Ok(())
}

/// Validate related-page scoring options.
fn validate_related_options(options: &RelatedOptions) -> Result<(), ConfigError> {
    options.validate().map_err(ConfigError::ValidationError)
}

/// Validate logging configuration.
fn validate_logging_config(config: &LoggingConfig) -> Result<(), ConfigError> {
    if let Some(file) = &config.file
        && file.as_os_str().is_empty()
    {
        return Err(ConfigError::ValidationError(
            "Log file path cannot be empty".to_string(),
        ));
    }

    if !config.stdout && config.file.is_none() {
        tracing::warn!("Logging has neither stdout nor a file configured; log output is discarded");
    }

    Ok(())
}
