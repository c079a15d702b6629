//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");

    if let Some(output) = &config.output_file {
        if output.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "output_file".to_string(),
                message: "cannot be empty".to_string(),
            }
            .into());
        }
        if output.is_absolute() {
            return Err(ConfigError::InvalidValue {
                field: "output_file".to_string(),
                message: "must be relative to the project root".to_string(),
            }
            .into());
        }
    }

    debug!("configuration validation passed");
    Ok(())
}
