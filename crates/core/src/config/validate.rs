use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - At least one batch item may run at a time
/// - The upload limit is non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.convert.max_concurrent_items == 0 {
        return Err(ConfigError::ValidationError(
            "convert.max_concurrent_items must be at least 1".to_string(),
        ));
    }

    if config.convert.max_upload_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "convert.max_upload_bytes cannot be 0".to_string(),
        ));
    }

    Ok(())
}
