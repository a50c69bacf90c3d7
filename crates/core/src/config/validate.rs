use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Tenants section exists (enforced by serde)
/// - Server port is not 0
/// - Spreadsheet id is non-empty
/// - Pipeline batch size is non-zero
/// - Engagement timeout is non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.tenants.spreadsheet_id.is_empty() {
        return Err(ConfigError::ValidationError(
            "tenants.spreadsheet_id cannot be empty".to_string(),
        ));
    }

    if config.pipeline.batch_size == 0 {
        return Err(ConfigError::ValidationError(
            "pipeline.batch_size cannot be 0".to_string(),
        ));
    }

    if config.engagement.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "engagement.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
