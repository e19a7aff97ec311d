use crate::config::types::{Config, FetchConfig, OutputConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates live request configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    // Must be representable as an HTTP header value
    if config.user_agent.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "user_agent contains control characters: {:?}",
            config.user_agent
        )));
    }

    if config.timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_user_agent() {
        let mut config = FetchConfig::default();
        config.user_agent = "   ".to_string();
        assert!(validate_fetch_config(&config).is_err());

        config.user_agent = "Bot/1.0\r\nX-Injected: yes".to_string();
        assert!(validate_fetch_config(&config).is_err());

        config.user_agent = "Bot/1.0 (+https://example.com/bot)".to_string();
        assert!(validate_fetch_config(&config).is_ok());
    }

    #[test]
    fn test_validate_timeout() {
        let mut config = FetchConfig::default();
        config.timeout_secs = Some(0);
        assert!(validate_fetch_config(&config).is_err());

        config.timeout_secs = Some(30);
        assert!(validate_fetch_config(&config).is_ok());
    }

    #[test]
    fn test_validate_database_path() {
        let config = OutputConfig {
            database_path: String::new(),
        };
        assert!(validate_output_config(&config).is_err());
    }
}
