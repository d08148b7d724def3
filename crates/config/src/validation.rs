//! Configuration validation
//!
//! Validates config consistency:
//! - Required forwarder fields are present
//! - Buffer size is within bounds
//! - Periodic flushing is only requested when buffering is enabled
//! - Identity overrides are not blank

use crate::Config;
use crate::error::{ConfigError, Result};
use crate::forwarder::{ForwarderConfig, MAX_BUFFER_SIZE};

const SECTION: &str = "forwarder";

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_forwarder(&config.forwarder)?;
    Ok(())
}

/// Validate the forwarder section
pub fn validate_forwarder(forwarder: &ForwarderConfig) -> Result<()> {
    if forwarder.connection.trim().is_empty() {
        return Err(ConfigError::missing_field(SECTION, "connection"));
    }

    if forwarder.app_name.trim().is_empty() {
        return Err(ConfigError::missing_field(SECTION, "app_name"));
    }

    if forwarder.buffer_size > MAX_BUFFER_SIZE {
        return Err(ConfigError::invalid_value(
            SECTION,
            "buffer_size",
            format!("must be at most {MAX_BUFFER_SIZE}"),
        ));
    }

    if forwarder.periodic_flush && !forwarder.is_buffered() {
        return Err(ConfigError::invalid_value(
            SECTION,
            "periodic_flush",
            "requires non-zero flush_interval and buffer_size",
        ));
    }

    if let Some(timeout) = forwarder.write_timeout
        && timeout.is_zero()
    {
        return Err(ConfigError::invalid_value(
            SECTION,
            "write_timeout",
            "must be greater than zero",
        ));
    }

    for (field, value) in [("host", &forwarder.host), ("proc_id", &forwarder.proc_id)] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(ConfigError::invalid_value(SECTION, field, "must not be blank"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn valid() -> Config {
        Config {
            forwarder: ForwarderConfig {
                connection: "http://localhost:8181?database=logs".into(),
                app_name: "api".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_missing_connection() {
        let mut config = valid();
        config.forwarder.connection = "  ".into();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField {
                field: "connection",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_app_name() {
        let mut config = valid();
        config.forwarder.app_name.clear();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("app_name"));
    }

    #[test]
    fn test_buffer_too_large() {
        let mut config = valid();
        config.forwarder.buffer_size = MAX_BUFFER_SIZE + 1;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("buffer_size"));
    }

    #[test]
    fn test_periodic_flush_requires_buffering() {
        let mut config = valid();
        config.forwarder.periodic_flush = true;
        config.forwarder.buffer_size = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("periodic_flush"));

        config.forwarder.buffer_size = 10;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_write_timeout() {
        let mut config = valid();
        config.forwarder.write_timeout = Some(Duration::ZERO);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_blank_host() {
        let mut config = valid();
        config.forwarder.host = Some(String::new());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("host"));
    }
}
