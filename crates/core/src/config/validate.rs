use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Container extension is non-empty and carries no dot
/// - Destination root is non-empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.muxer.container_ext.is_empty() || config.muxer.container_ext.contains('.') {
        return Err(ConfigError::ValidationError(format!(
            "muxer.container_ext must be a bare extension, got {:?}",
            config.muxer.container_ext
        )));
    }

    if config.storage.destination_root.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.destination_root cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_dotted_extension_fails() {
        let mut config = Config::default();
        config.muxer.container_ext = ".mp4".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_empty_destination_root_fails() {
        let mut config = Config::default();
        config.storage.destination_root = "".into();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
