use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Output suffix is a bare extension
/// - Encode parameters are in range
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.output.suffix.is_empty() {
        return Err(ConfigError::ValidationError(
            "output.suffix cannot be empty".to_string(),
        ));
    }
    if config.output.suffix.contains('.') {
        return Err(ConfigError::ValidationError(
            "output.suffix must not contain a dot".to_string(),
        ));
    }

    if config.encode.sample_rate_hz == Some(0) {
        return Err(ConfigError::ValidationError(
            "encode.sample_rate_hz cannot be 0".to_string(),
        ));
    }
    if let Some(fps) = config.encode.fps {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(ConfigError::ValidationError(
                "encode.fps must be positive".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn validate_empty_suffix_fails() {
        let mut config = Config::default();
        config.output.suffix = String::new();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn validate_dotted_suffix_fails() {
        let mut config = Config::default();
        config.output.suffix = ".wav".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn validate_zero_sample_rate_fails() {
        let mut config = Config::default();
        config.encode.sample_rate_hz = Some(0);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn validate_negative_fps_fails() {
        let mut config = Config::default();
        config.encode.fps = Some(-1.0);
        assert!(validate_config(&config).is_err());
    }
}
