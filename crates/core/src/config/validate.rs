use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Upload size ceiling is not 0
/// - Ingest base URL carries a scheme
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Upload validation
    if config.upload.max_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "upload.max_bytes cannot be 0".to_string(),
        ));
    }

    // Ingest validation
    if !config.ingest.base_url.contains("://") {
        return Err(ConfigError::ValidationError(format!(
            "ingest.base_url must include a scheme, got {:?}",
            config.ingest.base_url
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IngestConfig, ServerConfig, UploadConfig};
    use std::net::IpAddr;

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let config = Config {
            server: ServerConfig {
                host: "0.0.0.0".parse::<IpAddr>().unwrap(),
                port: 0,
            },
            ..Config::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_zero_upload_ceiling_fails() {
        let config = Config {
            upload: UploadConfig {
                max_bytes: 0,
                ..UploadConfig::default()
            },
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_schemeless_ingest_url_fails() {
        let config = Config {
            ingest: IngestConfig {
                base_url: "a.rtmp.youtube.com/live2".to_string(),
            },
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
