use crate::config::types::{ArchiveConfig, Config, DownloadConfig, RetryConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_archive_config(&config.archive)?;
    validate_download_config(&config.download)?;
    validate_retry_config(&config.retry)?;
    Ok(())
}

/// Validates the archive endpoints
fn validate_archive_config(config: &ArchiveConfig) -> Result<(), ConfigError> {
    validate_host(&config.catalog_host, "catalog-host")?;
    validate_host(&config.download_host, "download-host")?;
    Ok(())
}

/// Validates a single host URL
///
/// HTTP is accepted alongside HTTPS so tests can point the crawler at local
/// mock servers.
fn validate_host(host: &str, field: &str) -> Result<(), ConfigError> {
    let url = Url::parse(host)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", field, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} must use http or https, got '{}'",
            field,
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::Validation(format!(
            "{} is missing a host: '{}'",
            field, host
        )));
    }

    Ok(())
}

/// Validates download configuration
fn validate_download_config(config: &DownloadConfig) -> Result<(), ConfigError> {
    if config.start_page < 1 {
        return Err(ConfigError::Validation(format!(
            "start-page must be >= 1, got {}",
            config.start_page
        )));
    }

    if let Some(root) = &config.output_root {
        if root.is_empty() {
            return Err(ConfigError::Validation(
                "output-root cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates retry configuration
fn validate_retry_config(config: &RetryConfig) -> Result<(), ConfigError> {
    if config.page_delay_ms == 0 {
        return Err(ConfigError::Validation(
            "page-delay-ms must be > 0".to_string(),
        ));
    }

    if config.file_delay_ms == 0 {
        return Err(ConfigError::Validation(
            "file-delay-ms must be > 0".to_string(),
        ));
    }

    if config.request_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "request-timeout-ms must be > 0".to_string(),
        ));
    }

    if let Some(max) = config.max_attempts {
        if max < 1 {
            return Err(ConfigError::Validation(format!(
                "max-attempts must be >= 1 when set, got {}",
                max
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileFormat;

    fn valid_config() -> Config {
        Config {
            archive: ArchiveConfig {
                catalog_host: "https://archiveofourown.org".to_string(),
                download_host: "https://download.archiveofourown.org".to_string(),
            },
            download: DownloadConfig {
                file_format: FileFormat::Pdf,
                start_page: 1,
                output_root: Some("./downloads".to_string()),
            },
            retry: RetryConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_http_host_allowed() {
        let mut config = valid_config();
        config.archive.catalog_host = "http://127.0.0.1:8080".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_scheme_rejected() {
        let mut config = valid_config();
        config.archive.download_host = "ftp://archiveofourown.org".to_string();
        let result = validate(&config);
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_malformed_host_rejected() {
        let mut config = valid_config();
        config.archive.catalog_host = "not a url".to_string();
        let result = validate(&config);
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_zero_start_page_rejected() {
        let mut config = valid_config();
        config.download.start_page = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_output_root_rejected() {
        let mut config = valid_config();
        config.download.output_root = Some(String::new());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_missing_output_root_allowed() {
        // An unset output root is valid at load time; the download operation
        // itself refuses to start without one.
        let mut config = valid_config();
        config.download.output_root = None;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_delays_rejected() {
        let mut config = valid_config();
        config.retry.page_delay_ms = 0;
        assert!(validate(&config).is_err());

        let mut config = valid_config();
        config.retry.file_delay_ms = 0;
        assert!(validate(&config).is_err());

        let mut config = valid_config();
        config.retry.request_timeout_ms = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_max_attempts_rejected() {
        let mut config = valid_config();
        config.retry.max_attempts = Some(0);
        assert!(validate(&config).is_err());
    }
}
