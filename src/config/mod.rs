use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::cloudfront::request::DISTRIBUTION_ID_PLACEHOLDER;

/// CloudFront API endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API host (default: cloudfront.amazonaws.com)
    #[serde(default = "default_host")]
    pub host: String,

    /// Request path with a `{distribution_id}` placeholder
    #[serde(default = "default_path_template")]
    pub path_template: String,

    /// Request timeout in seconds (0 = no timeout)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub insecure_tls: bool,
}

fn default_host() -> String {
    "cloudfront.amazonaws.com".to_string()
}

fn default_path_template() -> String {
    "/2010-11-01/distribution/{distribution_id}/invalidation".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            path_template: default_path_template(),
            request_timeout_secs: default_request_timeout(),
            insecure_tls: false,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            anyhow::bail!("API host must not be empty");
        }
        if !self.path_template.starts_with('/') {
            anyhow::bail!("API path template must start with '/': {}", self.path_template);
        }
        if !self.path_template.contains(DISTRIBUTION_ID_PLACEHOLDER) {
            anyhow::bail!(
                "API path template must contain {}: {}",
                DISTRIBUTION_ID_PLACEHOLDER,
                self.path_template
            );
        }
        Ok(())
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

/// Load configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path.as_ref())
        .context(format!("Failed to read config file: {:?}", path.as_ref()))?;

    let config: Config =
        serde_yaml::from_str(&content).context("Failed to parse YAML configuration")?;

    config.api.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// - CF_API_HOST (optional, defaults to cloudfront.amazonaws.com)
/// - CF_API_PATH_TEMPLATE (optional)
/// - CF_REQUEST_TIMEOUT (optional, seconds)
/// - CF_INSECURE_TLS (optional, "true" or "1")
pub fn load_from_env() -> Result<Config> {
    // Try to load .env file if it exists (don't fail if it doesn't)
    let _ = dotenvy::dotenv();

    let mut config = Config::default();

    if let Ok(host) = std::env::var("CF_API_HOST") {
        config.api.host = host;
    }

    if let Ok(template) = std::env::var("CF_API_PATH_TEMPLATE") {
        config.api.path_template = template;
    }

    if let Ok(timeout) = std::env::var("CF_REQUEST_TIMEOUT") {
        config.api.request_timeout_secs = timeout
            .parse()
            .context(format!("Invalid CF_REQUEST_TIMEOUT: {}", timeout))?;
    }

    if let Ok(insecure) = std::env::var("CF_INSECURE_TLS") {
        config.api.insecure_tls = insecure == "true" || insecure == "1";
    }

    config.api.validate()?;
    Ok(config)
}

/// Load configuration from a YAML file if given, otherwise from the environment
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    match config_path {
        Some(path) => load_from_yaml(path),
        None => load_from_env(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
api:
  host: cloudfront.example.test
  path_template: /2020-05-31/distribution/{distribution_id}/invalidation
  request_timeout_secs: 5
  insecure_tls: true
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.api.host, "cloudfront.example.test");
        assert_eq!(
            config.api.path_template,
            "/2020-05-31/distribution/{distribution_id}/invalidation"
        );
        assert_eq!(config.api.request_timeout(), Some(Duration::from_secs(5)));
        assert!(config.api.insecure_tls);
        assert!(config.api.validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        let config: Config = serde_yaml::from_str("api: {}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api.host, "cloudfront.amazonaws.com");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert!(!config.api.insecure_tls);
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let api = ApiConfig {
            request_timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert_eq!(api.request_timeout(), None);
    }

    #[test]
    fn test_validate_rejects_bad_templates() {
        let api = ApiConfig {
            path_template: "/2010-11-01/distribution/invalidation".to_string(),
            ..ApiConfig::default()
        };
        assert!(api.validate().is_err());

        let api = ApiConfig {
            path_template: "distribution/{distribution_id}".to_string(),
            ..ApiConfig::default()
        };
        assert!(api.validate().is_err());

        let api = ApiConfig {
            host: "  ".to_string(),
            ..ApiConfig::default()
        };
        assert!(api.validate().is_err());
    }
}
