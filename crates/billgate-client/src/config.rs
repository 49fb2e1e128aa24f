//! Document client configuration.
//!
//! Points the client at the internal document service. The process builds
//! this from its command-line settings; tests construct it directly.

use url::Url;

/// Configuration for reaching the internal document service.
#[derive(Debug, Clone)]
pub struct DocumentClientConfig {
    /// Base URL of the internal service. Always ends in `/`.
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl DocumentClientConfig {
    /// Build a configuration from an explicit base URL.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("base_url", base_url)?,
            timeout_secs,
        })
    }
}

/// Parse a base URL, forcing a trailing slash so relative paths append
/// instead of replacing the last segment.
fn parse_base_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("unsupported URL scheme {0:?}; expected http or https")]
    UnsupportedScheme(String),
}
