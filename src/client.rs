use crate::error::Result;
use reqwest::blocking::{Client, ClientBuilder};
use std::time::Duration;

/// Default Graph API version
pub const DEFAULT_API_VERSION: &str = "v23.0";

/// Graph API endpoint
pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com";

/// Per-call timeout applied to every outbound request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the HTTP client for Graph API requests
/// with connection pooling and the configured per-call timeout
pub fn create_graph_client(config: &Config) -> Result<Client> {
    let client = ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .timeout(config.timeout)
        .connect_timeout(Duration::from_secs(10))
        .build()?;
    Ok(client)
}

/// Configuration for the Graph API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API endpoint, without trailing slash
    pub base_url: String,
    /// API version segment, e.g. "v23.0"
    pub api_version: String,
    /// Timeout for a single request
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Create a configuration pointing at a custom endpoint
    pub fn new(base_url: &str) -> Self {
        Config {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Config::default()
        }
    }

    /// Set the API version
    pub fn with_api_version(mut self, version: &str) -> Self {
        self.api_version = version.to_string();
        self
    }

    /// Set the API endpoint
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Set the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://graph.facebook.com");
        assert_eq!(config.api_version, "v23.0");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_custom_base_url_strips_trailing_slash() {
        let config = Config::new("http://localhost:9000/");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
    }

    #[test]
    fn test_builder_setters() {
        let config = Config::default()
            .with_api_version("v19.0")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.api_version, "v19.0");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
