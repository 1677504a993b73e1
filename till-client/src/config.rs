//! Client configuration

use crate::{ClientResult, NetworkHttpClient, TillClient};

/// Production backend
pub const DEFAULT_BASE_URL: &str = "https://inventoryonline.onrender.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the inventory backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server base URL (e.g., "https://inventoryonline.onrender.com")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }

    /// Create the API client from this configuration
    pub fn build_client(&self) -> ClientResult<TillClient> {
        TillClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://localhost:8080").with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, 5);
    }

    #[test]
    fn test_build_http_client_trims_trailing_slash() {
        let http = ClientConfig::new("http://localhost:8080/")
            .build_http_client()
            .unwrap();
        assert_eq!(http.base_url(), "http://localhost:8080");
    }
}
