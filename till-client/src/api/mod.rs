//! Typed access to the inventory backend endpoints

pub mod auth;
pub mod overview;
pub mod products;
pub mod reports;
pub mod sales;

use crate::{ClientConfig, ClientResult, HttpClient, NetworkHttpClient};

/// Join path segments, percent-encoding each one
pub(crate) fn endpoint(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|segment| urlencoding::encode(segment))
        .collect::<Vec<_>>()
        .join("/")
}

/// Inventory backend client
///
/// Generic over the transport so tests can run against an in-process
/// server or a stub.
#[derive(Debug, Clone)]
pub struct TillClient<H = NetworkHttpClient> {
    http: H,
}

impl TillClient<NetworkHttpClient> {
    /// Create a client over the network transport
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: NetworkHttpClient::new(config)?,
        })
    }
}

impl<H: HttpClient> TillClient<H> {
    /// Wrap an existing transport
    pub fn with_http(http: H) -> Self {
        Self { http }
    }

    /// Underlying transport
    pub fn http(&self) -> &H {
        &self.http
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_each_segment() {
        assert_eq!(endpoint(&["api", "products", "p1"]), "api/products/p1");
        assert_eq!(endpoint(&["api", "sales", "a/b?c d"]), "api/sales/a%2Fb%3Fc%20d");
    }
}
