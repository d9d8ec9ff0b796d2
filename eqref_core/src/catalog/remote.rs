//! # Remote Catalog
//!
//! Fetches the catalog from an HTTP service: `GET {base_url}/equations`,
//! answering either a catalog document or a bare JSON array.
//!
//! Blocking; callers that need the UI to stay live run it on a worker thread.

use std::time::Duration;

use tracing::debug;

use super::{parse_catalog_json, CatalogProvider};
use crate::equations::EquationDefinition;
use crate::errors::{EqRefError, EqRefResult};

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP catalog provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCatalog {
    pub base_url: String,
    pub timeout: Duration,
}

impl RemoteCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        RemoteCatalog {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{base}/equations`, without doubling a trailing slash
    pub fn endpoint(&self) -> String {
        format!("{}/equations", self.base_url.trim_end_matches('/'))
    }

    fn unavailable(&self, reason: impl Into<String>) -> EqRefError {
        EqRefError::catalog_unavailable(self.endpoint(), reason)
    }
}

impl CatalogProvider for RemoteCatalog {
    fn name(&self) -> &str {
        "remote"
    }

    fn fetch(&self) -> EqRefResult<Vec<EquationDefinition>> {
        let endpoint = self.endpoint();
        debug!(%endpoint, "fetching remote catalog");

        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("eqref/{}", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .build()
            .map_err(|e| self.unavailable(format!("Failed to create HTTP client: {}", e)))?;

        let response = client
            .get(&endpoint)
            .send()
            .map_err(|e| self.unavailable(format!("Network error: {}", e)))?;

        if !response.status().is_success() {
            return Err(self.unavailable(format!("Server returned {}", response.status())));
        }

        let body = response
            .text()
            .map_err(|e| self.unavailable(format!("Failed to read response: {}", e)))?;

        parse_catalog_json(&body, &endpoint).map_err(|e| self.unavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_has_single_slash() {
        assert_eq!(
            RemoteCatalog::new("http://localhost:8080/").endpoint(),
            "http://localhost:8080/equations"
        );
        assert_eq!(
            RemoteCatalog::new("http://localhost:8080").endpoint(),
            "http://localhost:8080/equations"
        );
    }

    #[test]
    fn test_unreachable_server_is_catalog_unavailable() {
        // Port 9 (discard) on loopback is not expected to serve HTTP
        let provider = RemoteCatalog::new("http://127.0.0.1:9").with_timeout(Duration::from_millis(500));
        let err = provider.fetch().unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_UNAVAILABLE");
    }
}
