//! Remote adapters - REST implementations of the domain ports
//!
//! Concrete clients for the directory service and the management plane,
//! sharing one connection configuration.

pub mod directory;
pub mod management;

pub use directory::RestDirectory;
pub use management::RestManagementPlane;

use crate::error::Result;
use std::time::Duration;

// =============================================================================
// Configuration
// =============================================================================

/// Connection configuration shared by the remote adapters
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the management endpoint
    pub endpoint: String,
    /// Username for basic authentication
    pub username: String,
    /// Password (should come from the environment in production)
    pub password: String,
    /// Datacenter used to qualify relative inventory paths
    pub datacenter: Option<String>,
    /// Skip TLS certificate verification
    pub insecure: bool,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://localhost:9443/api".to_string(),
            username: "administrator".to_string(),
            password: String::new(),
            datacenter: None,
            insecure: false,
            timeout_secs: 120,
        }
    }
}

impl RemoteConfig {
    /// Build the HTTP client both adapters run on
    pub(crate) fn http_client(&self) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .danger_accept_invalid_certs(self.insecure)
            .build()?;
        Ok(client)
    }

    /// Join a path onto the endpoint base URL
    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let config = RemoteConfig {
            endpoint: "https://mgmt.example.com/api/".into(),
            ..Default::default()
        };
        assert_eq!(
            config.url("/cluster/stretch"),
            "https://mgmt.example.com/api/cluster/stretch"
        );
        assert_eq!(
            config.url("inventory/resolve"),
            "https://mgmt.example.com/api/inventory/resolve"
        );
    }
}
