//! Client configuration

use serde::{Deserialize, Serialize};

/// Local development address of the signature service
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base endpoint, e.g. `http://localhost:3000/api`
    pub base_url: String,
    /// Transport timeout; `None` waits for the server indefinitely
    pub timeout_secs: Option<u64>,
    /// Value of the User-Agent header sent with every request
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: Option<u64>) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn default_user_agent() -> String {
        format!("ICP-Brasil-API-Client/{} (Rust)", env!("CARGO_PKG_VERSION"))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            user_agent: Self::default_user_agent(),
        }
    }
}
