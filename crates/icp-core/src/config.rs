//! Demonstration configuration

use icp_client::{ClientConfig, DEFAULT_HASH_ALGORITHM};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Endpoint, timeout and user agent of the session client
    pub client: ClientConfig,
    /// Login email
    pub email: String,
    /// Login password
    pub password: String,
    /// Document uploaded by the scenarios
    pub document_path: PathBuf,
    /// PKCS#12 certificate used to sign, skipped when absent
    pub certificate_path: PathBuf,
    /// Password protecting the certificate
    pub certificate_password: String,
    /// Hash algorithm requested from the service
    pub hash_algorithm: String,
    /// Directory receiving signed artifacts
    pub output_dir: PathBuf,
}

impl Config {
    pub fn new(assets_dir: PathBuf) -> Self {
        Self {
            client: ClientConfig::default(),
            email: "admin@test.com".to_string(),
            password: "admin123".to_string(),
            document_path: assets_dir.join("test-document.pdf"),
            certificate_path: assets_dir.join("test-certificate.p12"),
            certificate_password: "test123".to_string(),
            hash_algorithm: DEFAULT_HASH_ALGORITHM.to_string(),
            output_dir: PathBuf::from("."),
        }
    }

    pub fn assets_dir() -> PathBuf {
        PathBuf::from("assets")
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client.base_url = base_url.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.client.base_url.trim().is_empty() {
            return Err(CoreError::Config("base URL cannot be empty".to_string()));
        }
        if self.email.trim().is_empty() {
            return Err(CoreError::Config("email cannot be empty".to_string()));
        }
        if self.hash_algorithm.trim().is_empty() {
            return Err(CoreError::Config("hash algorithm cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Where the signed artifact of `document_id` is written
    pub fn signed_output_path(&self, document_id: &str) -> PathBuf {
        let file_name = format!("documento_assinado_{}.p7s", document_id);
        self.output_dir.join(sanitize_file_name(&file_name))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::assets_dir())
    }
}

/// Keep only the final path component so server ids cannot escape the
/// output directory
fn sanitize_file_name(file_name: &str) -> String {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("documento_assinado.p7s")
        .trim();

    if name.is_empty() {
        "documento_assinado.p7s".to_string()
    } else {
        name.to_string()
    }
}
