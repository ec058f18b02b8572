use clap::Parser;
use std::path::PathBuf;

use icp_core::{Config, Scenario, DEFAULT_BASE_URL};

#[derive(Parser, Debug)]
#[command(
    name = "icp-demo",
    version,
    about = "Demonstration client for the ICP-Brasil digital signature API"
)]
pub struct Cli {
    /// Scenario to run: full, simple or upload
    #[arg(short = 'e', long, default_value = "full")]
    pub scenario: Scenario,

    /// Base URL of the API
    #[arg(short = 'u', long, env = "ICP_API_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long, env = "ICP_API_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Login email
    #[arg(long)]
    pub email: Option<String>,

    /// Login password
    #[arg(long)]
    pub password: Option<String>,

    /// Directory holding test-document.pdf and test-certificate.p12
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,

    /// Document to upload (overrides the assets directory)
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// PKCS#12 certificate used for signing (overrides the assets directory)
    #[arg(long)]
    pub certificate: Option<PathBuf>,

    /// Certificate password
    #[arg(long)]
    pub certificate_password: Option<String>,

    /// Hash algorithm requested from the service
    #[arg(long)]
    pub hash_algorithm: Option<String>,

    /// Directory receiving the signed document
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

impl Cli {
    pub fn into_config(self) -> Config {
        let assets_dir = self.assets_dir.unwrap_or_else(Config::assets_dir);
        let mut config = Config::new(assets_dir).with_base_url(self.url);
        config.client.timeout_secs = self.timeout;

        if let Some(email) = self.email {
            config.email = email;
        }
        if let Some(password) = self.password {
            config.password = password;
        }
        if let Some(document) = self.document {
            config.document_path = document;
        }
        if let Some(certificate) = self.certificate {
            config.certificate_path = certificate;
        }
        if let Some(certificate_password) = self.certificate_password {
            config.certificate_password = certificate_password;
        }
        if let Some(hash_algorithm) = self.hash_algorithm {
            config.hash_algorithm = hash_algorithm;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }

        config
    }
}
