//! ICP-Brasil API Core
//!
//! Coordination layer for the demonstration client: configuration,
//! canned scenarios and console reporting on top of `icp-client`.

mod config;
mod demo;
mod error;
mod report;
mod scenario;

pub use config::Config;
pub use demo::{Demo, ScenarioOutcome};
pub use error::CoreError;
pub use report::Reporter;
pub use scenario::Scenario;

// Re-export the session client
pub use icp_client::{
    CertificateInfo, ClientConfig, ClientError, DocumentList, DocumentSummary, LoginResponse,
    Session, SessionClient, SignResponse, SignatureResult, UploadResponse, ValidationDetails,
    VerificationReport, DEFAULT_BASE_URL, DEFAULT_HASH_ALGORITHM,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// Log lines go to stderr so stdout carries only the scenario report.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
