//! ICP-Brasil API Session Client
//!
//! Thin typed client for the ICP-Brasil digital signature service:
//! - A Session holds the base endpoint and at most one bearer token
//! - One operation per remote capability (login, upload, sign, verify,
//!   list, download, logout)
//! - Every failure surfaces through `ClientError`
//! - Certificate validation and signature embedding happen server-side

mod client;
mod config;
mod error;
mod session;
mod types;

pub use client::{SessionClient, DEFAULT_HASH_ALGORITHM};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use session::Session;
pub use types::{
    CertificateInfo, CertificateValidity, DocumentList, DocumentSummary, LoginResponse,
    SignResponse, SignatureResult, UploadResponse, UserProfile, ValidationDetails,
    VerificationReport,
};

pub type Result<T> = std::result::Result<T, ClientError>;
