//! Typed responses of the signature service
//!
//! Field names follow the service's camelCase JSON. Required fields are
//! plain; anything the service may omit is an `Option`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl LoginResponse {
    /// Best available label for the authenticated identity
    pub fn display_name(&self) -> &str {
        let profile = self.user.as_ref();

        profile
            .and_then(|u| u.name.as_deref())
            .or_else(|| profile.and_then(|u| u.email.as_deref()))
            .or(self.email.as_deref())
            .or_else(|| profile.and_then(|u| u.id.as_deref()))
            .or(self.user_id.as_deref())
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub document_id: String,
    /// Size in bytes as stored by the service
    pub size: u64,
    #[serde(default)]
    pub filename: Option<String>,
    /// SHA-256 of the stored document, hex encoded
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateValidity {
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateInfo {
    pub subject: String,
    pub issuer: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub validity: Option<CertificateValidity>,
    /// CPF or CNPJ embedded in an ICP-Brasil certificate
    #[serde(default)]
    pub cpf_cnpj: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignResponse {
    pub signature_id: String,
    pub certificate_info: CertificateInfo,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub signed_at: Option<DateTime<Utc>>,
    /// Signature standard applied by the service, e.g. "ICP-Brasil"
    #[serde(default)]
    pub standard: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationDetails {
    pub chain_valid: bool,
    pub not_revoked: bool,
    pub time_valid: bool,
    #[serde(default)]
    pub policy_valid: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureResult {
    pub signature_id: String,
    pub certificate_info: CertificateInfo,
    pub is_valid: bool,
    pub signed_at: DateTime<Utc>,
    #[serde(default)]
    pub validation_details: Option<ValidationDetails>,
}

/// Signatures attached to a document, in the order the service lists them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub total_signatures: u32,
    pub signatures: Vec<SignatureResult>,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub document_hash: Option<String>,
}

impl VerificationReport {
    pub fn all_valid(&self) -> bool {
        self.signatures.iter().all(|s| s.is_valid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: String,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub signatures_count: u32,
    pub is_fully_signed: bool,
    #[serde(default)]
    pub last_signed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentList {
    pub documents: Vec<DocumentSummary>,
}
