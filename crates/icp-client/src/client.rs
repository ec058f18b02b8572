//! Session client
//!
//! Each operation is request → status check → body decode. Identifiers
//! returned by one call (document id, signature id) are passed into the
//! next one by the caller.

use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use crate::config::ClientConfig;
use crate::error::{error_message, ClientError};
use crate::session::Session;
use crate::types::{
    DocumentList, LoginResponse, SignResponse, UploadResponse, VerificationReport,
};
use crate::Result;

/// Hash algorithm requested when the caller does not name one
pub const DEFAULT_HASH_ALGORITHM: &str = "SHA-256";

const CERTIFICATE_MIME_TYPE: &str = "application/x-pkcs12";

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug)]
pub struct SessionClient {
    session: Session,
    http: Client,
}

impl SessionClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = url::Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl(format!(
                "{}: unsupported scheme '{}'",
                config.base_url,
                base_url.scheme()
            )));
        }

        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            session: Session::new(config.base_url),
            http,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Authenticate and keep the returned token for every later call
    pub async fn login(&mut self, email: &str, password: &str) -> Result<LoginResponse> {
        let request = self
            .request(Method::POST, "/auth/login")
            .json(&Credentials { email, password });

        let response = self.execute(request).await.map_err(|e| match e {
            ClientError::Application { status, message } => {
                ClientError::Authentication { status, message }
            }
            other => other,
        })?;
        let login: LoginResponse = decode(response, "login").await?;

        self.session.set_token(login.token.clone());
        tracing::info!(user = %login.display_name(), "Logged in");

        Ok(login)
    }

    /// Upload a document; a missing file fails before anything is sent
    pub async fn upload_document(&self, file_path: impl AsRef<Path>) -> Result<UploadResponse> {
        let file_path = file_path.as_ref();
        let part = file_part(file_path, document_mime_type(file_path)).await?;
        let form = Form::new().part("file", part);

        let request = self
            .request(Method::POST, "/documents/upload")
            .multipart(form);
        let response = self.execute(request).await?;
        let upload: UploadResponse = decode(response, "upload").await?;

        tracing::info!(
            document_id = %upload.document_id,
            size = upload.size,
            "Uploaded document"
        );

        Ok(upload)
    }

    /// Ask the service to sign a previously uploaded document.
    ///
    /// `hash_algorithm` defaults to [`DEFAULT_HASH_ALGORITHM`] and is sent
    /// as given; the service decides whether it is acceptable.
    pub async fn sign_document(
        &self,
        document_id: &str,
        certificate_path: impl AsRef<Path>,
        password: &str,
        hash_algorithm: Option<&str>,
    ) -> Result<SignResponse> {
        let certificate_path = certificate_path.as_ref();
        let hash_algorithm = hash_algorithm.unwrap_or(DEFAULT_HASH_ALGORITHM);

        let certificate = file_part(certificate_path, CERTIFICATE_MIME_TYPE).await?;
        let form = Form::new()
            .part("certificate", certificate)
            .text("certificatePassword", password.to_string())
            .text("hashAlgorithm", hash_algorithm.to_string());

        let path = format!("/documents/{}/sign-icp", urlencoding::encode(document_id));
        let response = self
            .execute(self.request(Method::POST, &path).multipart(form))
            .await?;
        let signed: SignResponse = decode(response, "sign").await?;

        tracing::info!(
            document_id = %document_id,
            signature_id = %signed.signature_id,
            hash_algorithm = %hash_algorithm,
            "Signed document"
        );

        Ok(signed)
    }

    pub async fn verify_document(&self, document_id: &str) -> Result<VerificationReport> {
        let path = format!("/documents/{}/verify", urlencoding::encode(document_id));
        let response = self.execute(self.request(Method::GET, &path)).await?;
        let report: VerificationReport = decode(response, "verify").await?;

        tracing::info!(
            document_id = %document_id,
            total_signatures = report.total_signatures,
            "Verified document"
        );

        Ok(report)
    }

    /// Stream the signed artifact to `output_path` (created or truncated)
    /// and return that path.
    pub async fn download_signed_document(
        &self,
        document_id: &str,
        output_path: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let output_path = output_path.as_ref().to_path_buf();
        let path = format!(
            "/documents/{}/download/signed",
            urlencoding::encode(document_id)
        );

        // Status is checked before the output file is touched
        let response = self.execute(self.request(Method::GET, &path)).await?;

        let mut file = tokio::fs::File::create(&output_path).await?;
        let written = match write_body(response, &mut file).await {
            Ok(written) => written,
            Err(e) => {
                drop(file);
                let _ = tokio::fs::remove_file(&output_path).await;
                return Err(e);
            }
        };

        tracing::info!(
            document_id = %document_id,
            path = %output_path.display(),
            bytes = written,
            "Downloaded signed document"
        );

        Ok(output_path)
    }

    /// Documents owned by the authenticated identity
    pub async fn get_my_documents(&self) -> Result<DocumentList> {
        let response = self
            .execute(self.request(Method::GET, "/users/my-documents"))
            .await?;
        let list: DocumentList = decode(response, "document list").await?;

        tracing::info!(count = list.documents.len(), "Listed documents");

        Ok(list)
    }

    /// Ask the service to invalidate the token. The local token is cleared
    /// whatever the service answers; its failure is still returned.
    pub async fn logout(&mut self) -> Result<()> {
        let result = self
            .execute(self.request(Method::POST, "/auth/logout"))
            .await;
        self.session.clear_token();

        match result {
            Ok(_) => {
                tracing::info!("Logged out");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Logout failed on server, local token cleared");
                Err(e)
            }
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.session.endpoint(path);
        tracing::info!(method = %method, url = %url, "Sending request");

        let request = self.http.request(method, url);
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request; transport failures and non-success statuses both
    /// come back as `ClientError`.
    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, "Request failed");
            ClientError::Transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(status = %status, "Request succeeded");
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = error_message(status, &body);
        tracing::warn!(status = %status, message = %message, "Request rejected");

        Err(ClientError::Application { status, message })
    }
}

async fn decode<T: DeserializeOwned>(response: Response, context: &'static str) -> Result<T> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| ClientError::Decode { context, source })
}

async fn write_body(response: Response, file: &mut tokio::fs::File) -> Result<u64> {
    let mut stream = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written = written.saturating_add(chunk.len() as u64);
    }
    file.flush().await?;

    Ok(written)
}

/// Multipart part streaming the file at `path`
async fn file_part(path: &Path, mime_type: &str) -> Result<Part> {
    let file = match tokio::fs::File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ClientError::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };

    let metadata = file.metadata().await?;
    if !metadata.is_file() {
        return Err(ClientError::NotFound(path.to_path_buf()));
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    let part = Part::stream_with_length(Body::from(file), metadata.len())
        .file_name(file_name)
        .mime_str(mime_type)?;

    Ok(part)
}

fn document_mime_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_mime_type() {
        assert_eq!(document_mime_type(Path::new("contrato.pdf")), "application/pdf");
        assert_eq!(document_mime_type(Path::new("CONTRATO.PDF")), "application/pdf");
        assert_eq!(document_mime_type(Path::new("notas.txt")), "text/plain");
        assert_eq!(
            document_mime_type(Path::new("archive.tar.gz")),
            "application/octet-stream"
        );
        assert_eq!(document_mime_type(Path::new("README")), "application/octet-stream");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let err = SessionClient::new(ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));

        let err = SessionClient::new(ClientConfig::new("ftp://localhost/api")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_new_client_is_unauthenticated() {
        let client = SessionClient::new(ClientConfig::default()).unwrap();
        assert!(!client.is_authenticated());
        assert_eq!(client.session().base_url(), "http://localhost:3000/api");
    }

    #[tokio::test]
    async fn test_missing_file_part() {
        let err = file_part(Path::new("/definitely/not/here.pdf"), "application/pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound(p) if p == Path::new("/definitely/not/here.pdf")));
    }
}
