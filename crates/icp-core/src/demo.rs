//! Scenario runner
//!
//! Drives one `SessionClient` through a canned scenario, feeding the ids
//! returned by each call into the next and reporting every step.
//! A failing step aborts the scenario; earlier steps are not undone.

use std::io::Write;
use std::path::PathBuf;

use icp_client::{SessionClient, SignResponse, UploadResponse, VerificationReport};

use crate::config::Config;
use crate::report::Reporter;
use crate::scenario::Scenario;
use crate::Result;

/// Identifiers produced while running a scenario
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioOutcome {
    pub document_id: Option<String>,
    pub signature_id: Option<String>,
    pub signed_document: Option<PathBuf>,
}

pub struct Demo<W: Write> {
    client: SessionClient,
    config: Config,
    reporter: Reporter<W>,
}

impl<W: Write> Demo<W> {
    pub fn new(config: Config, out: W) -> Result<Self> {
        config.validate()?;
        let client = SessionClient::new(config.client.clone())?;

        Ok(Self {
            client,
            config,
            reporter: Reporter::new(out),
        })
    }

    pub fn client(&self) -> &SessionClient {
        &self.client
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn reporter(&mut self) -> &mut Reporter<W> {
        &mut self.reporter
    }

    pub fn into_output(self) -> W {
        self.reporter.into_inner()
    }

    pub async fn run(&mut self, scenario: Scenario) -> Result<ScenarioOutcome> {
        tracing::info!(
            scenario = %scenario,
            base_url = %self.client.session().base_url(),
            "Running scenario"
        );

        self.reporter.banner(scenario.title())?;

        let outcome = match scenario {
            Scenario::Full => self.run_full().await?,
            Scenario::Simple => self.run_simple().await?,
            Scenario::Upload => self.run_upload().await?,
        };

        tracing::info!(scenario = %scenario, "Scenario completed");

        Ok(outcome)
    }

    async fn run_full(&mut self) -> Result<ScenarioOutcome> {
        let mut outcome = ScenarioOutcome::default();

        self.login().await?;
        self.list_documents().await?;

        let upload = self.upload().await?;
        let document_id = upload.document_id;
        outcome.document_id = Some(document_id.clone());

        self.verify(&document_id).await?;

        if self.config.certificate_path.is_file() {
            let signed = self.sign(&document_id).await?;
            outcome.signature_id = Some(signed.signature_id);

            self.verify(&document_id).await?;

            let path = self.download(&document_id).await?;
            outcome.signed_document = Some(path);
        } else {
            tracing::warn!(
                path = %self.config.certificate_path.display(),
                "Test certificate missing, skipping signature"
            );
            let expected = format!(
                "Expected at: {}",
                self.config.certificate_path.display()
            );
            self.reporter
                .warning("Test certificate not found, skipping signature", &expected)?;
        }

        self.logout().await?;
        self.reporter.success("Walkthrough completed successfully!")?;

        Ok(outcome)
    }

    async fn run_simple(&mut self) -> Result<ScenarioOutcome> {
        self.login().await?;
        self.list_documents().await?;
        self.logout().await?;
        self.reporter.success("Simple example completed!")?;

        Ok(ScenarioOutcome::default())
    }

    async fn run_upload(&mut self) -> Result<ScenarioOutcome> {
        self.login().await?;
        let upload = self.upload().await?;
        self.verify(&upload.document_id).await?;
        self.logout().await?;

        self.reporter.success("Upload example completed!")?;
        self.reporter
            .note(&format!("📄 Document ID created: {}", upload.document_id))?;

        Ok(ScenarioOutcome {
            document_id: Some(upload.document_id),
            ..ScenarioOutcome::default()
        })
    }

    async fn login(&mut self) -> Result<()> {
        self.reporter.step("🔐 Logging in")?;
        let login = self
            .client
            .login(&self.config.email, &self.config.password)
            .await?;
        self.reporter.login(&login)?;
        Ok(())
    }

    async fn list_documents(&mut self) -> Result<()> {
        self.reporter.step("📋 Listing my documents")?;
        let list = self.client.get_my_documents().await?;
        self.reporter.documents(&list)?;
        Ok(())
    }

    async fn upload(&mut self) -> Result<UploadResponse> {
        self.reporter.step("📤 Uploading document")?;
        let upload = self
            .client
            .upload_document(&self.config.document_path)
            .await?;
        self.reporter.upload(&upload)?;
        Ok(upload)
    }

    async fn verify(&mut self, document_id: &str) -> Result<VerificationReport> {
        self.reporter.step("🔍 Verifying signatures")?;
        let report = self.client.verify_document(document_id).await?;
        self.reporter.verification(&report)?;
        Ok(report)
    }

    async fn sign(&mut self, document_id: &str) -> Result<SignResponse> {
        self.reporter.step("🔏 Signing document")?;
        let signed = self
            .client
            .sign_document(
                document_id,
                &self.config.certificate_path,
                &self.config.certificate_password,
                Some(self.config.hash_algorithm.as_str()),
            )
            .await?;
        self.reporter.signature(&signed)?;
        Ok(signed)
    }

    async fn download(&mut self, document_id: &str) -> Result<PathBuf> {
        self.reporter.step("📥 Downloading signed document")?;
        tokio::fs::create_dir_all(&self.config.output_dir).await?;

        let output_path = self.config.signed_output_path(document_id);
        let path = self
            .client
            .download_signed_document(document_id, &output_path)
            .await?;
        let size = tokio::fs::metadata(&path).await?.len();
        self.reporter.download(&path, size)?;
        Ok(path)
    }

    async fn logout(&mut self) -> Result<()> {
        self.reporter.step("🚪 Logging out")?;
        self.client.logout().await?;
        self.reporter.logout()?;
        Ok(())
    }
}
