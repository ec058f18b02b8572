//! Human-readable progress output

use chrono::{DateTime, Utc};
use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

use icp_client::{
    DocumentList, LoginResponse, SignResponse, UploadResponse, VerificationReport,
};

const DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Writes scenario progress to any `Write` sink (stdout in the binary,
/// a buffer in tests).
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn banner(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "🚀 {}", title)?;
        writeln!(self.out, "{}", "=".repeat(title.chars().count() + 3))
    }

    pub fn step(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "\n{}...", message)
    }

    pub fn login(&mut self, login: &LoginResponse) -> io::Result<()> {
        writeln!(self.out, "✅ Logged in")?;
        writeln!(self.out, "👤 User: {}", login.display_name())?;
        if let Some(expires_at) = &login.expires_at {
            writeln!(self.out, "⏳ Token expires: {}", format_date(expires_at))?;
        }
        Ok(())
    }

    pub fn documents(&mut self, list: &DocumentList) -> io::Result<()> {
        writeln!(self.out, "✅ Documents found: {}", list.documents.len())?;

        for (i, doc) in list.documents.iter().enumerate() {
            writeln!(self.out, "\n📄 Document {}:", i + 1)?;
            writeln!(self.out, "  🆔 ID: {}", doc.id)?;
            writeln!(self.out, "  📝 Name: {}", doc.filename)?;
            writeln!(self.out, "  📅 Uploaded: {}", format_date(&doc.uploaded_at))?;
            writeln!(self.out, "  🔐 Signatures: {}", doc.signatures_count)?;
            writeln!(self.out, "  ✅ Signed: {}", yes_no(doc.is_fully_signed))?;
            if let Some(last_signed_at) = &doc.last_signed_at {
                writeln!(self.out, "  🕒 Last signed: {}", format_date(last_signed_at))?;
            }
        }
        Ok(())
    }

    pub fn upload(&mut self, upload: &UploadResponse) -> io::Result<()> {
        writeln!(self.out, "✅ Upload completed")?;
        writeln!(self.out, "📄 Document ID: {}", upload.document_id)?;
        writeln!(self.out, "📊 Size: {} bytes", upload.size)?;
        if let Some(hash) = &upload.hash {
            writeln!(self.out, "#️⃣  SHA-256: {}", hash)?;
        }
        Ok(())
    }

    pub fn signature(&mut self, signed: &SignResponse) -> io::Result<()> {
        writeln!(self.out, "✅ Document signed")?;
        writeln!(self.out, "🆔 Signature ID: {}", signed.signature_id)?;
        writeln!(self.out, "👤 Signer: {}", signed.certificate_info.subject)?;
        writeln!(self.out, "🏢 Issuer: {}", signed.certificate_info.issuer)?;
        if let Some(standard) = &signed.standard {
            writeln!(self.out, "📜 Standard: {}", standard)?;
        }
        Ok(())
    }

    pub fn verification(&mut self, report: &VerificationReport) -> io::Result<()> {
        writeln!(self.out, "✅ Verification finished")?;
        writeln!(self.out, "📊 Total signatures: {}", report.total_signatures)?;

        for (i, signature) in report.signatures.iter().enumerate() {
            writeln!(self.out, "\n🔐 Signature {}:", i + 1)?;
            writeln!(self.out, "  👤 Signer: {}", signature.certificate_info.subject)?;
            writeln!(self.out, "  ✅ Valid: {}", yes_no(signature.is_valid))?;
            writeln!(self.out, "  📅 Date: {}", format_date(&signature.signed_at))?;

            if let Some(details) = &signature.validation_details {
                writeln!(self.out, "  🔗 Chain valid: {}", details.chain_valid)?;
                writeln!(self.out, "  ❌ Revoked: {}", !details.not_revoked)?;
                writeln!(self.out, "  ⏰ Time valid: {}", details.time_valid)?;
                if let Some(policy_valid) = details.policy_valid {
                    writeln!(self.out, "  📜 Policy valid: {}", policy_valid)?;
                }
            }
        }
        Ok(())
    }

    pub fn download(&mut self, path: &Path, size: u64) -> io::Result<()> {
        writeln!(self.out, "✅ Download completed")?;
        writeln!(self.out, "📁 File: {}", path.display())?;
        writeln!(self.out, "📊 Size: {} bytes", size)
    }

    pub fn logout(&mut self) -> io::Result<()> {
        writeln!(self.out, "✅ Logged out")
    }

    pub fn warning(&mut self, message: &str, detail: &str) -> io::Result<()> {
        writeln!(self.out, "\n⚠️  {}", message)?;
        writeln!(self.out, "   {}", detail)
    }

    pub fn success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "\n🎉 {}", message)
    }

    pub fn note(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message)
    }

    pub fn failure(&mut self, error: &dyn Display) -> io::Result<()> {
        writeln!(self.out, "\n❌ Error: {}", error)?;
        self.out.flush()
    }
}
