//! Application form values, resume validation and the upload payload.

use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};
use log::debug;
use serde::Serialize;

use crate::error::{Result, SiteError};
use crate::types::ResumeKind;

/// Role used when an apply button carries none.
pub const DEFAULT_ROLE: &str = "General Application";

/// The careers script rejects larger bodies once base64 inflates the file.
pub const MAX_RESUME_BYTES: usize = 3 * 1024 * 1024;

/// A resume picked by the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    /// Reads a resume from disk, guessing its MIME type from the extension.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            debug!("Reading resume '{}' failed: {e}", path.display());
            SiteError::Resume(format!("Could not read resume file '{}'.", path.display()))
        })?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or_default()
            .to_string();
        debug!(
            "Loaded resume '{name}' ({} bytes, type '{mime_type}')",
            bytes.len()
        );
        Ok(Self {
            name,
            mime_type,
            bytes,
        })
    }

    /// Checks the resume type and size.
    pub fn validate(&self) -> Result<ResumeKind> {
        let kind = ResumeKind::from_content_type(&self.mime_type).ok_or_else(|| {
            SiteError::Resume("Resume must be a PDF or DOCX file.".to_string())
        })?;
        if self.bytes.len() > MAX_RESUME_BYTES {
            return Err(SiteError::Resume(format!(
                "Resume too large (max {}MB).",
                MAX_RESUME_BYTES / (1024 * 1024)
            )));
        }
        Ok(kind)
    }
}

/// Form values of the apply modal.
#[derive(Debug, Clone, Default)]
pub struct ApplicationDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub portfolio: String,
    pub linkedin: String,
    pub cover_letter: String,
    pub resume: Option<ResumeFile>,
}

impl ApplicationDraft {
    /// The attached resume, once it passes the type and size checks.
    pub fn checked_resume(&self) -> Result<&ResumeFile> {
        let resume = self.resume.as_ref().ok_or_else(|| {
            SiteError::Resume("Please upload your resume (PDF or DOCX).".to_string())
        })?;
        resume.validate()?;
        Ok(resume)
    }
}

/// JSON body accepted by the careers script.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationPayload {
    #[serde(rename = "sheetId")]
    pub sheet_id: String,
    #[serde(rename = "driveFolderId")]
    pub drive_folder_id: String,
    pub role: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub portfolio: String,
    pub linkedin: String,
    pub cover_letter: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "fileMimeType")]
    pub file_mime_type: String,
    #[serde(rename = "fileBase64")]
    pub file_base64: String,
}

impl ApplicationPayload {
    /// Builds the payload, encoding the resume and checking name and email.
    pub fn build(
        sheet_id: &str,
        drive_folder_id: &str,
        role: &str,
        draft: &ApplicationDraft,
        resume: &ResumeFile,
    ) -> Result<Self> {
        let role = if role.trim().is_empty() {
            DEFAULT_ROLE
        } else {
            role
        };

        let payload = Self {
            sheet_id: sheet_id.to_string(),
            drive_folder_id: drive_folder_id.to_string(),
            role: role.to_string(),
            full_name: draft.full_name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            location: draft.location.clone(),
            portfolio: draft.portfolio.clone(),
            linkedin: draft.linkedin.clone(),
            cover_letter: draft.cover_letter.clone(),
            file_name: resume.name.clone(),
            file_mime_type: resume.mime_type.clone(),
            file_base64: STANDARD.encode(&resume.bytes),
        };

        if payload.full_name.trim().is_empty() || payload.email.trim().is_empty() {
            return Err(SiteError::Submission(
                "Please fill in your full name and email.".to_string(),
            ));
        }

        Ok(payload)
    }
}
