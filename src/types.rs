//! Common types shared by the site's forms.

use mime::Mime;
use strum::{Display, EnumString, VariantNames};

/// DOCX MIME type; `mime` has no constant for it.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Consultation package a "pick" button can preselect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, VariantNames, Display)]
#[strum(ascii_case_insensitive)]
pub enum Package {
    #[strum(serialize = "Starter")]
    Starter,
    #[strum(serialize = "Growth")]
    Growth,
    #[strum(serialize = "Custom")]
    Custom,
}

/// Resume formats the careers endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeKind {
    /// PDF documents
    Pdf,
    /// Word documents (Office Open XML)
    Docx,
}

impl ResumeKind {
    /// Determine the resume kind from a MIME content type string
    pub fn from_content_type(content_type: &str) -> Option<ResumeKind> {
        let mime: Mime = content_type.parse().ok()?;
        match (mime.type_(), mime.subtype()) {
            (mime::APPLICATION, subtype) => match subtype.as_str() {
                "pdf" => Some(ResumeKind::Pdf),
                "vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                    Some(ResumeKind::Docx)
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// Canonical MIME string sent to the careers endpoint
    pub fn as_mime(self) -> &'static str {
        match self {
            ResumeKind::Pdf => "application/pdf",
            ResumeKind::Docx => DOCX_MIME,
        }
    }
}
