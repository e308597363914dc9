//! Attachment summaries.
//!
//! The part itself stays inside the message; this is only what a listing
//! needs to show and to address the attachment later by position.

use crate::resolve::label::{attachment_filename, attachment_label};

use super::part::{MimeNode, MimePart};

/// Metadata about one attachment of a message.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AttachmentInfo {
    /// Position in the message's attachment list. Stable for one render.
    pub index: usize,

    /// Display label, e.g. `"report.pdf (application/pdf)"`.
    pub label: String,

    /// Filename from `Content-Disposition`, if present.
    pub filename: Option<String>,

    /// Declared `Content-Type` value, verbatim.
    pub content_type: Option<String>,

    /// Size of the raw (still transfer-encoded) body in bytes.
    pub size: u64,
}

impl AttachmentInfo {
    pub fn from_part(index: usize, part: &MimePart) -> Self {
        Self {
            index,
            label: attachment_label(part),
            filename: attachment_filename(part).map(String::from),
            content_type: part.header("Content-Type").map(String::from),
            size: part.body().len() as u64,
        }
    }
}
