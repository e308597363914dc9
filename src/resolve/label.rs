//! Human-readable attachment labels.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::part::MimeNode;

static FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"filename="(.+?)""#).expect("valid filename pattern"));

/// Filename from the first `filename="..."` token of `Content-Disposition`.
///
/// The match is case-sensitive and does not cross line breaks.
pub fn attachment_filename<N: MimeNode + ?Sized>(part: &N) -> Option<&str> {
    let disposition = part.header("Content-Disposition")?;
    FILENAME_RE
        .captures(disposition)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// `"<filename> (<content-type>)"`, or just `"(<content-type>)"` when the
/// disposition carries no filename.
pub fn attachment_label<N: MimeNode + ?Sized>(part: &N) -> String {
    let content_type = part.header("Content-Type").unwrap_or("");
    match attachment_filename(part) {
        Some(name) => format!("{name} ({content_type})"),
        None => format!("({content_type})"),
    }
}
