//! MIME body resolution: pick the part to display for a representation and
//! decode it.
//!
//! Every function here is a pure read over the tree and always produces
//! something displayable. A missing representation is `None`, never an error,
//! and a body that fails to decode is shown raw.

pub mod decode;
pub mod label;
pub mod preview;

use std::collections::VecDeque;

use tracing::trace;

use crate::model::part::{MimeNode, MimePart};

pub use decode::{decode_body, decode_body_bytes, TransferEncoding};
pub use label::{attachment_filename, attachment_label};
pub use preview::{html_escape, plain_text_document};

/// Direct sub-parts of `part` in declaration order.
pub fn child_parts<N: MimeNode + ?Sized>(part: &N) -> &[MimePart] {
    part.child_parts()
}

/// Breadth-first search for the first part whose `Content-Type` starts with
/// `content_type_prefix` (ignoring ASCII case), returning its decoded body.
///
/// Shallower parts win over deeper ones; among siblings the first declared
/// wins. Each node is visited once.
pub fn find_body_by_content_type<N: MimeNode + ?Sized>(
    root: &N,
    content_type_prefix: &str,
) -> Option<String> {
    let prefix = content_type_prefix.to_ascii_lowercase();
    if has_content_type(root, &prefix) {
        return Some(decode_body(root));
    }

    let mut queue: VecDeque<&MimePart> = root.child_parts().iter().collect();
    let mut visited = 1usize;
    while let Some(part) = queue.pop_front() {
        visited += 1;
        if has_content_type(part, &prefix) {
            trace!(prefix = %prefix, visited, "Matched body part");
            return Some(decode_body(part));
        }
        queue.extend(part.child_parts());
    }

    trace!(prefix = %prefix, visited, "No body part matched");
    None
}

fn has_content_type<N: MimeNode + ?Sized>(part: &N, lowercase_prefix: &str) -> bool {
    part.header("Content-Type")
        .is_some_and(|ct| ct.to_ascii_lowercase().starts_with(lowercase_prefix))
}

/// Plain-text body of `part`, falling back to the part's own decoded body
/// when the tree has no `text/plain` part.
pub fn resolve_plain_text<N: MimeNode + ?Sized>(part: &N) -> String {
    find_body_by_content_type(part, "text/plain").unwrap_or_else(|| decode_body(part))
}

/// HTML body of `part`: the direct HTML body if non-empty, else the first
/// `text/html` part, else empty.
pub fn extract_html_body<N: MimeNode + ?Sized>(part: &N) -> String {
    if let Some(html) = part.html_body().filter(|h| !h.is_empty()) {
        return html.to_string();
    }
    find_body_by_content_type(part, "text/html").unwrap_or_default()
}

/// HTML document to preview `part` in a frame.
///
/// Messages without HTML get their plain text escaped into a generated page,
/// so embedded markup is never rendered.
pub fn resolve_html_preview<N: MimeNode + ?Sized>(part: &N) -> String {
    let html = extract_html_body(part);
    if !html.is_empty() {
        return html;
    }
    plain_text_document(&resolve_plain_text(part))
}
