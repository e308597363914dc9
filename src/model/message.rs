//! Captured outgoing message.

use std::collections::VecDeque;

use super::part::{MimeNode, MimePart};

/// The root of a sent email, as handed over by the persistent mailer.
///
/// Behaves like its root [`MimePart`] for header and body lookups, and may
/// additionally carry an HTML body that the application set directly, the
/// encoded source it was parsed from, and an explicit attachment list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    root: MimePart,
    html_body: Option<String>,
    attachments: Option<Vec<MimePart>>,
    source: Option<Vec<u8>>,
}

impl Message {
    /// Wrap a root part. Attachments are discovered from the tree.
    pub fn new(root: MimePart) -> Self {
        Self {
            root,
            ..Self::default()
        }
    }

    /// Attach an HTML body that takes precedence over `text/html` parts.
    pub fn with_html_body(mut self, html: impl Into<String>) -> Self {
        self.html_body = Some(html.into());
        self
    }

    /// Use an explicit attachment list instead of scanning the tree.
    pub fn with_attachments(mut self, attachments: Vec<MimePart>) -> Self {
        self.attachments = Some(attachments);
        self
    }

    /// Keep the encoded bytes the message was built from.
    pub fn with_source(mut self, source: impl Into<Vec<u8>>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn root(&self) -> &MimePart {
        &self.root
    }

    /// Encoded message as it would go over the wire, when known.
    pub fn source(&self) -> Option<&[u8]> {
        self.source.as_deref()
    }

    /// Attachment parts, indexed by position.
    ///
    /// Without an explicit list, every part whose `Content-Disposition`
    /// starts with `attachment` is returned in breadth-first order.
    pub fn attachments(&self) -> Vec<&MimePart> {
        if let Some(explicit) = &self.attachments {
            return explicit.iter().collect();
        }

        let mut found = Vec::new();
        let mut queue: VecDeque<&MimePart> = VecDeque::from([&self.root]);
        while let Some(part) = queue.pop_front() {
            if is_attachment(part) {
                found.push(part);
            }
            queue.extend(part.child_parts());
        }
        found
    }

    /// Attachment at `index`, if any.
    pub fn attachment(&self, index: usize) -> Option<&MimePart> {
        match &self.attachments {
            Some(explicit) => explicit.get(index),
            None => self.attachments().into_iter().nth(index),
        }
    }
}

impl MimeNode for Message {
    fn header(&self, name: &str) -> Option<&str> {
        self.root.header(name)
    }

    fn body(&self) -> &[u8] {
        self.root.body()
    }

    fn child_parts(&self) -> &[MimePart] {
        self.root.child_parts()
    }

    fn html_body(&self) -> Option<&str> {
        self.html_body.as_deref()
    }
}

fn is_attachment(part: &MimePart) -> bool {
    part.header("Content-Disposition")
        .map(|d| d.trim_start().to_ascii_lowercase().starts_with("attachment"))
        .unwrap_or(false)
}
