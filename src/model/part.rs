//! MIME part tree nodes.

/// Read-only view of a node in a MIME tree.
///
/// This is everything the body resolver needs: header lookup, the raw body,
/// the ordered list of sub-parts, and, for sent messages, an HTML body that
/// was handed to the mailer directly instead of living in the tree.
pub trait MimeNode {
    /// First value of the named header. Lookup ignores ASCII case.
    fn header(&self, name: &str) -> Option<&str>;

    /// Raw body bytes, still transfer-encoded.
    fn body(&self) -> &[u8];

    /// Direct sub-parts in declaration order. Empty for leaf parts.
    fn child_parts(&self) -> &[MimePart];

    /// HTML body available without walking the tree.
    fn html_body(&self) -> Option<&str> {
        None
    }
}

/// A single MIME part: headers, raw body, and owned sub-parts.
///
/// Children are owned by value, so a tree is always finite and acyclic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MimePart {
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    parts: Vec<MimePart>,
}

impl MimePart {
    /// Create an empty part with no headers, no body and no children.
    pub fn new() -> Self {
        Self::default()
    }

    /// Leaf part with a `Content-Type` header and a body.
    pub fn leaf(content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self::new()
            .with_header("Content-Type", content_type)
            .with_body(body)
    }

    /// Multipart container with the given `Content-Type` and children.
    pub fn multipart(content_type: &str, parts: Vec<MimePart>) -> Self {
        Self::new()
            .with_header("Content-Type", content_type)
            .with_parts(parts)
    }

    /// Append a header, keeping earlier headers of the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_parts(mut self, parts: Vec<MimePart>) -> Self {
        self.parts = parts;
        self
    }

    /// Append one sub-part.
    pub fn push_part(&mut self, part: MimePart) {
        self.parts.push(part);
    }

    /// All headers in their original order and casing.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Number of parts in the subtree rooted here, including this one.
    pub fn count_parts(&self) -> usize {
        1 + self.parts.iter().map(MimePart::count_parts).sum::<usize>()
    }
}

impl MimeNode for MimePart {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn body(&self) -> &[u8] {
        &self.body
    }

    fn child_parts(&self) -> &[MimePart] {
        &self.parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let part = MimePart::new().with_header("Content-Type", "text/plain");
        assert_eq!(part.header("content-type"), Some("text/plain"));
        assert_eq!(part.header("CONTENT-TYPE"), Some("text/plain"));
        assert_eq!(part.header("Content-Disposition"), None);
    }

    #[test]
    fn test_first_header_wins() {
        let part = MimePart::new()
            .with_header("X-Tag", "first")
            .with_header("x-tag", "second");
        assert_eq!(part.header("X-Tag"), Some("first"));
        assert_eq!(part.headers().len(), 2);
    }

    #[test]
    fn test_leaf_has_no_children() {
        let part = MimePart::leaf("text/plain", "hi");
        assert!(part.child_parts().is_empty());
        assert_eq!(part.body(), b"hi");
        assert_eq!(part.html_body(), None);
    }

    #[test]
    fn test_count_parts() {
        let tree = MimePart::multipart(
            "multipart/mixed",
            vec![
                MimePart::multipart(
                    "multipart/alternative",
                    vec![
                        MimePart::leaf("text/plain", "a"),
                        MimePart::leaf("text/html", "b"),
                    ],
                ),
                MimePart::leaf("application/pdf", "c"),
            ],
        );
        assert_eq!(tree.count_parts(), 5);
    }
}
