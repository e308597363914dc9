//! Minimal HTML document for messages that only have plain text.

const PREVIEW_STYLE: &str = "html,body{margin:0;padding:0;border:none;font-family:sans-serif;\
font-size:12px;white-space:pre;}body{padding:10px;}";

/// Wrap plain text in a standalone HTML page that renders it preformatted.
pub fn plain_text_document(text: &str) -> String {
    let escaped = html_escape(text);
    let mut doc = String::with_capacity(escaped.len() + 200);
    doc.push_str("<!doctype html>");
    doc.push_str("<meta charset=\"utf-8\">");
    doc.push_str("<style>");
    doc.push_str(PREVIEW_STYLE);
    doc.push_str("</style>");
    doc.push_str("<body>");
    doc.push_str(&escaped);
    doc.push_str("</body>");
    doc
}

/// Escape text for use in HTML content and attribute values.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}
