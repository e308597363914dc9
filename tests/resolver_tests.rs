//! Integration tests for body resolution on hand-built and parsed messages.

use std::path::Path;

use mailpanel::model::{Message, MimeNode, MimePart};
use mailpanel::parser::{parse_eml, parse_message};
use mailpanel::resolve::{
    attachment_label, decode_body, decode_body_bytes, find_body_by_content_type,
    resolve_html_preview, resolve_plain_text,
};

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load(name: &str) -> Message {
    parse_eml(fixture(name)).unwrap()
}

// ─── Hand-built trees ───────────────────────────────────────────────

#[test]
fn test_alternative_message_end_to_end() {
    let root = MimePart::multipart(
        "multipart/alternative",
        vec![
            MimePart::leaf("text/plain", "hi"),
            MimePart::leaf("text/html", "<b>hi</b>"),
        ],
    );
    assert_eq!(resolve_plain_text(&root), "hi");
    assert_eq!(resolve_html_preview(&root), "<b>hi</b>");
}

#[test]
fn test_depth_one_beats_depth_two() {
    let root = MimePart::multipart(
        "multipart/mixed",
        vec![
            MimePart::multipart(
                "multipart/alternative",
                vec![MimePart::leaf("text/plain", "depth two")],
            ),
            MimePart::leaf("text/plain", "depth one"),
        ],
    );
    assert_eq!(
        find_body_by_content_type(&root, "text/plain").as_deref(),
        Some("depth one")
    );
}

#[test]
fn test_content_type_match_ignores_case() {
    let root = MimePart::multipart(
        "multipart/mixed",
        vec![MimePart::leaf("TEXT/PLAIN; charset=utf-8", "upper")],
    );
    assert_eq!(
        find_body_by_content_type(&root, "text/plain").as_deref(),
        Some("upper")
    );
}

#[test]
fn test_plain_text_never_missing() {
    let root = MimePart::multipart(
        "multipart/mixed",
        vec![MimePart::leaf("image/png", "png bytes")],
    )
    .with_body("preamble");
    assert_eq!(find_body_by_content_type(&root, "text/plain"), None);
    assert_eq!(resolve_plain_text(&root), "preamble");
}

#[test]
fn test_preview_escapes_plain_text() {
    let root = MimePart::multipart(
        "multipart/alternative",
        vec![MimePart::leaf("text/plain", "A & B < C")],
    );
    let doc = resolve_html_preview(&root);
    assert!(doc.contains("A &amp; B &lt; C"));

    let body = doc
        .split("<body>")
        .nth(1)
        .and_then(|b| b.strip_suffix("</body>"))
        .expect("generated body");
    assert!(!body.contains('<'));
}

#[test]
fn test_decode_examples() {
    let b64 = MimePart::leaf("text/plain", "aGVsbG8=").with_header("Content-Transfer-Encoding", "base64");
    assert_eq!(decode_body(&b64), "hello");

    let bad = MimePart::leaf("text/plain", "!!!not-base64!!!")
        .with_header("Content-Transfer-Encoding", "base64");
    assert_eq!(decode_body(&bad), "!!!not-base64!!!");

    let qp = MimePart::leaf("text/plain", "caf=C3=A9")
        .with_header("Content-Transfer-Encoding", "quoted-printable");
    assert_eq!(decode_body(&qp), "café");
}

#[test]
fn test_attachment_label_examples() {
    let named = MimePart::leaf("application/pdf", "")
        .with_header("Content-Disposition", "attachment; filename=\"report.pdf\"");
    assert_eq!(attachment_label(&named), "report.pdf (application/pdf)");

    let unnamed = MimePart::leaf("application/pdf", "");
    assert_eq!(attachment_label(&unnamed), "(application/pdf)");
}

#[test]
fn test_message_html_body_takes_precedence() {
    let msg = Message::new(MimePart::multipart(
        "multipart/alternative",
        vec![
            MimePart::leaf("text/plain", "text"),
            MimePart::leaf("text/html", "<p>from tree</p>"),
        ],
    ))
    .with_html_body("<p>set by app</p>");
    assert_eq!(resolve_html_preview(&msg), "<p>set by app</p>");
    assert_eq!(resolve_plain_text(&msg), "text");
}

// ─── Parsed messages ────────────────────────────────────────────────

#[test]
fn test_parsed_alternative() {
    let msg = load("alternative.eml");
    assert_eq!(msg.child_parts().len(), 2);
    assert_eq!(resolve_plain_text(&msg).trim(), "Hello café");
    assert_eq!(resolve_html_preview(&msg).trim(), "<b>Hello</b>");
}

#[test]
fn test_parsed_mixed_prefers_alternative_bodies() {
    let msg = load("mixed.eml");
    assert_eq!(resolve_plain_text(&msg).trim(), "Invoice attached.");
    assert_eq!(
        resolve_html_preview(&msg).trim(),
        "<p>Invoice attached.</p>"
    );
}

#[test]
fn test_parsed_attachments() {
    let msg = load("mixed.eml");
    let attachments = msg.attachments();
    assert_eq!(attachments.len(), 2);

    assert_eq!(
        attachment_label(attachments[0]),
        "report.pdf (application/pdf; name=\"report.pdf\")"
    );
    assert_eq!(attachment_label(attachments[1]), "(text/csv)");

    let raw = String::from_utf8_lossy(attachments[0].body()).into_owned();
    assert_eq!(raw.trim(), "JVBERi0xLjQgZmFrZQ==");
    assert_eq!(&decode_body_bytes(attachments[0])[..], b"%PDF-1.4 fake");
}

#[test]
fn test_parsed_latin1_plain_only() {
    let msg = load("plain_latin1.eml");
    assert_eq!(resolve_plain_text(&msg).trim(), "Café & <tags> \"quoted\"");

    let doc = resolve_html_preview(&msg);
    assert!(doc.starts_with("<!doctype html>"));
    assert!(doc.contains("Café &amp; &lt;tags&gt; &quot;quoted&quot;"));
}

#[test]
fn test_parsed_forwarded_message_is_searched() {
    let msg = load("forwarded.eml");
    assert_eq!(resolve_plain_text(&msg).trim(), "Forwarded body");
}

#[test]
fn test_parse_from_memory_with_mbox_separator() {
    let raw = b"From app@example.com Thu Jan 04 10:00:00 2024\nContent-Type: text/html\n\n<i>x</i>\n";
    let msg = parse_message(raw).unwrap();
    assert_eq!(resolve_html_preview(&msg).trim(), "<i>x</i>");
    assert!(msg.source().unwrap().starts_with(b"Content-Type"));
}

#[test]
fn test_missing_fixture_is_reported() {
    let err = parse_eml(fixture("does-not-exist.eml")).unwrap_err();
    assert!(matches!(err, mailpanel::Error::FileNotFound(_)));
}
