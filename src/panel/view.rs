//! Display-ready summaries of captured messages.

use serde::Serialize;

use crate::model::attachment::AttachmentInfo;
use crate::model::message::Message;
use crate::model::part::MimeNode;
use crate::parser::header::decode_encoded_words;
use crate::resolve::{resolve_html_preview, resolve_plain_text};

/// Everything a template needs to show one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    pub id: String,
    pub subject: String,
    pub from: String,
    pub to: String,
    /// `Date` header text, unparsed.
    pub date: String,
    pub plain_text: String,
    /// Full HTML document for an isolated preview frame.
    pub html_preview: String,
    pub attachments: Vec<AttachmentInfo>,
}

impl MessageView {
    pub fn new(id: impl Into<String>, message: &Message) -> Self {
        let attachments = message
            .attachments()
            .into_iter()
            .enumerate()
            .map(|(index, part)| AttachmentInfo::from_part(index, part))
            .collect();

        Self {
            id: id.into(),
            subject: display_header(message, "Subject"),
            from: display_header(message, "From"),
            to: display_header(message, "To"),
            date: display_header(message, "Date"),
            plain_text: resolve_plain_text(message),
            html_preview: resolve_html_preview(message),
            attachments,
        }
    }
}

fn display_header(message: &Message, name: &str) -> String {
    message
        .header(name)
        .map(decode_encoded_words)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::part::MimePart;

    #[test]
    fn test_view_of_alternative_message() {
        let root = MimePart::multipart(
            "multipart/mixed",
            vec![
                MimePart::multipart(
                    "multipart/alternative",
                    vec![
                        MimePart::leaf("text/plain", "hi"),
                        MimePart::leaf("text/html", "<b>hi</b>"),
                    ],
                ),
                MimePart::leaf("application/pdf", "JVBERg==")
                    .with_header("Content-Disposition", "attachment; filename=\"a.pdf\""),
            ],
        )
        .with_header("Subject", "=?UTF-8?Q?Caf=C3=A9?=")
        .with_header("From", "dev@example.com");

        let view = MessageView::new("m1", &Message::new(root));
        assert_eq!(view.id, "m1");
        assert_eq!(view.subject, "Café");
        assert_eq!(view.from, "dev@example.com");
        assert_eq!(view.to, "");
        assert_eq!(view.plain_text, "hi");
        assert_eq!(view.html_preview, "<b>hi</b>");
        assert_eq!(view.attachments.len(), 1);
        assert_eq!(view.attachments[0].label, "a.pdf (application/pdf)");
    }

    #[test]
    fn test_view_serializes() {
        let view = MessageView::new("x", &Message::new(MimePart::leaf("text/plain", "body")));
        let json = serde_json::to_value(&view).expect("serialize");
        assert_eq!(json["plain_text"], "body");
        assert!(json["attachments"].as_array().is_some_and(|a| a.is_empty()));
    }
}
