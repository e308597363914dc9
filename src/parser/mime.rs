//! Raw message bytes to a [`MimePart`] tree.
//!
//! `mail-parser` does the MIME structure work. Each of its parts is mapped to
//! a [`MimePart`] holding the unfolded headers and the body bytes exactly as
//! they appear in the message, still transfer-encoded, so the resolver decides
//! how to decode them.

use mail_parser::{MessageParser, PartType};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::message::Message;
use crate::model::part::MimePart;
use crate::parser::header::{decode_header_bytes, unfold_headers};

/// Maximum part nesting mapped into the tree (to bound adversarial input).
const MAX_DEPTH: usize = 64;

/// Parse a complete raw message (headers + body) into a [`Message`].
///
/// A leading BOM or MBOX `From ` line is skipped. The remaining bytes are kept
/// as the message source.
pub fn parse_message(raw_message: &[u8]) -> Result<Message> {
    let message_bytes = skip_from_line(raw_message);

    let parsed = MessageParser::default()
        .parse(message_bytes)
        .ok_or_else(|| Error::Mime("Input is not a parseable RFC 5322 message".into()))?;

    if parsed.parts.is_empty() {
        return Err(Error::Mime("Message has no MIME parts".into()));
    }

    let root = build_part(&parsed, 0, 0);
    debug!(
        parts = root.count_parts(),
        bytes = message_bytes.len(),
        "Parsed message tree"
    );

    Ok(Message::new(root).with_source(message_bytes))
}

/// Map part `part_id` of `msg` (and everything below it) to a [`MimePart`].
fn build_part(msg: &mail_parser::Message<'_>, part_id: usize, depth: usize) -> MimePart {
    let Some(part) = msg.parts.get(part_id) else {
        return MimePart::new();
    };
    let raw: &[u8] = &msg.raw_message;

    let header_bytes = raw
        .get(part.offset_header..part.offset_body)
        .unwrap_or_default();
    let body = raw.get(part.offset_body..part.offset_end).unwrap_or_default();

    let mut node = MimePart::new();
    for (name, value) in unfold_headers(&decode_header_bytes(header_bytes)) {
        node = node.with_header(name, value);
    }
    node = node.with_body(body);

    if depth >= MAX_DEPTH {
        debug!(depth, "Maximum MIME depth reached, not descending further");
        return node;
    }

    match &part.body {
        PartType::Multipart(ids) => {
            for &child_id in ids {
                node.push_part(build_part(msg, child_id, depth + 1));
            }
        }
        PartType::Message(nested) => {
            node.push_part(build_part(nested, 0, depth + 1));
        }
        _ => {}
    }

    node
}

/// Skip a BOM and the `From ` separator line at the start of MBOX messages.
fn skip_from_line(data: &[u8]) -> &[u8] {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);

    if data.starts_with(b"From ") {
        if let Some(pos) = data.iter().position(|&b| b == b'\n') {
            return &data[pos + 1..];
        }
    }
    data
}
