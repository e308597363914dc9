//! Transfer-encoding and charset decoding of part bodies.
//!
//! Decoding never fails: a payload that does not decode is returned raw.

use std::borrow::Cow;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::{debug, warn};

use crate::model::part::MimeNode;
use crate::parser::header::content_type_param;

/// `Content-Transfer-Encoding` values the decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEncoding {
    QuotedPrintable,
    Base64,
    /// `7bit`, `8bit`, `binary`, absent, or anything unrecognized.
    Identity,
}

impl TransferEncoding {
    /// Read the encoding declared on a part.
    pub fn of<N: MimeNode + ?Sized>(part: &N) -> Self {
        Self::from_header(part.header("Content-Transfer-Encoding"))
    }

    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("quoted-printable") => Self::QuotedPrintable,
            Some("base64") => Self::Base64,
            _ => Self::Identity,
        }
    }
}

/// Decode a part's body as text.
///
/// Transfer encoding is undone first, then the bytes are converted using the
/// `charset` parameter of `Content-Type` (UTF-8 when absent).
pub fn decode_body<N: MimeNode + ?Sized>(part: &N) -> String {
    let bytes = decode_body_bytes(part);
    let charset = part
        .header("Content-Type")
        .and_then(|ct| content_type_param(ct, "charset"));
    decode_charset(charset.as_deref(), &bytes)
}

/// Undo the transfer encoding of a part's body.
///
/// Borrows the raw body when nothing needs decoding or decoding failed.
pub fn decode_body_bytes<N: MimeNode + ?Sized>(part: &N) -> Cow<'_, [u8]> {
    let body = part.body();
    match TransferEncoding::of(part) {
        TransferEncoding::QuotedPrintable => {
            match quoted_printable::decode(body, quoted_printable::ParseMode::Robust) {
                Ok(decoded) => Cow::Owned(decoded),
                Err(e) => {
                    debug!(error = ?e, "Quoted-printable body did not decode, using raw body");
                    Cow::Borrowed(body)
                }
            }
        }
        TransferEncoding::Base64 => match decode_base64_strict(body) {
            Some(decoded) => Cow::Owned(decoded),
            None => {
                debug!(len = body.len(), "Base64 body did not decode, using raw body");
                Cow::Borrowed(body)
            }
        },
        TransferEncoding::Identity => Cow::Borrowed(body),
    }
}

/// Strict base64: standard alphabet with padding. Line breaks and other
/// ASCII whitespace are skipped since MIME wraps encoded bodies.
fn decode_base64_strict(body: &[u8]) -> Option<Vec<u8>> {
    let compact: Vec<u8> = body
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    BASE64.decode(compact).ok()
}

/// Decode bytes using a named charset.
pub(crate) fn decode_charset(charset: Option<&str>, bytes: &[u8]) -> String {
    let Some(charset) = charset else {
        return String::from_utf8_lossy(bytes).into_owned();
    };
    match charset.to_ascii_lowercase().as_str() {
        "utf-8" | "utf8" | "us-ascii" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        _ => {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(bytes);
                decoded.into_owned()
            } else {
                warn!(
                    charset = charset,
                    "Unknown charset, falling back to UTF-8 lossy"
                );
                String::from_utf8_lossy(bytes).into_owned()
            }
        }
    }
}
