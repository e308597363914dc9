//! Loader for individual `.eml` files (RFC 5322 messages without MBOX framing).

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::message::Message;
use crate::parser::mime;

/// Read and parse a single `.eml` file.
pub fn parse_eml(path: impl AsRef<Path>) -> Result<Message> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(path.to_path_buf())
        } else {
            Error::io(path, e)
        }
    })?;

    tracing::debug!(path = %path.display(), bytes = data.len(), "Read message file");
    mime::parse_message(&data)
}
