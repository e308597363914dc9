//! Write message attachments to disk.

use std::path::{Path, PathBuf};

use crate::model::message::Message;
use crate::model::part::{MimeNode, MimePart};
use crate::resolve::{attachment_filename, decode_body_bytes};

/// How attachment bytes are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    /// The body exactly as stored in the message.
    #[default]
    Raw,
    /// The body with its transfer encoding undone.
    Decoded,
}

/// Export the attachment at `index` of `message` into `output_dir`.
///
/// Returns the path of the created file.
pub fn export_attachment(
    message: &Message,
    index: usize,
    output_dir: &Path,
    mode: ExportMode,
) -> anyhow::Result<PathBuf> {
    let part = message
        .attachment(index)
        .ok_or_else(|| anyhow::anyhow!("Message has no attachment #{index}"))?;
    write_part(part, index, output_dir, mode)
}

/// Export every attachment of `message` into `output_dir`.
pub fn export_all_attachments(
    message: &Message,
    output_dir: &Path,
    mode: ExportMode,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;
    let mut paths = Vec::new();

    for (index, part) in message.attachments().into_iter().enumerate() {
        match write_part(part, index, output_dir, mode) {
            Ok(path) => paths.push(path),
            Err(e) => {
                tracing::warn!(index, error = %e, "Failed to export attachment");
            }
        }
    }

    Ok(paths)
}

fn write_part(
    part: &MimePart,
    index: usize,
    output_dir: &Path,
    mode: ExportMode,
) -> anyhow::Result<PathBuf> {
    let filename = attachment_filename(part)
        .map(|name| sanitize_filename_part(name, 150))
        .unwrap_or_else(|| format!("attachment_{index}"));
    let path = unique_path(&output_dir.join(filename));

    match mode {
        ExportMode::Raw => std::fs::write(&path, part.body())?,
        ExportMode::Decoded => std::fs::write(&path, decode_body_bytes(part))?,
    }
    tracing::debug!(path = %path.display(), ?mode, "Wrote attachment");
    Ok(path)
}

/// Sanitize a string for use in filenames.
///
/// Replaces invalid characters with `_` and truncates to `max_len`.
pub fn sanitize_filename_part(s: &str, max_len: usize) -> String {
    let sanitized: String = s
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '.' || c == '_' || c == '@' {
                c
            } else {
                '_'
            }
        })
        .take(max_len)
        .collect();

    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        "unknown".to_string()
    } else {
        sanitized
    }
}

/// If `path` already exists, append a counter to make it unique.
fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("file");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parent = path.parent().unwrap_or(Path::new("."));

    for i in 1..1000 {
        let candidate = if ext.is_empty() {
            parent.join(format!("{stem}_{i}"))
        } else {
            parent.join(format!("{stem}_{i}.{ext}"))
        };
        if !candidate.exists() {
            return candidate;
        }
    }

    parent.join(format!("{stem}_dup.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_with_pdf() -> Message {
        Message::new(MimePart::multipart(
            "multipart/mixed",
            vec![
                MimePart::leaf("text/plain", "see attached"),
                MimePart::leaf("application/pdf", "JVBERg==")
                    .with_header("Content-Transfer-Encoding", "base64")
                    .with_header("Content-Disposition", "attachment; filename=\"../r e.pdf\""),
            ],
        ))
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename_part("hello world", 20), "hello_world");
        assert_eq!(sanitize_filename_part("a/b\\c:d*e", 20), "a_b_c_d_e");
        assert_eq!(sanitize_filename_part("", 20), "unknown");
        assert_eq!(sanitize_filename_part("..", 20), "unknown");
    }

    #[test]
    fn test_export_raw_and_decoded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let msg = message_with_pdf();

        let raw = export_attachment(&msg, 0, dir.path(), ExportMode::Raw).expect("raw");
        assert_eq!(raw.file_name().unwrap(), ".._r_e.pdf");
        assert_eq!(std::fs::read(&raw).unwrap(), b"JVBERg==");

        let decoded = export_attachment(&msg, 0, dir.path(), ExportMode::Decoded).expect("decoded");
        assert_ne!(raw, decoded);
        assert_eq!(std::fs::read(&decoded).unwrap(), b"%PDF");
    }

    #[test]
    fn test_export_missing_index() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(export_attachment(&message_with_pdf(), 5, dir.path(), ExportMode::Raw).is_err());
    }

    #[test]
    fn test_export_all() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("nested");
        let paths = export_all_attachments(&message_with_pdf(), &out, ExportMode::Raw).unwrap();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].starts_with(&out));
    }
}
