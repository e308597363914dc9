//! Centralized error types for mailpanel.
//!
//! The body resolver itself never fails; these errors come from loading
//! messages, talking to the persistent mailer, and the panel actions.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the mailpanel library.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified message file does not exist.
    #[error("Message file not found: {0}")]
    FileNotFound(PathBuf),

    /// The raw bytes could not be parsed into a MIME tree.
    #[error("MIME parsing error: {0}")]
    Mime(String),

    /// The persistent mailer has no message with this id.
    #[error("Message '{0}' not found")]
    MessageNotFound(String),

    /// The message was built in memory and carries no encoded source.
    #[error("Message '{0}' has no encoded source")]
    MissingSource(String),

    /// A delete action was requested without a referer to return to.
    #[error("Unable to redirect back because the browser did not send a referer")]
    MissingReferer,

    /// Redirecting to the referer would land on the same action again.
    #[error("Unable to redirect back because it would create a loop")]
    RedirectLoop,

    /// The persistent mailer backend failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Allow `?` on `std::io::Error` when no path context is available
/// (rare, prefer `Error::io`).
impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            source,
        }
    }
}
