//! `mailpanel` — inspect emails captured by a development mailer.
//!
//! The heart of the crate is [`resolve`]: given a MIME tree, find the body to
//! show as plain text or as an HTML preview and undo its transfer encoding.
//! Around it sit the data model, a loader for raw messages, the panel actions
//! a debugging toolbar links to, and attachment export.

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod panel;
pub mod parser;
pub mod resolve;
pub mod store;

pub use error::{Error, Result};
pub use model::{AttachmentInfo, Message, MimeNode, MimePart};
