//! Core data model: MIME parts, captured messages, and attachment summaries.

pub mod attachment;
pub mod message;
pub mod part;

pub use attachment::AttachmentInfo;
pub use message::Message;
pub use part::{MimeNode, MimePart};
