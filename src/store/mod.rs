//! The persistent mailer: where captured messages live.
//!
//! Capturing, storing and evicting messages is the job of the host
//! application's mailer. This module only describes what the panel needs
//! from it.

use crate::error::Result;
use crate::model::message::Message;

/// A captured message together with the id the mailer filed it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub id: String,
    pub message: Message,
}

impl StoredMessage {
    pub fn new(id: impl Into<String>, message: Message) -> Self {
        Self {
            id: id.into(),
            message,
        }
    }
}

/// Mailer that keeps sent messages around for inspection.
pub trait PersistentMailer {
    /// Number of messages currently stored.
    fn message_count(&self) -> Result<usize>;

    /// Fetch one message. Unknown ids yield [`crate::error::Error::MessageNotFound`].
    fn get_message(&self, id: &str) -> Result<Message>;

    /// Up to `limit` messages in the order the mailer presents them.
    fn get_messages(&self, limit: usize) -> Result<Vec<StoredMessage>>;

    fn delete_one(&mut self, id: &str) -> Result<()>;

    fn delete_all(&mut self) -> Result<()>;
}
