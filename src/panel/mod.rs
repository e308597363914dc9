//! The mail panel: what a debugging toolbar shows about sent emails, and the
//! actions it links to.
//!
//! Routing, query parsing and templating belong to the host. This module
//! takes an already-decoded [`PanelAction`] and returns a typed
//! [`PanelResponse`] for the host to write out.

pub mod view;

use tracing::{debug, info};

use crate::config::PanelConfig;
use crate::error::{Error, Result};
use crate::model::part::MimeNode;
use crate::store::PersistentMailer;

pub use view::MessageView;

/// An action requested from the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    /// Show one message.
    Detail { message_id: String },
    /// Show the encoded source of one message.
    Source { message_id: String },
    /// Download an attachment by its position.
    Attachment { message_id: String, index: usize },
    DeleteOne { message_id: String },
    DeleteAll,
}

/// Request context needed to send the browser back after a delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestInfo {
    pub current_url: String,
    pub referer: Option<String>,
}

/// What the host should send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelResponse {
    /// Render this message (`text/html`).
    Detail(MessageView),
    /// Encoded message source, served as `text/plain`.
    Source(Vec<u8>),
    /// Attachment body exactly as stored, served with its declared type.
    Attachment { content_type: String, body: Vec<u8> },
    /// Redirect to `location`.
    Redirect { location: String },
}

impl PanelResponse {
    /// `Content-Type` to serve the response with, if it has a body.
    pub fn content_type(&self) -> Option<&str> {
        match self {
            PanelResponse::Detail(_) => Some("text/html"),
            PanelResponse::Source(_) => Some("text/plain"),
            PanelResponse::Attachment { content_type, .. } => Some(content_type.as_str()),
            PanelResponse::Redirect { .. } => None,
        }
    }
}

/// Panel over a persistent mailer.
pub struct MailPanel<M> {
    mailer: M,
    config: PanelConfig,
}

impl<M: PersistentMailer> MailPanel<M> {
    pub fn new(mailer: M, config: PanelConfig) -> Self {
        Self { mailer, config }
    }

    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Toolbar label: `"1 sent email"`, `"3 sent emails"`. Empty when disabled.
    pub fn tab_label(&self) -> Result<String> {
        if !self.config.enabled {
            return Ok(String::new());
        }
        let count = self.mailer.message_count()?;
        let plural = if count == 1 { "" } else { "s" };
        Ok(format!("{count} sent email{plural}"))
    }

    /// Views of the most recent messages, up to the configured limit.
    pub fn messages(&self) -> Result<Vec<MessageView>> {
        if !self.config.enabled {
            return Ok(Vec::new());
        }
        let stored = self.mailer.get_messages(self.config.messages_limit)?;
        Ok(stored
            .iter()
            .map(|s| MessageView::new(&s.id, &s.message))
            .collect())
    }

    /// Run one action.
    ///
    /// Returns `Ok(None)` when the panel is disabled or the action has nothing
    /// to serve (unknown attachment index, attachment without a type).
    pub fn handle(
        &mut self,
        action: PanelAction,
        request: &RequestInfo,
    ) -> Result<Option<PanelResponse>> {
        if !self.config.enabled {
            debug!(?action, "Panel disabled, ignoring action");
            return Ok(None);
        }

        match action {
            PanelAction::Detail { message_id } => {
                let message = self.mailer.get_message(&message_id)?;
                Ok(Some(PanelResponse::Detail(MessageView::new(
                    message_id, &message,
                ))))
            }
            PanelAction::Source { message_id } => {
                let message = self.mailer.get_message(&message_id)?;
                let source = message
                    .source()
                    .ok_or_else(|| Error::MissingSource(message_id.clone()))?;
                Ok(Some(PanelResponse::Source(source.to_vec())))
            }
            PanelAction::Attachment { message_id, index } => {
                self.attachment(&message_id, index)
            }
            PanelAction::DeleteOne { message_id } => {
                let location = return_location(request)?;
                self.mailer.delete_one(&message_id)?;
                info!(message_id = %message_id, "Deleted message");
                Ok(Some(PanelResponse::Redirect { location }))
            }
            PanelAction::DeleteAll => {
                let location = return_location(request)?;
                self.mailer.delete_all()?;
                info!("Deleted all messages");
                Ok(Some(PanelResponse::Redirect { location }))
            }
        }
    }

    fn attachment(&self, message_id: &str, index: usize) -> Result<Option<PanelResponse>> {
        let message = self.mailer.get_message(message_id)?;
        let Some(part) = message.attachment(index) else {
            debug!(message_id, index, "No attachment at index");
            return Ok(None);
        };
        let Some(content_type) = part.header("Content-Type").filter(|ct| !ct.is_empty()) else {
            debug!(message_id, index, "Attachment has no content type");
            return Ok(None);
        };
        Ok(Some(PanelResponse::Attachment {
            content_type: content_type.to_string(),
            body: part.body().to_vec(),
        }))
    }
}

/// Where to send the browser after a delete: back to the referer, unless
/// that would repeat the same request.
fn return_location(request: &RequestInfo) -> Result<String> {
    let referer = request
        .referer
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or(Error::MissingReferer)?;
    if referer == request.current_url.trim() {
        return Err(Error::RedirectLoop);
    }
    Ok(referer.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_location() {
        let request = RequestInfo {
            current_url: "http://localhost/?action=delete-all".into(),
            referer: Some("http://localhost/page".into()),
        };
        assert_eq!(return_location(&request).unwrap(), "http://localhost/page");
    }

    #[test]
    fn test_return_location_requires_referer() {
        let request = RequestInfo {
            current_url: "http://localhost/".into(),
            referer: None,
        };
        assert!(matches!(return_location(&request), Err(Error::MissingReferer)));
    }

    #[test]
    fn test_return_location_detects_loop() {
        let request = RequestInfo {
            current_url: "http://localhost/x".into(),
            referer: Some("http://localhost/x".into()),
        };
        assert!(matches!(return_location(&request), Err(Error::RedirectLoop)));
    }

    #[test]
    fn test_response_content_types() {
        assert_eq!(PanelResponse::Source(Vec::new()).content_type(), Some("text/plain"));
        let redirect = PanelResponse::Redirect {
            location: "/".into(),
        };
        assert_eq!(redirect.content_type(), None);
    }
}
