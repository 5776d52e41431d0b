// Chat messages as the core sees them. The webhook client decides how they go on the wire.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while delivering a message to a webhook.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("Webhook request failed: {0}")]
    Transport(String),
    #[error("Webhook returned not-ok: {0:?}")]
    Unexpected(String),
}

/// A coloured block attached below the main text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub color: String,
    pub pretext: String,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub primary_text: String,
    pub attachments: Vec<Attachment>,
}

impl NotificationMessage {
    /// A message with text only.
    pub fn text(primary_text: impl Into<String>) -> Self {
        Self {
            primary_text: primary_text.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// Delivers messages to one chat destination.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &NotificationMessage) -> Result<(), SendError>;
}
