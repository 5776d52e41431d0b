use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::core::notify::{Attachment, NotificationMessage, Notifier, SendError};

/// Body Slack answers with when it accepted a webhook message.
const OK_BODY: &str = "ok";

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
    parse: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<WebhookAttachment<'a>>,
}

#[derive(Debug, Serialize)]
struct WebhookAttachment<'a> {
    color: &'a str,
    pretext: &'a str,
    title: &'a str,
    text: &'a str,
}

impl<'a> From<&'a Attachment> for WebhookAttachment<'a> {
    fn from(attachment: &'a Attachment) -> Self {
        Self {
            color: &attachment.color,
            pretext: &attachment.pretext,
            title: &attachment.title,
            text: &attachment.text,
        }
    }
}

impl<'a> From<&'a NotificationMessage> for WebhookPayload<'a> {
    fn from(message: &'a NotificationMessage) -> Self {
        Self {
            text: &message.primary_text,
            parse: "full",
            attachments: message.attachments.iter().map(WebhookAttachment::from).collect(),
        }
    }
}

/// Posts messages to one incoming webhook. No retries: one POST per message.
pub struct SlackWebhookClient {
    client: Client,
    webhook_url: String,
}

impl SlackWebhookClient {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            webhook_url: webhook_url.into(),
        }
    }
}

#[async_trait]
impl Notifier for SlackWebhookClient {
    async fn send(&self, message: &NotificationMessage) -> Result<(), SendError> {
        let payload = WebhookPayload::from(message);
        debug!(
            attachments = payload.attachments.len(),
            "Posting message to webhook"
        );

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        if body != OK_BODY {
            return Err(SendError::Unexpected(body));
        }

        Ok(())
    }
}
