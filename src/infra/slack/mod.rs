// Chat delivery through Slack-compatible incoming webhooks.

#[path = "webhook_client.rs"]
pub mod webhook_client;

pub use webhook_client::SlackWebhookClient;
