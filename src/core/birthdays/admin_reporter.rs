use std::fmt;

use tracing::{debug, warn};

use crate::core::notify::{Attachment, NotificationMessage, Notifier};

const INFO_COLOR: &str = "#2159b2";
const ERROR_COLOR: &str = "#e23434";

/// Best-effort status reporting to the optional admin channel.
///
/// Every method is a no-op when no admin webhook is configured, and delivery
/// failures are only logged. Reporting never produces an error of its own.
pub struct AdminReporter<N: Notifier> {
    notifier: Option<N>,
}

impl<N: Notifier> AdminReporter<N> {
    pub fn new(notifier: Option<N>) -> Self {
        Self { notifier }
    }

    #[cfg(test)]
    pub fn disabled() -> Self {
        Self { notifier: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.notifier.is_some()
    }

    pub async fn report_info(&self, title: &str, body: &str) {
        self.deliver(info_report(title, body)).await;
    }

    pub async fn report_error(&self, title: &str, detail: &dyn fmt::Display) {
        self.deliver(error_report(title, detail)).await;
    }

    async fn deliver(&self, message: NotificationMessage) {
        let Some(notifier) = &self.notifier else {
            debug!("No admin channel configured, skipping report");
            return;
        };

        if let Err(e) = notifier.send(&message).await {
            warn!(error = %e, "Cannot send information to the admin channel");
        }
    }
}

pub fn info_report(title: &str, body: &str) -> NotificationMessage {
    NotificationMessage::text("Info from bdaybot").with_attachment(Attachment {
        color: INFO_COLOR.to_string(),
        pretext: String::new(),
        title: title.to_string(),
        text: body.to_string(),
    })
}

pub fn error_report(title: &str, detail: &dyn fmt::Display) -> NotificationMessage {
    NotificationMessage::text("Error from bdaybot").with_attachment(Attachment {
        color: ERROR_COLOR.to_string(),
        pretext: "Something bad happened".to_string(),
        title: title.to_string(),
        text: format!("```{}```", detail),
    })
}
