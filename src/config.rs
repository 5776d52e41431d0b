//! Bot configuration, loaded once at startup from a JSON file.
//!
//! Secrets and webhook URLs may also come from the environment (or a `.env`
//! file), which wins over the file when set:
//! `BDAYBOT_CLIENT_ID`, `BDAYBOT_CLIENT_SECRET`, `BDAYBOT_WEBHOOK_URL`,
//! `BDAYBOT_ADMIN_WEBHOOK_URL`.

use std::path::Path;

use chrono::{DateTime, Datelike, Local, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;

use crate::core::auth::ClientIdentity;
use crate::core::birthdays::Salute;
use crate::core::roster::MonthDay;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file {path} not found: {reason}")]
    NotFound { path: String, reason: String },
    #[error("Malformed config: {0}")]
    Malformed(String),
}

// ============================================================================
// FILE FORMAT
// ============================================================================
// Keys are camelCase; snake_case also works.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    #[serde(default)]
    oauth2: OAuth2Section,
    #[serde(default)]
    calendar: CalendarSection,
    #[serde(default)]
    slack: SlackSection,
    #[serde(default)]
    timezone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OAuth2Section {
    #[serde(default, alias = "client_id")]
    client_id: String,
    #[serde(default, alias = "client_secret")]
    client_secret: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarSection {
    #[serde(default, alias = "google_sheet")]
    google_sheet: GoogleSheetSection,
}

#[derive(Debug, Default, Deserialize)]
struct GoogleSheetSection {
    #[serde(default)]
    url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlackSection {
    #[serde(default, alias = "webhook_url")]
    webhook_url: String,
    #[serde(default, alias = "admin_webhook_url")]
    admin_webhook_url: Option<String>,
    #[serde(default, alias = "salute_prefix")]
    salute_prefix: String,
    #[serde(default, alias = "salute_suffix")]
    salute_suffix: String,
}

// ============================================================================
// VALIDATED CONFIG
// ============================================================================

/// Immutable runtime configuration shared by every command.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub identity: ClientIdentity,
    pub spreadsheet_url: String,
    pub webhook_url: String,
    /// `None` disables admin reporting.
    pub admin_webhook_url: Option<String>,
    pub salute: Salute,
    /// Zone used to decide what "today" is. `None` means the host's local time.
    pub timezone: Option<Tz>,
}

impl BotConfig {
    /// Reads the file at `path`, applies environment overrides and validates.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| ConfigError::NotFound {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_json_with(&text, |key| std::env::var(key).ok())
    }

    /// Parses config JSON, taking overrides from `lookup` (environment in production).
    pub fn from_json_with(
        text: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            serde_json::from_str(text).map_err(|e| ConfigError::Malformed(e.to_string()))?;

        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timezone = match file.timezone.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(name) => Some(name.parse::<Tz>().map_err(|_| {
                ConfigError::Malformed(format!("unknown timezone {:?}", name))
            })?),
        };

        let config = Self {
            identity: ClientIdentity::new(
                env("BDAYBOT_CLIENT_ID").unwrap_or(file.oauth2.client_id),
                env("BDAYBOT_CLIENT_SECRET").unwrap_or(file.oauth2.client_secret),
            ),
            spreadsheet_url: file.calendar.google_sheet.url.trim().to_string(),
            webhook_url: env("BDAYBOT_WEBHOOK_URL").unwrap_or(file.slack.webhook_url),
            admin_webhook_url: env("BDAYBOT_ADMIN_WEBHOOK_URL")
                .or(file.slack.admin_webhook_url)
                .filter(|url| !url.trim().is_empty()),
            salute: Salute {
                prefix: file.slack.salute_prefix,
                suffix: file.slack.salute_suffix,
            },
            timezone,
        };

        if config.identity.client_id.is_empty() || config.identity.client_secret.is_empty() {
            return Err(ConfigError::Malformed(
                "oauth2.clientId and oauth2.clientSecret are required".to_string(),
            ));
        }

        Ok(config)
    }

    /// Checks the settings only the daily run needs (`--auth` works without them).
    /// Called by the daily run itself so a failure still reaches the admin channel.
    pub fn validate_for_notify(&self) -> Result<(), ConfigError> {
        if self.spreadsheet_url.is_empty() {
            return Err(ConfigError::Malformed(
                "calendar.googleSheet.url is required".to_string(),
            ));
        }
        if self.webhook_url.trim().is_empty() {
            return Err(ConfigError::Malformed(
                "slack.webhookUrl is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn today(&self) -> MonthDay {
        self.day_at(Utc::now())
    }

    /// Calendar day of `now` in the configured zone.
    pub fn day_at(&self, now: DateTime<Utc>) -> MonthDay {
        match self.timezone {
            Some(tz) => {
                let local = now.with_timezone(&tz);
                MonthDay::new(local.month(), local.day())
            }
            None => {
                let local = now.with_timezone(&Local);
                MonthDay::new(local.month(), local.day())
            }
        }
    }
}
