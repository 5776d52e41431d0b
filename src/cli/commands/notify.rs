// =============================================================================
// DAILY NOTIFICATION CYCLE
// =============================================================================
//
// check settings -> connect (stored credential + sheet id) -> read roster -> match today -> post.
// Every failure is reported to the admin channel (when configured) with a title
// naming the stage, then returned so the process exits non-zero.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::{BotConfig, ConfigError};
use crate::core::auth::{AuthError, CredentialStore, SessionBuilder};
use crate::core::birthdays::{AdminReporter, BirthdayService, NotificationOutcome};
use crate::core::notify::SendError;
use crate::core::roster::{LocatorError, MonthDay, ReadError, RosterReader, SheetLocator};
use crate::infra::google::{GoogleEndpoints, GoogleOAuthClient, SheetsClient};
use crate::infra::slack::SlackWebhookClient;

/// A daily run that stopped early, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("Cannot connect to Google Spreadsheets")]
    Config(#[source] ConfigError),
    #[error("Cannot connect to Google Spreadsheets")]
    Auth(#[source] AuthError),
    #[error("Cannot connect to Google Spreadsheets")]
    Locator(#[source] LocatorError),
    #[error("Error while reading data from spreadsheet")]
    Read(#[source] ReadError),
    #[error("Cannot send birthday salute")]
    Salute(#[source] SendError),
}

impl CycleError {
    /// Attachment title for the admin error report.
    pub fn report_title(&self, spreadsheet_url: &str) -> String {
        match self {
            Self::Read(_) => format!("Error while reading data from spreadsheet ({})", spreadsheet_url),
            other => other.to_string(),
        }
    }

    /// The underlying failure, quoted in the admin error report.
    pub fn detail(&self) -> &dyn fmt::Display {
        match self {
            Self::Config(e) => e,
            Self::Auth(e) => e,
            Self::Locator(e) => e,
            Self::Read(e) => e,
            Self::Salute(e) => e,
        }
    }
}

pub async fn run(
    config: &BotConfig,
    store: &dyn CredentialStore,
    endpoints: &GoogleEndpoints,
    today: MonthDay,
) -> Result<NotificationOutcome, CycleError> {
    let admin = AdminReporter::new(
        config
            .admin_webhook_url
            .as_deref()
            .map(SlackWebhookClient::new),
    );
    if admin.is_enabled() {
        info!("Found webhook for admin, events will be reported there");
    } else {
        info!("Did not find a webhook for admin");
    }

    let service = BirthdayService::new(
        SlackWebhookClient::new(&config.webhook_url),
        admin,
        config.salute.clone(),
        &config.spreadsheet_url,
    );

    let result = cycle(&service, config, store, endpoints, today).await;

    if let Err(e) = &result {
        service
            .admin()
            .report_error(&e.report_title(&config.spreadsheet_url), e.detail())
            .await;
    }

    result
}

async fn cycle(
    service: &BirthdayService<SlackWebhookClient>,
    config: &BotConfig,
    store: &dyn CredentialStore,
    endpoints: &GoogleEndpoints,
    today: MonthDay,
) -> Result<NotificationOutcome, CycleError> {
    config.validate_for_notify().map_err(CycleError::Config)?;
    let (reader, sheet) = connect(config, store, endpoints).await?;

    info!(url = %config.spreadsheet_url, "Reading birthdays from spreadsheet");
    let roster = reader.fetch_roster(&sheet).await.map_err(CycleError::Read)?;

    info!(%today, "Looking for birthdays");
    service.run(&roster, today).await.map_err(CycleError::Salute)
}

async fn connect(
    config: &BotConfig,
    store: &dyn CredentialStore,
    endpoints: &GoogleEndpoints,
) -> Result<(RosterReader<SheetsClient>, SheetLocator), CycleError> {
    let provider = GoogleOAuthClient::new(endpoints).map_err(CycleError::Auth)?;
    let session = SessionBuilder::new(config.identity.clone(), Arc::new(provider))
        .build_session(store)
        .await
        .map_err(CycleError::Auth)?;

    let sheet = SheetLocator::from_url(&config.spreadsheet_url).map_err(CycleError::Locator)?;

    Ok((RosterReader::new(SheetsClient::new(session, endpoints)), sheet))
}
