use std::sync::Arc;

use tracing::info;

use crate::config::BotConfig;
use crate::core::auth::{ApprovalCodeProvider, AuthError, CredentialStore, SessionBuilder};
use crate::infra::google::{GoogleEndpoints, GoogleOAuthClient};

/// One-time authorization: obtain a user credential and store it for daily runs.
pub async fn run(
    config: &BotConfig,
    store: &dyn CredentialStore,
    approval: &dyn ApprovalCodeProvider,
    endpoints: &GoogleEndpoints,
) -> Result<(), AuthError> {
    info!("Starting auth workflow");

    let provider = GoogleOAuthClient::new(endpoints)?;
    let builder = SessionBuilder::new(config.identity.clone(), Arc::new(provider));

    let credential = builder.authorize_interactively(approval).await?;
    store.save(&credential).await?;

    info!("Authorization complete, credential stored");
    Ok(())
}
