// Entry point of the birthday bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (roster rules, matching, messages, credential lifecycle)
// - `infra/` = Implementations of core traits (Google APIs, token file, Slack webhooks)
// - `cli/` = Argument parsing, console prompts and the two run modes
//
// This file's job is to:
// 1. Set up logging and load configuration
// 2. Wire the infra implementations into the chosen command
// 3. Turn a failed run into a non-zero exit code

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "cli/cli_layer.rs"]
mod cli;
mod config;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::commands::{authorize, notify};
use crate::cli::console_approval::ConsoleApproval;
use crate::cli::Args;
use crate::config::BotConfig;
use crate::core::birthdays::NotificationOutcome;
use crate::infra::credentials::FileCredentialStore;
use crate::infra::google::GoogleEndpoints;

async fn run(args: Args) -> anyhow::Result<()> {
    let config = BotConfig::load(&args.config).await?;
    let store = FileCredentialStore::new(&args.user_token_file);
    let endpoints = GoogleEndpoints::default();

    if args.auth {
        authorize::run(&config, &store, &ConsoleApproval::stdin(), &endpoints)
            .await
            .context("Authorization failed")?;
        return Ok(());
    }

    let today = config.today();
    match notify::run(&config, &store, &endpoints, today).await? {
        NotificationOutcome::NoBirthdays => tracing::info!(%today, "Done, no birthdays today"),
        NotificationOutcome::Celebrated { people } => {
            tracing::info!(count = people.len(), "Done, birthday salute sent")
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // RUST_LOG overrides the default level, e.g. RUST_LOG=bdaybot=debug
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load .env so secrets can stay out of config.json
    dotenv::dotenv().ok();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_incomplete_config_is_reported_to_admin_before_exit() {
        let server = MockServer::start_async().await;
        let admin = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/hooks/admin")
                    .body_includes("Cannot connect to Google Spreadsheets")
                    .body_includes("calendar.googleSheet.url is required");
                then.status(200).body("ok");
            })
            .await;

        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        let config = json!({
            "oauth2": {"clientId": "id-1", "clientSecret": "secret-1"},
            "calendar": {"googleSheet": {"url": ""}},
            "slack": {
                "webhookUrl": server.url("/hooks/team"),
                "adminWebhookUrl": server.url("/hooks/admin")
            }
        });
        std::fs::write(&config_path, config.to_string()).unwrap();

        let config_arg = config_path.to_str().unwrap().to_string();
        let token_arg = dir.path().join("token.json").to_str().unwrap().to_string();
        let args = Args::try_parse_from([
            "bdaybot",
            "--config",
            config_arg.as_str(),
            "--userTokenFile",
            token_arg.as_str(),
        ])
        .unwrap();

        let result = run(args).await;

        assert!(result.is_err());
        admin.assert_calls_async(1).await;
    }
}
