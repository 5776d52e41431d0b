use std::path::PathBuf;

use clap::Parser;

/// Posts today's birthdays from a Google Sheet to a Slack channel.
#[derive(Debug, Parser)]
#[command(name = "bdaybot", version)]
pub struct Args {
    /// Path to the config file
    #[arg(long, default_value = "./config.json")]
    pub config: PathBuf,

    /// Path to a file with the user OAuth2 token
    #[arg(long = "userTokenFile", default_value = "./token.json")]
    pub user_token_file: PathBuf,

    /// Run the interactive authorization workflow and store the token
    #[arg(long)]
    pub auth: bool,
}
