// =============================================================================
// GOOGLE MODULE
// =============================================================================
//
// Everything that talks to Google lives here:
// - `oauth_client.rs` runs the OAuth2 authorization-code exchange and token
//   refreshes against Google's endpoints (implements `AuthProvider`)
// - `sheets_client.rs` reads cell ranges through the Sheets v4 API using an
//   authenticated `Session` (implements `RosterSource`)
//
// The core layer only sees credentials and rows of text.

pub mod oauth_client;
pub mod sheets_client;

pub use oauth_client::GoogleOAuthClient;
pub use sheets_client::SheetsClient;

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const SHEETS_API: &str = "https://sheets.googleapis.com";

/// Base URLs of the Google services the bot uses.
///
/// Production code uses `GoogleEndpoints::default()`; tests point these at a local mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleEndpoints {
    pub auth_url: String,
    pub token_url: String,
    pub sheets_api_url: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            auth_url: AUTH_ENDPOINT.to_string(),
            token_url: TOKEN_ENDPOINT.to_string(),
            sheets_api_url: SHEETS_API.to_string(),
        }
    }
}
