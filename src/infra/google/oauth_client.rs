// =============================================================================
// GOOGLE OAUTH2 CLIENT (INSTALLED-APP / OUT-OF-BAND FLOW)
// =============================================================================
//
// The bot uses a user credential rather than a service account: an operator
// runs `bdaybot --auth` once, opens the printed URL, approves read-only access
// to spreadsheets and pastes the code back. The code is exchanged for an
// access/refresh token pair which is stored on disk.
//
// **Setup:**
// 1. In Google Cloud Console enable the Google Sheets API
// 2. Create an OAuth client of type "Desktop app"
// 3. Put its client id/secret into `config.json` (oauth2.clientId / clientSecret)
// 4. Run `bdaybot --auth` and follow the instructions

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use super::GoogleEndpoints;
use crate::core::auth::{AuthError, AuthProvider, ClientIdentity, Credential};

const READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";
// No local callback server: Google shows the code to the user instead.
const OOB_REDIRECT: &str = "urn:ietf:wg:oauth:2.0:oob";
const STATE: &str = "state-token";

/// Response from Google's token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
}

impl TokenResponse {
    fn into_credential(self, now: DateTime<Utc>) -> Credential {
        Credential {
            access_token: self.access_token,
            token_type: self.token_type.unwrap_or_else(|| "Bearer".to_string()),
            refresh_token: self.refresh_token.unwrap_or_default(),
            expiry: self.expires_in.map(|secs| now + Duration::seconds(secs)),
        }
    }
}

pub struct GoogleOAuthClient {
    client: Client,
    auth_url: Url,
    token_url: String,
}

impl GoogleOAuthClient {
    pub fn new(endpoints: &GoogleEndpoints) -> Result<Self, AuthError> {
        let auth_url = Url::parse(&endpoints.auth_url).map_err(|e| {
            AuthError::Exchange(format!("invalid authorization endpoint: {}", e))
        })?;

        Ok(Self {
            client: Client::new(),
            auth_url,
            token_url: endpoints.token_url.clone(),
        })
    }

    async fn request_token(&self, params: &[(&str, &str)]) -> Result<Credential, AuthError> {
        let response = self
            .client
            .post(&self.token_url)
            .form(params)
            .send()
            .await
            .map_err(|e| AuthError::Exchange(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AuthError::Exchange(format!(
                "Token request failed ({}): {}",
                status, text
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Exchange(format!("Invalid token response: {}", e)))?;

        debug!(expires_in = ?token.expires_in, "Received token from Google");
        Ok(token.into_credential(Utc::now()))
    }
}

#[async_trait]
impl AuthProvider for GoogleOAuthClient {
    fn authorize_url(&self, identity: &ClientIdentity) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("access_type", "offline")
            .append_pair("client_id", &identity.client_id)
            .append_pair("redirect_uri", OOB_REDIRECT)
            .append_pair("response_type", "code")
            .append_pair("scope", READONLY_SCOPE)
            .append_pair("state", STATE);
        url.to_string()
    }

    async fn exchange_code(
        &self,
        identity: &ClientIdentity,
        code: &str,
    ) -> Result<Credential, AuthError> {
        self.request_token(&[
            ("client_id", identity.client_id.as_str()),
            ("client_secret", identity.client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", OOB_REDIRECT),
        ])
        .await
    }

    async fn refresh(
        &self,
        identity: &ClientIdentity,
        refresh_token: &str,
    ) -> Result<Credential, AuthError> {
        self.request_token(&[
            ("client_id", identity.client_id.as_str()),
            ("client_secret", identity.client_secret.as_str()),
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }
}
