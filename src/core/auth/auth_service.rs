// Session bootstrap for the spreadsheet provider.
//
// Two paths lead to a usable session:
// - interactive: show the operator an authorization URL, take the approval code
//   they paste back, exchange it for a credential (the caller persists it)
// - stored: load a previously saved credential and wrap it in a `Session`
//
// Nothing here knows about HTTP or files. The provider endpoints, the credential
// file and the console are all behind traits so tests can script them.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::auth_models::{AuthError, ClientIdentity, Credential};

/// Durable home of the credential between runs.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self) -> Result<Credential, AuthError>;
    async fn save(&self, credential: &Credential) -> Result<(), AuthError>;
}

/// Someone (usually a human at a console) who turns an authorization URL into an approval code.
#[async_trait]
pub trait ApprovalCodeProvider: Send + Sync {
    async fn approval_code(&self, authorize_url: &str) -> Result<String, AuthError>;
}

/// The OAuth2 operations the bot needs from the spreadsheet provider.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    fn authorize_url(&self, identity: &ClientIdentity) -> String;

    async fn exchange_code(
        &self,
        identity: &ClientIdentity,
        code: &str,
    ) -> Result<Credential, AuthError>;

    async fn refresh(
        &self,
        identity: &ClientIdentity,
        refresh_token: &str,
    ) -> Result<Credential, AuthError>;
}

/// Combines the client identity with a credential source into a `Session`.
pub struct SessionBuilder {
    identity: ClientIdentity,
    provider: Arc<dyn AuthProvider>,
}

impl SessionBuilder {
    pub fn new(identity: ClientIdentity, provider: Arc<dyn AuthProvider>) -> Self {
        Self { identity, provider }
    }

    /// Runs the one-time authorization exchange.
    ///
    /// The returned credential is not persisted; that is up to the caller.
    pub async fn authorize_interactively(
        &self,
        approval: &dyn ApprovalCodeProvider,
    ) -> Result<Credential, AuthError> {
        let authorize_url = self.provider.authorize_url(&self.identity);
        let code = approval.approval_code(&authorize_url).await?;

        let code = code.trim();
        if code.is_empty() {
            return Err(AuthError::Interactive(
                "empty authorization code".to_string(),
            ));
        }

        info!("Exchanging authorization code for a credential");
        self.provider.exchange_code(&self.identity, code).await
    }

    /// Builds a session from a previously stored credential.
    pub async fn build_session(&self, store: &dyn CredentialStore) -> Result<Session, AuthError> {
        let credential = store.load().await?;
        debug!(
            expiry = ?credential.expiry,
            "Loaded stored credential"
        );

        Ok(Session::new(
            self.identity.clone(),
            Arc::clone(&self.provider),
            credential,
        ))
    }
}

/// Authenticated handle used by the spreadsheet client.
///
/// Hands out a valid access token for every request and refreshes it through the
/// provider when it is about to expire. Refreshed tokens only live in memory.
pub struct Session {
    identity: ClientIdentity,
    provider: Arc<dyn AuthProvider>,
    credential: Mutex<Credential>,
}

impl Session {
    pub fn new(
        identity: ClientIdentity,
        provider: Arc<dyn AuthProvider>,
        credential: Credential,
    ) -> Self {
        Self {
            identity,
            provider,
            credential: Mutex::new(credential),
        }
    }

    pub async fn access_token(&self) -> Result<String, AuthError> {
        let mut credential = self.credential.lock().await;

        if credential.needs_refresh(Utc::now()) {
            if credential.refresh_token.is_empty() {
                return Err(AuthError::Exchange(
                    "access token expired and no refresh token is available".to_string(),
                ));
            }

            info!("Access token expired, refreshing");
            let mut refreshed = self
                .provider
                .refresh(&self.identity, &credential.refresh_token)
                .await?;

            // Google only sends a new refresh token when it rotates it
            if refreshed.refresh_token.is_empty() {
                refreshed.refresh_token = credential.refresh_token.clone();
            }
            *credential = refreshed;
        }

        Ok(credential.access_token.clone())
    }
}
