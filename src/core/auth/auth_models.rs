use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How close to its expiry an access token may get before we refresh it.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Errors raised while obtaining or loading spreadsheet credentials.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unable to read authorization code: {0}")]
    Interactive(String),
    #[error("No usable credential found: {0}")]
    NotFound(String),
    #[error("Unable to retrieve token from web: {0}")]
    Exchange(String),
    #[error("Unable to cache oauth token: {0}")]
    Store(String),
}

/// OAuth client registered with the spreadsheet provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientIdentity {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

/// Long-lived access/refresh token pair.
///
/// The JSON shape matches the token files written by earlier versions of the bot,
/// so an existing `token.json` keeps working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Credential {
    /// True when the access token is expired or about to be.
    ///
    /// A missing expiry, or the zero timestamp `0001-01-01T00:00:00Z`, means the
    /// token never expires.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) if expiry.year() > 1 => {
                expiry <= now + Duration::seconds(EXPIRY_MARGIN_SECS)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(expiry: Option<DateTime<Utc>>) -> Credential {
        Credential {
            access_token: "ya29.access".to_string(),
            token_type: "Bearer".to_string(),
            refresh_token: "1//refresh".to_string(),
            expiry,
        }
    }

    #[test]
    fn test_needs_refresh_when_expired() {
        let now = Utc::now();
        assert!(credential(Some(now - Duration::minutes(5))).needs_refresh(now));
        assert!(credential(Some(now + Duration::seconds(30))).needs_refresh(now));
        assert!(!credential(Some(now + Duration::minutes(30))).needs_refresh(now));
    }

    #[test]
    fn test_missing_or_zero_expiry_never_refreshes() {
        let now = Utc::now();
        assert!(!credential(None).needs_refresh(now));

        let zero: Credential = serde_json::from_str(
            r#"{"access_token":"a","token_type":"Bearer","refresh_token":"r","expiry":"0001-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(!zero.needs_refresh(now));
    }

    #[test]
    fn test_legacy_token_file_shape() {
        let json = r#"{
            "access_token": "ya29.a0Af",
            "token_type": "Bearer",
            "refresh_token": "1//09xyz",
            "expiry": "2019-12-21T10:15:30.123456+01:00"
        }"#;

        let parsed: Credential = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_token, "ya29.a0Af");
        assert_eq!(parsed.refresh_token, "1//09xyz");
        assert_eq!(
            parsed.expiry.map(|e| e.to_rfc3339()),
            Some("2019-12-21T09:15:30.123456+00:00".to_string())
        );
    }

    #[test]
    fn test_token_type_defaults_to_bearer() {
        let parsed: Credential = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(parsed.token_type, "Bearer");
        assert!(parsed.refresh_token.is_empty());
        assert!(parsed.expiry.is_none());
    }
}
