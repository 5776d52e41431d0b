use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::GoogleEndpoints;
use crate::core::auth::Session;
use crate::core::roster::{ReadError, RosterSource, SheetLocator};

/// Sheets v4 `ValueRange`. `values` is omitted by the API when the range is empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Reads cell ranges from Google Sheets on behalf of the authenticated user.
pub struct SheetsClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl SheetsClient {
    pub fn new(session: Session, endpoints: &GoogleEndpoints) -> Self {
        Self {
            client: Client::new(),
            base_url: endpoints.sheets_api_url.trim_end_matches('/').to_string(),
            session,
        }
    }
}

/// Cell value as the text a person would see in the sheet.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl RosterSource for SheetsClient {
    async fn fetch_rows(
        &self,
        sheet: &SheetLocator,
        range: &str,
    ) -> Result<Vec<Vec<String>>, ReadError> {
        let token = self
            .session
            .access_token()
            .await
            .map_err(|e| ReadError::Fetch(e.to_string()))?;

        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url, sheet.sheet_id, range
        );
        debug!(sheet_id = %sheet, range, "Fetching sheet range");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ReadError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ReadError::Fetch(format!(
                "Google Sheets API error ({}): {}",
                status, text
            )));
        }

        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| ReadError::Fetch(format!("Invalid Sheets API response: {}", e)))?;

        Ok(body
            .values
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }
}
