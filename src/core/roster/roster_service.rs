use async_trait::async_trait;
use tracing::info;

use super::roster_models::{Roster, SheetLocator};
use super::roster_parser::{parse_rows, ReadError};

/// Columns A (name) and B (date), from the first row after the header to the end.
pub const ROSTER_RANGE: &str = "A2:B";

/// Anything that can return the raw cells of a sheet range, already coerced to text.
#[async_trait]
pub trait RosterSource: Send + Sync {
    async fn fetch_rows(
        &self,
        sheet: &SheetLocator,
        range: &str,
    ) -> Result<Vec<Vec<String>>, ReadError>;
}

/// Reads and validates the birthday roster from a sheet.
pub struct RosterReader<S: RosterSource> {
    source: S,
}

impl<S: RosterSource> RosterReader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// One range read, then fail-fast validation of every row.
    pub async fn fetch_roster(&self, sheet: &SheetLocator) -> Result<Roster, ReadError> {
        let rows = self.source.fetch_rows(sheet, ROSTER_RANGE).await?;
        let roster = parse_rows(&rows)?;

        info!(count = roster.len(), sheet_id = %sheet, "Loaded roster");
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::roster::BirthdayRecord;
    use std::sync::Mutex;

    struct StaticSource {
        result: Result<Vec<Vec<String>>, ReadError>,
        requests: Mutex<Vec<(String, String)>>,
    }

    impl StaticSource {
        fn new(result: Result<Vec<Vec<String>>, ReadError>) -> Self {
            Self {
                result,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RosterSource for StaticSource {
        async fn fetch_rows(
            &self,
            sheet: &SheetLocator,
            range: &str,
        ) -> Result<Vec<Vec<String>>, ReadError> {
            self.requests
                .lock()
                .unwrap()
                .push((sheet.sheet_id.clone(), range.to_string()));
            self.result.clone()
        }
    }

    fn sheet() -> SheetLocator {
        SheetLocator {
            sheet_id: "ABC123".to_string(),
        }
    }

    fn rows(cells: &[(&str, &str)]) -> Vec<Vec<String>> {
        cells
            .iter()
            .map(|(name, date)| vec![name.to_string(), date.to_string()])
            .collect()
    }

    #[tokio::test]
    async fn test_fetch_roster_reads_fixed_range() {
        let reader = RosterReader::new(StaticSource::new(Ok(rows(&[
            ("alice", "12/21"),
            ("bob", "3/14"),
        ]))));

        let roster = reader.fetch_roster(&sheet()).await.unwrap();

        assert_eq!(
            roster,
            vec![
                BirthdayRecord::new("alice", 12, 21),
                BirthdayRecord::new("bob", 3, 14)
            ]
        );
        assert_eq!(
            *reader.source.requests.lock().unwrap(),
            vec![("ABC123".to_string(), "A2:B".to_string())]
        );
    }

    #[tokio::test]
    async fn test_fetch_roster_returns_no_partial_roster() {
        let reader = RosterReader::new(StaticSource::new(Ok(rows(&[
            ("alice", "12/21"),
            ("", "3/14"),
        ]))));

        assert_eq!(
            reader.fetch_roster(&sheet()).await,
            Err(ReadError::MissingName { row: 3 })
        );
    }

    #[tokio::test]
    async fn test_fetch_roster_propagates_source_errors() {
        let reader = RosterReader::new(StaticSource::new(Err(ReadError::Fetch(
            "403 Forbidden".to_string(),
        ))));
        assert_eq!(
            reader.fetch_roster(&sheet()).await,
            Err(ReadError::Fetch("403 Forbidden".to_string()))
        );

        let reader = RosterReader::new(StaticSource::new(Ok(Vec::new())));
        assert_eq!(reader.fetch_roster(&sheet()).await, Err(ReadError::Empty));
    }
}
