// Turns loosely typed sheet rows into a strict `Roster`.
//
// The sheet is expected to look like:
//
//   | Name   | Date   |
//   | rick   | 12/21  |
//   | alice  | 3/14   |
//
// The header row is skipped by the read range, so the first data row is row 2.
// Parsing is fail-fast: the first bad row aborts the whole read.

use once_cell::sync::Lazy;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use super::roster_models::{BirthdayRecord, MonthDay, Roster, SheetLocator};

/// Sheet row number of the first record (row 1 is the header).
pub const FIRST_DATA_ROW: usize = 2;

// ASCII digits only; `\d` would also accept other scripts' digits.
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<month>[0-9]+)/(?P<day>[0-9]+)").expect("date pattern is valid")
});

static SHEET_URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https://docs\.google\.com/spreadsheets/d/(?P<id>[^/]+)/")
        .expect("sheet url pattern is valid")
});

/// Errors raised while reading the roster.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReadError {
    #[error("Unable to retrieve data from sheet: {0}")]
    Fetch(String),
    #[error("No data found")]
    Empty,
    #[error("Empty name in row {row}")]
    MissingName { row: usize },
    #[error("Cannot parse date in row {row}: {raw:?}")]
    BadDate { row: usize, raw: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocatorError {
    #[error("Cannot get sheet ID from url {0:?}")]
    Unparseable(String),
}

/// Date text that does not contain an `M/D` pair.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Error parsing date {0:?}")]
pub struct DateFormatError(pub String);

/// Parses `M/D` date text (month first).
///
/// The first `<digits>/<digits>` pair anywhere in the text is used, so
/// `12/21/1990` is December 21st. Day-of-month is not checked against the month.
pub fn parse_date(raw: &str) -> Result<MonthDay, DateFormatError> {
    let caps = DATE_PATTERN
        .captures(raw)
        .ok_or_else(|| DateFormatError(raw.to_string()))?;

    let month = caps["month"]
        .parse::<u32>()
        .map_err(|_| DateFormatError(raw.to_string()))?;
    let day = caps["day"]
        .parse::<u32>()
        .map_err(|_| DateFormatError(raw.to_string()))?;

    Ok(MonthDay::new(month, day))
}

/// Validates raw rows (column A = person, column B = date) into a roster.
///
/// Missing trailing cells count as empty text.
pub fn parse_rows(rows: &[Vec<String>]) -> Result<Roster, ReadError> {
    if rows.is_empty() {
        return Err(ReadError::Empty);
    }

    let mut roster = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let row_number = idx + FIRST_DATA_ROW;

        let name = row.first().map(String::as_str).unwrap_or_default();
        if name.is_empty() {
            return Err(ReadError::MissingName { row: row_number });
        }

        let raw_date = row.get(1).map(String::as_str).unwrap_or_default();
        debug!(row = row_number, name, raw_date, "Read roster row");

        let date = parse_date(raw_date).map_err(|_| ReadError::BadDate {
            row: row_number,
            raw: raw_date.to_string(),
        })?;

        roster.push(BirthdayRecord {
            person_id: name.to_string(),
            date,
        });
    }

    Ok(roster)
}

impl SheetLocator {
    /// Extracts the spreadsheet id from a `https://docs.google.com/spreadsheets/d/<id>/...` URL.
    pub fn from_url(url: &str) -> Result<Self, LocatorError> {
        SHEET_URL_PATTERN
            .captures(url)
            .map(|caps| Self {
                sheet_id: caps["id"].to_string(),
            })
            .ok_or_else(|| LocatorError::Unparseable(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, date: &str) -> Vec<String> {
        vec![name.to_string(), date.to_string()]
    }

    #[test]
    fn test_parse_date_month_then_day() {
        assert_eq!(parse_date("12/21"), Ok(MonthDay::new(12, 21)));
        assert_eq!(parse_date("3/14"), Ok(MonthDay::new(3, 14)));
        assert_eq!(parse_date("03/04"), Ok(MonthDay::new(3, 4)));
    }

    #[test]
    fn test_parse_date_ignores_surrounding_text() {
        assert_eq!(parse_date("  7/1 "), Ok(MonthDay::new(7, 1)));
        assert_eq!(parse_date("12/21/1990"), Ok(MonthDay::new(12, 21)));
        assert_eq!(parse_date("born 5/6"), Ok(MonthDay::new(5, 6)));
    }

    #[test]
    fn test_parse_date_keeps_impossible_days() {
        assert_eq!(parse_date("2/30"), Ok(MonthDay::new(2, 30)));
        assert_eq!(parse_date("13/45"), Ok(MonthDay::new(13, 45)));
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        for raw in ["", "3-14", "March 14", "/14", "3/", "٣/١٤", "99999999999/1"] {
            assert_eq!(
                parse_date(raw),
                Err(DateFormatError(raw.to_string())),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn test_parse_rows_in_order_with_duplicates() {
        let rows = vec![row("rick", "12/21"), row("alice", "3/14"), row("rick", "12/21")];

        let roster = parse_rows(&rows).unwrap();

        assert_eq!(
            roster,
            vec![
                BirthdayRecord::new("rick", 12, 21),
                BirthdayRecord::new("alice", 3, 14),
                BirthdayRecord::new("rick", 12, 21),
            ]
        );
    }

    #[test]
    fn test_parse_rows_empty_sheet() {
        assert_eq!(parse_rows(&[]), Err(ReadError::Empty));
    }

    #[test]
    fn test_parse_rows_missing_name_reports_sheet_row() {
        let rows = vec![row("", "12/21"), row("alice", "3/14")];
        assert_eq!(parse_rows(&rows), Err(ReadError::MissingName { row: 2 }));

        let rows = vec![row("alice", "3/14"), vec![]];
        assert_eq!(parse_rows(&rows), Err(ReadError::MissingName { row: 3 }));
    }

    #[test]
    fn test_parse_rows_bad_date_aborts_read() {
        let rows = vec![
            row("alice", "3/14"),
            row("bob", "tomorrow"),
            row("carol", "nonsense"),
        ];

        assert_eq!(
            parse_rows(&rows),
            Err(ReadError::BadDate {
                row: 3,
                raw: "tomorrow".to_string()
            })
        );
    }

    #[test]
    fn test_parse_rows_short_row_has_empty_date() {
        let rows = vec![vec!["alice".to_string()]];
        assert_eq!(
            parse_rows(&rows),
            Err(ReadError::BadDate {
                row: 2,
                raw: String::new()
            })
        );
    }

    #[test]
    fn test_sheet_id_from_url() {
        let locator =
            SheetLocator::from_url("https://docs.google.com/spreadsheets/d/ABC123/edit").unwrap();
        assert_eq!(locator.sheet_id, "ABC123");

        let locator = SheetLocator::from_url(
            "https://docs.google.com/spreadsheets/d/1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms/edit#gid=0",
        )
        .unwrap();
        assert_eq!(
            locator.sheet_id,
            "1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms"
        );
    }

    #[test]
    fn test_sheet_id_from_url_without_id_segment() {
        for url in [
            "https://docs.google.com/spreadsheets/u/0/",
            "https://docs.google.com/document/d/ABC123/edit",
            "https://docs.google.com/spreadsheets/d/ABC123",
            "ABC123",
        ] {
            assert_eq!(
                SheetLocator::from_url(url),
                Err(LocatorError::Unparseable(url.to_string()))
            );
        }
    }
}
