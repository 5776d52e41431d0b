use std::fmt;

/// A calendar day without a year.
///
/// Values are kept exactly as read: `2/30` is a valid `MonthDay`, it just never
/// matches a real date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.day)
    }
}

/// One person from the roster sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayRecord {
    /// Chat handle, mentioned as `@person_id`.
    pub person_id: String,
    pub date: MonthDay,
}

impl BirthdayRecord {
    #[cfg(test)]
    pub fn new(person_id: impl Into<String>, month: u32, day: u32) -> Self {
        Self {
            person_id: person_id.into(),
            date: MonthDay::new(month, day),
        }
    }

    pub fn falls_on(&self, day: MonthDay) -> bool {
        self.date == day
    }
}

/// Records in sheet row order. Duplicate people are kept.
pub type Roster = Vec<BirthdayRecord>;

/// Identifies the spreadsheet that holds the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLocator {
    pub sheet_id: String,
}

impl fmt::Display for SheetLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sheet_id)
    }
}
