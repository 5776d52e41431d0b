pub mod roster_models;
pub mod roster_parser;
pub mod roster_service;

pub use roster_models::{BirthdayRecord, MonthDay, Roster, SheetLocator};
pub use roster_parser::{LocatorError, ReadError};
pub use roster_service::{RosterReader, RosterSource};
