pub mod admin_reporter;
pub mod birthday_service;

pub use admin_reporter::AdminReporter;
pub use birthday_service::{BirthdayService, NotificationOutcome, Salute};
