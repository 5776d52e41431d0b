// Daily matching and notification.
//
// Given today's date and the roster, decide who to congratulate, post the salute
// to the team channel and keep the admin channel informed. Pure business logic:
// the date comes in as a parameter and the chat destinations are `Notifier`s.

use tracing::info;

use super::admin_reporter::AdminReporter;
use crate::core::notify::{NotificationMessage, Notifier, SendError};
use crate::core::roster::{BirthdayRecord, MonthDay, Roster};

/// Text placed around the mention list in the team message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Salute {
    pub prefix: String,
    pub suffix: String,
}

impl Salute {
    pub fn render(&self, mentions: &str) -> String {
        format!("{} {} {}", self.prefix, mentions, self.suffix)
    }
}

/// What a daily run ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    NoBirthdays,
    Celebrated { people: Vec<String> },
}

/// Records whose birthday is `today`, in roster order.
pub fn birthdays_on(roster: &Roster, today: MonthDay) -> Vec<&BirthdayRecord> {
    roster.iter().filter(|record| record.falls_on(today)).collect()
}

/// Formats people as chat mentions.
///
/// `@a`, `@a and @b`, `@a, @b, and @c`. Returns `None` for an empty list.
pub fn format_mentions(people: &[String]) -> Option<String> {
    let mentions: Vec<String> = people.iter().map(|p| format!("@{p}")).collect();

    match mentions.as_slice() {
        [] => None,
        [only] => Some(only.clone()),
        [first, second] => Some(format!("{first} and {second}")),
        [init @ .., last] => Some(format!("{}, and {}", init.join(", "), last)),
    }
}

pub struct BirthdayService<N: Notifier> {
    primary: N,
    admin: AdminReporter<N>,
    salute: Salute,
    /// Where the roster came from, quoted in admin reports.
    source: String,
}

impl<N: Notifier> BirthdayService<N> {
    pub fn new(primary: N, admin: AdminReporter<N>, salute: Salute, source: impl Into<String>) -> Self {
        Self {
            primary,
            admin,
            salute,
            source: source.into(),
        }
    }

    pub fn admin(&self) -> &AdminReporter<N> {
        &self.admin
    }

    /// Congratulates everyone whose birthday is `today`.
    ///
    /// The admin channel hears about the run first; only a failure to reach the
    /// team channel is an error.
    pub async fn run(
        &self,
        roster: &Roster,
        today: MonthDay,
    ) -> Result<NotificationOutcome, SendError> {
        let people: Vec<String> = birthdays_on(roster, today)
            .into_iter()
            .map(|record| {
                info!(person = %record.person_id, "It is their birthday today");
                record.person_id.clone()
            })
            .collect();

        let Some(mentions) = format_mentions(&people) else {
            info!(%today, "Today is no one's birthday");
            self.admin
                .report_info(
                    "Today is no one's birthday",
                    &format!("No birthdays found on the spreadsheet ({})", self.source),
                )
                .await;
            return Ok(NotificationOutcome::NoBirthdays);
        };

        self.admin
            .report_info(
                &format!("Saying happy birthday to {mentions}"),
                &format!(
                    "{} bdays were found in the spreadsheet ({})",
                    people.len(),
                    self.source
                ),
            )
            .await;

        info!(%mentions, "Sending salute to the team channel");
        self.primary
            .send(&NotificationMessage::text(self.salute.render(&mentions)))
            .await?;

        Ok(NotificationOutcome::Celebrated { people })
    }
}
