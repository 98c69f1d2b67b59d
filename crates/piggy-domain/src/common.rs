//! Shared traits, calendar helpers, and enums for the budgeting primitives.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Calendar day used as the key of every day-indexed map in the documents.
pub type DateKey = NaiveDate;

/// Exposes a stable identifier for entities stored in the documents.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Removes and returns the entry with the given id, keeping the order of the rest.
pub fn remove_by_id<T: Identifiable>(items: &mut Vec<T>, id: Uuid) -> Option<T> {
    let index = items.iter().position(|item| item.id() == id)?;
    Some(items.remove(index))
}

/// Sums the amounts of any slice of [`Amounted`] entries.
pub fn total_amount<T: Amounted>(items: &[T]) -> f64 {
    items
        .iter()
        .map(Amounted::amount)
        .fold(0.0, |acc, amount| acc + amount)
}

/// Truncates a wall-clock timestamp to its calendar day.
///
/// Every read and write of a day-keyed map goes through this helper so keys
/// never carry a time-of-day component.
pub fn date_key(at: NaiveDateTime) -> DateKey {
    at.date()
}

/// Returns midnight of the given day.
pub fn start_of_day(day: DateKey) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

/// Returns the first day of the week containing `day`, for weeks beginning on `first_weekday`.
pub fn week_start(day: NaiveDate, first_weekday: Weekday) -> NaiveDate {
    let offset =
        (7 + day.weekday().num_days_from_monday() - first_weekday.num_days_from_monday()) % 7;
    day - Duration::days(offset as i64)
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
/// Enumerates the budgeting cadences tracked by the ledger.
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Day, Period::Week, Period::Month];

    /// Parses user-supplied period labels such as `day`, `weekly` or `m`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "d" | "day" | "daily" => Some(Period::Day),
            "w" | "week" | "weekly" => Some(Period::Week),
            "m" | "month" | "monthly" => Some(Period::Month),
            _ => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Period::Day => "Day",
            Period::Week => "Week",
            Period::Month => "Month",
        };
        f.write_str(label)
    }
}

/// When (and whether) the daily summary notification is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarySchedule {
    pub enabled: bool,
    pub time: NaiveTime,
}

impl SummarySchedule {
    /// The instant at which the summary for `day` becomes due.
    pub fn due_at(&self, day: DateKey) -> NaiveDateTime {
        day.and_time(self.time)
    }
}

impl Default for SummarySchedule {
    fn default() -> Self {
        Self {
            enabled: true,
            time: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}
