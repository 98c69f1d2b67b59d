use chrono::{NaiveDate, NaiveDateTime};

use piggy_domain::date_key;

/// Clock abstracts access to local wall-clock time so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current local timestamp.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current calendar day. Defaults to `date_key(now())`.
    fn today(&self) -> NaiveDate {
        date_key(self.now())
    }
}
