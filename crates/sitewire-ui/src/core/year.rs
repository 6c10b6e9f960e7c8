//! Copyright year stamp.

use chrono::{DateTime, Datelike, Local, TimeZone};

/// Year text for a given instant.
#[must_use]
pub fn year_text<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    now.year().to_string()
}

/// Year text for the environment clock.
#[must_use]
pub fn current_year_text() -> String {
    year_text(&Local::now())
}
