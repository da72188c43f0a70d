use chrono::{DateTime, Datelike, Local, TimeZone};

/// `NaiveDate::num_days_from_ce()` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Day number of the calendar date `dt` falls on in its own timezone,
/// counted from 1970-01-01. Two instants share a number iff they share a
/// local calendar day.
pub fn date_number<Tz: TimeZone>(dt: &DateTime<Tz>) -> i64 {
    dt.date_naive().num_days_from_ce() as i64 - UNIX_EPOCH_DAYS_FROM_CE
}

/// Day number of the current local date.
pub fn today_number() -> i64 {
    date_number(&Local::now())
}

/// Half-open `[from, to)` range of day numbers covering the day before `today`.
pub fn previous_day_window(today: i64) -> (i64, i64) {
    (today - 1, today)
}
