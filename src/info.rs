use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{Error, Result};
use crate::timetable::models::Day;

/// When the sessions happen in the calendar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Term {
    /// First day of classes
    pub first_day: NaiveDate,
    /// Number of weeks of classes
    pub weeks: u32,
}

impl Term {
    /// First date on or after the start of the term falling on `day`
    pub fn first_occurrence(&self, day: Day) -> NaiveDate {
        let wanted = day.weekday().num_days_from_monday();
        let start = self.first_day.weekday().num_days_from_monday();

        self.first_day + Duration::days(i64::from((wanted + 7 - start) % 7))
    }
}

/// Read a date written `2026-08-03` or `03/08/2026`
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    let date = date.trim();

    ["%Y-%m-%d", "%d/%m/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date, format).ok())
        .ok_or_else(|| Error::InvalidDate(date.to_owned()))
}

/// Monday following `today`, or `today` if it is a monday
pub fn next_monday(today: NaiveDate) -> NaiveDate {
    Term {
        first_day: today,
        weeks: 0,
    }
    .first_occurrence(Day::Monday)
}
