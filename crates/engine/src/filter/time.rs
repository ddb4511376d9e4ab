use std::{error::Error, fmt};

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeParseError {
    MissingSeparator,
    InvalidDate(String),
    Reversed,
    /// The day has no representable local start (end of the calendar).
    OutOfRange,
}

impl fmt::Display for RangeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeParseError::MissingSeparator => {
                write!(f, "expected START:END with dates as YYYY-MM-DD")
            }
            RangeParseError::InvalidDate(s) => write!(f, "`{s}` is not a YYYY-MM-DD date"),
            RangeParseError::Reversed => write!(f, "start date is after end date"),
            RangeParseError::OutOfRange => write!(f, "date out of range"),
        }
    }
}

impl Error for RangeParseError {}

/// Inclusive range of calendar days, resolved against the local time zone.
///
/// Internally the range is half-open: `[start of first day, start of the day
/// after the last day)`, so every instant of the last day is included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    first_day: NaiveDate,
    last_day: NaiveDate,
    start: DateTime<Local>,
    end_exclusive: DateTime<Local>,
}

impl TimeRange {
    /// Parse `YYYY-MM-DD:YYYY-MM-DD`.
    pub fn parse(s: &str) -> Result<Self, RangeParseError> {
        let (first, last) = s
            .split_once(':')
            .ok_or(RangeParseError::MissingSeparator)?;

        Self::from_days(parse_day(first)?, parse_day(last)?)
    }

    pub fn from_days(first_day: NaiveDate, last_day: NaiveDate) -> Result<Self, RangeParseError> {
        if first_day > last_day {
            return Err(RangeParseError::Reversed);
        }

        let day_after = last_day.succ_opt().ok_or(RangeParseError::OutOfRange)?;

        Ok(TimeRange {
            first_day,
            last_day,
            start: local_start_of_day(first_day).ok_or(RangeParseError::OutOfRange)?,
            end_exclusive: local_start_of_day(day_after).ok_or(RangeParseError::OutOfRange)?,
        })
    }

    #[inline]
    pub fn contains(&self, at: &DateTime<Local>) -> bool {
        self.start <= *at && *at < self.end_exclusive
    }

    pub fn end_exclusive(&self) -> DateTime<Local> {
        self.end_exclusive
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.first_day.format(DATE_FORMAT),
            self.last_day.format(DATE_FORMAT)
        )
    }
}

fn parse_day(s: &str) -> Result<NaiveDate, RangeParseError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| RangeParseError::InvalidDate(s.to_owned()))
}

/// First local instant of `day`.
///
/// Some zones skip midnight on DST changes; the first valid hour is used then.
fn local_start_of_day(day: NaiveDate) -> Option<DateTime<Local>> {
    (0..=23).find_map(|hour| {
        let naive = day.and_time(NaiveTime::from_hms_opt(hour, 0, 0)?);
        Local.from_local_datetime(&naive).earliest()
    })
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;
