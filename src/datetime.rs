use crate::{date_part::DatePart, error::Error};
use chrono::{Datelike, NaiveDateTime};

/// Returns true if the interval `[start, end]` touches `[other_start, other_end]`, that is, if
/// `other_end >= start && other_start <= end`.
///
/// The bounds are compared exactly as given. A reversed interval (start after end) is not
/// reordered first, so it only intersects what reaches both of its bounds.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use coreext::intersects;
///
/// let day = |m, d| NaiveDate::from_ymd_opt(2020, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
///
/// assert!(intersects(day(1, 1), day(1, 10), day(1, 5), day(1, 20)));
/// assert!(!intersects(day(1, 1), day(1, 10), day(2, 1), day(2, 10)));
/// ```
pub fn intersects(
    start: NaiveDateTime,
    end: NaiveDateTime,
    other_start: NaiveDateTime,
    other_end: NaiveDateTime,
) -> bool {
    other_end >= start && other_start <= end
}

/// The signed difference from `start` to `end` in whole `part`s, like SQL's `DATEDIFF`.
///
/// [`DatePart::Year`], [`DatePart::Quarter`], and [`DatePart::Month`] count the calendar
/// boundaries crossed (so Dec 31 to Jan 1 is one year), using the proleptic Gregorian calendar.
/// The other parts divide the time elapsed between the two instants and truncate toward zero.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use coreext::{date_diff, DatePart};
///
/// let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let end = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
///
/// assert_eq!(14, date_diff(start, end, DatePart::Month));
/// assert_eq!(1, date_diff(start, end, DatePart::Year));
/// assert_eq!(-4, date_diff(end, start, DatePart::Quarter));
/// ```
pub fn date_diff(start: NaiveDateTime, end: NaiveDateTime, part: DatePart) -> i64 {
    let years = i64::from(end.year()) - i64::from(start.year());
    let elapsed = end.signed_duration_since(start);

    match part {
        DatePart::Year => years,
        DatePart::Quarter => years * 4 + i64::from(end.month0() / 3) - i64::from(start.month0() / 3),
        DatePart::Month => years * 12 + i64::from(end.month()) - i64::from(start.month()),
        DatePart::Day => elapsed.num_days(),
        DatePart::Week => elapsed.num_weeks(),
        DatePart::Hour => elapsed.num_hours(),
        DatePart::Minute => elapsed.num_minutes(),
        DatePart::Second => elapsed.num_seconds(),
        DatePart::Millisecond => elapsed.num_milliseconds(),
    }
}

/// [`date_diff`] with the date part given as a SQL-style abbreviation such as `"d"` or `"qq"`.
/// See [`DatePart::from_str`](DatePart) for the accepted spellings.
///
/// # Errors
///
/// Returns [`Error::UnknownDatePart`] naming `part` if it is not a recognized date part.
pub fn date_diff_str(start: NaiveDateTime, end: NaiveDateTime, part: &str) -> Result<i64, Error> {
    Ok(date_diff(start, end, part.parse()?))
}

/// Method-call forms of [`intersects`], [`date_diff`], and [`date_diff_str`].
///
/// ```
/// use chrono::NaiveDate;
/// use coreext::prelude::*;
///
/// let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let end = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
///
/// assert_eq!(Ok(1), start.date_diff_str(end, "d"));
/// assert_eq!(24, start.date_diff(end, DatePart::Hour));
/// assert!(start.intersects(end, end, end));
/// ```
pub trait DateTimeExt: Sized {
    /// See [`intersects`].
    fn intersects(self, end: Self, other_start: Self, other_end: Self) -> bool;

    /// See [`date_diff`].
    fn date_diff(self, end: Self, part: DatePart) -> i64;

    /// See [`date_diff_str`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDatePart`] if `part` is not recognized.
    fn date_diff_str(self, end: Self, part: &str) -> Result<i64, Error>;
}

impl DateTimeExt for NaiveDateTime {
    fn intersects(self, end: Self, other_start: Self, other_end: Self) -> bool {
        intersects(self, end, other_start, other_end)
    }

    fn date_diff(self, end: Self, part: DatePart) -> i64 {
        date_diff(self, end, part)
    }

    fn date_diff_str(self, end: Self, part: &str) -> Result<i64, Error> {
        date_diff_str(self, end, part)
    }
}
