//! Calendar date and month-period value types built on chrono.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::error::{CalendarError, Result};
use crate::types::{MAX_YEAR, MIN_YEAR};

/// An immutable calendar day.
///
/// Construction and the public arithmetic reject anything outside
/// `MIN_YEAR..=MAX_YEAR`; grid ranges computed from an in-window date may
/// spill a few days past the window edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date, failing on impossible days such as February 30.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        check_year(year)?;
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(CalendarError::InvalidDate { year, month, day })
    }

    pub fn from_naive(date: NaiveDate) -> Result<Self> {
        check_year(date.year())?;
        Ok(Self(date))
    }

    pub(crate) fn from_naive_unchecked(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    pub fn add_days(self, days: i64) -> Result<Self> {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        shifted
            .ok_or(CalendarError::DateOutOfRange)
            .and_then(Self::from_naive)
    }

    pub fn sub_days(self, days: i64) -> Result<Self> {
        self.add_days(days.checked_neg().ok_or(CalendarError::DateOutOfRange)?)
    }

    pub fn add_weeks(self, weeks: i64) -> Result<Self> {
        self.add_days(weeks.checked_mul(7).ok_or(CalendarError::DateOutOfRange)?)
    }

    /// Shift by whole months; the day is clamped to the target month's length
    /// (January 31 + 1 month = February 28/29).
    pub fn add_months(self, months: i32) -> Result<Self> {
        let shifted = if months >= 0 {
            self.0.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted
            .ok_or(CalendarError::DateOutOfRange)
            .and_then(Self::from_naive)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(self, other: Self) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// Whole weeks from `self` to `other`, truncated toward zero.
    pub fn weeks_until(self, other: Self) -> i64 {
        self.days_until(other) / 7
    }

    pub fn period(self) -> Period {
        Period {
            first: Self(self.0.with_day(1).unwrap_or(self.0)),
        }
    }

    pub fn belongs_to(self, period: Period) -> bool {
        self.year() == period.year() && self.month() == period.month()
    }

    pub fn is_weekend(self) -> bool {
        is_weekend(self.weekday())
    }

    pub fn is_today(self, today: CalendarDate) -> bool {
        self == today
    }

    /// Day shift used by the range resolver. The shifts it asks for are at
    /// most one week, which chrono can always represent for in-window years.
    pub(crate) fn shift(self, days: i64) -> Self {
        Self(
            self.0
                .checked_add_signed(chrono::TimeDelta::days(days))
                .expect("grid shift stays inside chrono's date range"),
        )
    }

    /// Iterate every day from `self` to `last` inclusive.
    pub fn iter_until(self, last: Self) -> impl Iterator<Item = CalendarDate> + Clone {
        self.0
            .iter_days()
            .take_while(move |d| *d <= last.0)
            .map(CalendarDate)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

/// Parses `YYYY-MM-DD`.
impl FromStr for CalendarDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CalendarError::InvalidArgument(format!("expected YYYY-MM-DD, got {s}"));
        let mut parts = s.trim().splitn(3, '-');
        let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        let year = y.parse::<i32>().map_err(|_| invalid())?;
        let month = m.parse::<u32>().map_err(|_| invalid())?;
        let day = d.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month, day)
    }
}

/// A calendar month, independent of any day within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    first: CalendarDate,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        Ok(Self {
            first: CalendarDate::new(year, month, 1)?,
        })
    }

    pub fn from_date(date: CalendarDate) -> Self {
        date.period()
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> u32 {
        self.first.month()
    }

    pub fn first_day(self) -> CalendarDate {
        self.first
    }

    /// Day before the first of the next month.
    pub fn last_day(self) -> CalendarDate {
        let next = self
            .first
            .0
            .checked_add_months(Months::new(1))
            .expect("in-window month has a successor");
        CalendarDate(next).shift(-1)
    }

    pub fn add_months(self, months: i32) -> Result<Self> {
        Ok(Self {
            first: self.first.add_months(months)?,
        })
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(self, other: Self) -> i64 {
        (i64::from(other.year()) - i64::from(self.year())) * 12 + i64::from(other.month())
            - i64::from(self.month())
    }

    pub fn contains(self, date: CalendarDate) -> bool {
        date.belongs_to(self)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Parses `YYYY-MM`.
impl FromStr for Period {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CalendarError::InvalidArgument(format!("expected YYYY-MM, got {s}"));
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = y.parse::<i32>().map_err(|_| invalid())?;
        let month = m.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

pub fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

fn check_year(year: i32) -> Result<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CalendarError::DateOutOfRange)
    }
}
