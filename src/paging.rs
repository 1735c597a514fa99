//! Page index arithmetic for the scrolling calendars.
//!
//! A pager is a bounded affine map between a page number and a month (or a
//! week anchor date). It holds no scroll state of its own.

use crate::calendar::{WeekdayOrdering, resolve_week_range};
use crate::date::{CalendarDate, Period};
use crate::error::{CalendarError, Result};
use crate::types::{PAGER_FIRST_YEAR, PAGER_LAST_YEAR};

/// Bounded map from page number to the value a page displays.
pub trait Pager {
    type Item: Copy + std::fmt::Display;

    fn page_count(&self) -> usize;

    fn item_at(&self, page: usize) -> Result<Self::Item>;
}

/// One page per month between two inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPager {
    start: Period,
    end: Period,
}

impl MonthPager {
    pub fn new(start: Period, end: Period) -> Result<Self> {
        if start > end {
            return Err(CalendarError::ConflictingOptions(format!(
                "Pager start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Period {
        self.start
    }

    pub fn end(&self) -> Period {
        self.end
    }

    pub fn page_count(&self) -> usize {
        (self.start.months_until(self.end) + 1) as usize
    }

    /// Page showing `period`.
    pub fn page_of(&self, period: Period) -> Result<usize> {
        if period < self.start || period > self.end {
            return Err(CalendarError::OutOfBounds {
                what: "Month",
                value: period.to_string(),
                first: self.start.to_string(),
                last: self.end.to_string(),
            });
        }
        Ok(self.start.months_until(period) as usize)
    }

    pub fn period_at(&self, page: usize) -> Result<Period> {
        let count = self.page_count();
        if page >= count {
            return Err(CalendarError::PageOutOfRange { page, count });
        }
        let offset = i32::try_from(page).map_err(|_| CalendarError::DateOutOfRange)?;
        self.start.add_months(offset)
    }
}

impl Default for MonthPager {
    fn default() -> Self {
        Self {
            start: Period::new(PAGER_FIRST_YEAR, 1).expect("default pager start is a valid month"),
            end: Period::new(PAGER_LAST_YEAR, 12).expect("default pager end is a valid month"),
        }
    }
}

/// One page per week, anchored at a selected day.
///
/// The page count is the number of whole weeks between the bounds plus one.
/// Page `p` shows the week containing `selected + (p - initial_page)` weeks,
/// so pages step in whole weeks from the selected day rather than from the
/// start bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekPager {
    start: CalendarDate,
    end: CalendarDate,
    selected: CalendarDate,
}

impl WeekPager {
    pub fn new(selected: CalendarDate, start: CalendarDate, end: CalendarDate) -> Result<Self> {
        if start > end {
            return Err(CalendarError::ConflictingOptions(format!(
                "Pager start {start} is after end {end}"
            )));
        }
        if selected < start || selected > end {
            return Err(CalendarError::OutOfBounds {
                what: "Date",
                value: selected.to_string(),
                first: start.to_string(),
                last: end.to_string(),
            });
        }
        Ok(Self {
            start,
            end,
            selected,
        })
    }

    /// Pager over the default bounds, 0000-01-01 to 9999-12-31.
    pub fn around(selected: CalendarDate) -> Result<Self> {
        let bounds = MonthPager::default();
        Self::new(
            selected,
            bounds.start().first_day(),
            bounds.end().last_day(),
        )
    }

    pub fn selected(&self) -> CalendarDate {
        self.selected
    }

    pub fn page_count(&self) -> usize {
        (self.start.weeks_until(self.end) + 1) as usize
    }

    pub fn initial_page(&self) -> usize {
        self.start.weeks_until(self.selected) as usize
    }

    /// Anchor date for `page`.
    pub fn date_at(&self, page: usize) -> Result<CalendarDate> {
        let count = self.page_count();
        if page >= count {
            return Err(CalendarError::PageOutOfRange { page, count });
        }
        self.selected
            .add_weeks(page as i64 - self.initial_page() as i64)
    }

    /// Page whose week contains `date` under `ordering`.
    pub fn page_of(&self, date: CalendarDate, ordering: &WeekdayOrdering) -> Result<usize> {
        let selected_week = resolve_week_range(self.selected, ordering).first;
        let date_week = resolve_week_range(date, ordering).first;
        let page = self.initial_page() as i64 + selected_week.weeks_until(date_week);
        let count = self.page_count();
        if page < 0 || page as usize >= count {
            return Err(CalendarError::OutOfBounds {
                what: "Date",
                value: date.to_string(),
                first: self.start.to_string(),
                last: self.end.to_string(),
            });
        }
        Ok(page as usize)
    }
}

impl Pager for MonthPager {
    type Item = Period;

    fn page_count(&self) -> usize {
        MonthPager::page_count(self)
    }

    fn item_at(&self, page: usize) -> Result<Period> {
        self.period_at(page)
    }
}

impl Pager for WeekPager {
    type Item = CalendarDate;

    fn page_count(&self) -> usize {
        WeekPager::page_count(self)
    }

    fn item_at(&self, page: usize) -> Result<CalendarDate> {
        self.date_at(page)
    }
}
