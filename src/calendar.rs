//! Calendar grid engine: weekday ordering, displayed range resolution and
//! grid layout for month and week views.
//!
//! Everything here is a pure function of its inputs. "Today" never enters
//! the engine except as an explicit argument to the day predicates.

use chrono::Weekday;
use log::trace;

use crate::date::{CalendarDate, Period};
use crate::types::DAYS_PER_WEEK;

/// The seven weekdays in display order, starting at the configured first
/// day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdayOrdering([Weekday; DAYS_PER_WEEK]);

impl WeekdayOrdering {
    pub fn new(start: Weekday) -> Self {
        let mut days = [start; DAYS_PER_WEEK];
        let mut current = start;
        for slot in days.iter_mut() {
            *slot = current;
            // Weekday::succ wraps Sunday back to Monday
            current = current.succ();
        }
        Self(days)
    }

    pub fn first(&self) -> Weekday {
        self.0[0]
    }

    pub fn last(&self) -> Weekday {
        self.0[DAYS_PER_WEEK - 1]
    }

    /// Zero-based column of `weekday` in this ordering.
    pub fn index_of(&self, weekday: Weekday) -> usize {
        let start = self.first().num_days_from_monday();
        ((weekday.num_days_from_monday() + 7 - start) % 7) as usize
    }

    pub fn days(&self) -> [Weekday; DAYS_PER_WEEK] {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.0.iter().copied()
    }
}

impl Default for WeekdayOrdering {
    fn default() -> Self {
        Self::new(Weekday::Sun)
    }
}

impl std::ops::Index<usize> for WeekdayOrdering {
    type Output = Weekday;

    fn index(&self, index: usize) -> &Weekday {
        &self.0[index]
    }
}

/// Inclusive range of dates a grid displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridRange {
    pub first: CalendarDate,
    pub last: CalendarDate,
    /// Whether the range was widened with days from the adjacent periods.
    pub includes_extra_days: bool,
}

impl GridRange {
    /// Number of days in the range; never zero.
    pub fn len(&self) -> usize {
        (self.first.days_until(self.last) + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        (self.first..=self.last).contains(&date)
    }

    /// Every date of the range, one day apart. Restartable: clone the
    /// iterator or call again.
    pub fn days(&self) -> impl Iterator<Item = CalendarDate> + Clone {
        self.first.iter_until(self.last)
    }

    /// Column the first date lands in.
    pub fn first_column(&self, ordering: &WeekdayOrdering) -> usize {
        ordering.index_of(self.first.weekday())
    }
}

/// Displayed range for a month.
///
/// Without extra days this is the month itself. With extra days the range
/// is widened backward to the start of the week containing the 1st and
/// forward to the end of the week containing the last day.
pub fn resolve_month_range(
    period: Period,
    ordering: &WeekdayOrdering,
    include_extra_days: bool,
) -> GridRange {
    let first_of_month = period.first_day();
    let last_of_month = period.last_day();

    let range = if include_extra_days {
        let leading = ordering.index_of(first_of_month.weekday());
        let trailing = DAYS_PER_WEEK - 1 - ordering.index_of(last_of_month.weekday());
        GridRange {
            first: first_of_month.shift(-(leading as i64)),
            last: last_of_month.shift(trailing as i64),
            includes_extra_days: true,
        }
    } else {
        GridRange {
            first: first_of_month,
            last: last_of_month,
            includes_extra_days: false,
        }
    };
    trace!("month {period} resolved to {}..={}", range.first, range.last);
    range
}

/// Displayed range for the week containing `anchor`: always seven days.
pub fn resolve_week_range(anchor: CalendarDate, ordering: &WeekdayOrdering) -> GridRange {
    let first = anchor.shift(-(ordering.index_of(anchor.weekday()) as i64));
    let range = GridRange {
        first,
        last: first.shift(DAYS_PER_WEEK as i64 - 1),
        includes_extra_days: true,
    };
    trace!("week of {anchor} resolved to {}..={}", range.first, range.last);
    range
}

/// One rendered day: the date plus the period the grid is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayCellDescriptor {
    pub date: CalendarDate,
    pub period: Period,
}

impl DayCellDescriptor {
    pub fn belongs_to_period(&self) -> bool {
        self.date.belongs_to(self.period)
    }

    /// Filler day from the previous or next month.
    pub fn is_extra_day(&self) -> bool {
        !self.belongs_to_period()
    }

    pub fn is_weekend(&self) -> bool {
        self.date.is_weekend()
    }

    pub fn is_today(&self, today: CalendarDate) -> bool {
        self.date.is_today(today)
    }
}

/// Cells of one calendar page and the blank cells preceding them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub range: GridRange,
    pub period: Period,
    pub ordering: WeekdayOrdering,
    pub cells: Vec<DayCellDescriptor>,
    /// Blank cells to place before the first day so it lands in its column.
    pub leading_offset: usize,
}

impl GridLayout {
    /// Total number of grid positions: blanks plus days.
    pub fn len(&self) -> usize {
        self.leading_offset + self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.cells.iter().map(|cell| cell.date)
    }

    /// Date at a grid position, counting the leading blanks. `None` for a
    /// blank or a position past the last day.
    pub fn date_at(&self, position: usize) -> Option<CalendarDate> {
        position
            .checked_sub(self.leading_offset)
            .and_then(|i| self.cells.get(i))
            .map(|cell| cell.date)
    }

    /// Grid positions split into rows of seven, blanks as `None`. The last
    /// row is padded to full width.
    pub fn rows(&self) -> Vec<Vec<Option<&DayCellDescriptor>>> {
        let mut positions: Vec<Option<&DayCellDescriptor>> = Vec::with_capacity(self.len());
        positions.extend(std::iter::repeat_n(None, self.leading_offset));
        positions.extend(self.cells.iter().map(Some));
        while positions.len() % DAYS_PER_WEEK != 0 {
            positions.push(None);
        }
        positions
            .chunks(DAYS_PER_WEEK)
            .map(|row| row.to_vec())
            .collect()
    }
}

/// Expand a resolved range into day cells owned by `period`.
///
/// The leading offset is only non-zero when extra days are excluded: a
/// widened range already starts at the first column.
pub fn build_grid(
    range: GridRange,
    ordering: &WeekdayOrdering,
    period: Period,
    include_extra_days: bool,
) -> GridLayout {
    let cells = range
        .days()
        .map(|date| DayCellDescriptor { date, period })
        .collect();
    let leading_offset = if include_extra_days {
        0
    } else {
        range.first_column(ordering)
    };
    GridLayout {
        range,
        period,
        ordering: *ordering,
        cells,
        leading_offset,
    }
}

pub fn build_month_grid(
    period: Period,
    ordering: &WeekdayOrdering,
    include_extra_days: bool,
) -> GridLayout {
    let range = resolve_month_range(period, ordering, include_extra_days);
    build_grid(range, ordering, period, include_extra_days)
}

/// Grid for the week containing `anchor`.
///
/// The range is always the full week. Without extra days the cells are
/// filtered down to the anchor's month, so a week straddling a month
/// boundary shows fewer than seven days; the offset then follows the first
/// kept day.
pub fn build_week_grid(
    anchor: CalendarDate,
    ordering: &WeekdayOrdering,
    include_extra_days: bool,
) -> GridLayout {
    let period = anchor.period();
    let range = resolve_week_range(anchor, ordering);
    let mut grid = build_grid(range, ordering, period, true);
    if !include_extra_days {
        grid.cells.retain(|cell| cell.belongs_to_period());
        grid.leading_offset = grid
            .cells
            .first()
            .map_or(0, |cell| ordering.index_of(cell.date.weekday()));
    }
    grid
}
