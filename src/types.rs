//! Type definitions and constants shared by the engine, views and terminal output.

use chrono::{Locale, Weekday};
use clap::ValueEnum;

use crate::date::CalendarDate;

/// First day of the week as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum WeekStart {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<WeekStart> for Weekday {
    fn from(start: WeekStart) -> Self {
        match start {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Tuesday => Weekday::Tue,
            WeekStart::Wednesday => Weekday::Wed,
            WeekStart::Thursday => Weekday::Thu,
            WeekStart::Friday => Weekday::Fri,
            WeekStart::Saturday => Weekday::Sat,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

/// Column display mode for multi-page layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnsMode {
    /// Fixed number of columns.
    Fixed(u32),
    /// Auto-detect from terminal width.
    Auto,
}

/// Which calendar view the front end renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Month,
    Week,
}

/// Options every calendar view understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarConfig {
    /// First column of the grid.
    pub start_of_week: Weekday,
    /// Fill the grid with days from the adjacent periods.
    pub include_extra_days: bool,
    pub show_header: bool,
    pub show_weekday_labels: bool,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            start_of_week: Weekday::Sun,
            include_extra_days: false,
            show_header: true,
            show_weekday_labels: true,
        }
    }
}

/// Terminal rendering context.
#[derive(Clone, Debug)]
pub struct RenderContext {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// Today's date for highlighting, read once per run.
    pub today: CalendarDate,
    /// Locale for month and weekday names.
    pub locale: Locale,
    /// Width of gutter between pages in multi-page display.
    pub gutter_width: usize,
    /// Column display mode.
    pub columns: ColumnsMode,
}

pub const DAYS_PER_WEEK: usize = 7;

// Years accepted by the date constructors
pub const MIN_YEAR: i32 = -9999;
pub const MAX_YEAR: i32 = 9999;

// Default pager bounds
pub const PAGER_FIRST_YEAR: i32 = 0;
pub const PAGER_LAST_YEAR: i32 = 9999;

// Width of one rendered page: 7 cells of 2 chars plus 6 separators
pub const PAGE_WIDTH: usize = 20;
pub const GUTTER_WIDTH_REGULAR: usize = 2;

pub const COLOR_ENABLED_BY_DEFAULT: bool = true;

pub const TEST_TIME_ENV: &str = "CALGRID_TEST_TIME";

// ANSI color codes
pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_REVERSE: &str = "\x1b[7m";
pub const COLOR_DIM: &str = "\x1b[2m";
pub const COLOR_RED: &str = "\x1b[91m";
pub const COLOR_TEAL: &str = "\x1b[96m";
pub const COLOR_SAND_YELLOW: &str = "\x1b[93m";
