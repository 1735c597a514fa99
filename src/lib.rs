//! Calendar grid engine with month, week and paged views.
//!
//! Features:
//! - Weekday ordering from any first day of the week
//! - Displayed-range resolution for months and weeks, with optional
//!   extra days from the adjacent periods
//! - Grid layout with leading blank cells for column alignment
//! - Pluggable cell rendering and page-index arithmetic for scrolling views

pub mod args;
pub mod calendar;
pub mod clock;
pub mod date;
pub mod error;
pub mod formatter;
pub mod paging;
pub mod render;
pub mod types;
pub mod views;

pub use calendar::{
    DayCellDescriptor, GridLayout, GridRange, WeekdayOrdering, build_grid, build_month_grid,
    build_week_grid, resolve_month_range, resolve_week_range,
};
pub use date::{CalendarDate, Period};
pub use error::CalendarError;
