//! Command-line argument parsing using clap.
//!
//! Positional arguments follow the `cal` convention: `[[day] month] year`.

use chrono::Weekday;
use clap::{Parser, ValueHint};
use std::io::IsTerminal;

use crate::date::{CalendarDate, Period};
use crate::error::{CalendarError, Result};
use crate::formatter::{PageWindow, get_system_locale, parse_month};
use crate::paging::MonthPager;
use crate::types::{
    COLOR_ENABLED_BY_DEFAULT, CalendarConfig, ColumnsMode, GUTTER_WIDTH_REGULAR, RenderContext,
    ViewKind, WeekStart,
};

#[derive(Parser, Debug)]
#[command(name = "calgrid")]
#[command(about = "Displays month and week calendar grids", long_about = None)]
#[command(version)]
#[command(after_help = HELP_MESSAGE)]
pub struct Args {
    /// Week starts on Sunday (default).
    #[arg(short = 's', long, help_heading = "Calendar options")]
    pub sunday: bool,

    /// Week starts on Monday.
    #[arg(short = 'm', long, help_heading = "Calendar options")]
    pub monday: bool,

    /// First day of the week.
    #[arg(
        long,
        help_heading = "Calendar options",
        value_name = "day",
        conflicts_with_all = ["sunday", "monday"]
    )]
    pub start_of_week: Option<WeekStart>,

    /// Fill the grid with days from the adjacent months.
    #[arg(short = 'e', long, help_heading = "Calendar options")]
    pub extra_days: bool,

    /// Show the week containing the selected day instead of the whole month.
    #[arg(short = 'W', long, help_heading = "Display options")]
    pub week: bool,

    /// Number of consecutive pages (months or weeks) to display.
    #[arg(
        short = 'n',
        long = "pages",
        help_heading = "Display options",
        value_name = "num"
    )]
    pub pages: Option<usize>,

    /// Center the pages on the selected one.
    #[arg(short = 'S', long = "span", help_heading = "Display options")]
    pub span: bool,

    /// Hide the month header.
    #[arg(long, help_heading = "Display options")]
    pub no_header: bool,

    /// Hide the weekday label row.
    #[arg(long, help_heading = "Display options")]
    pub no_weekday_labels: bool,

    /// First month the pager may reach (YYYY-MM).
    #[arg(long, help_heading = "Paging options", value_name = "YYYY-MM")]
    pub from: Option<String>,

    /// Last month the pager may reach (YYYY-MM).
    #[arg(long, help_heading = "Paging options", value_name = "YYYY-MM")]
    pub until: Option<String>,

    /// Day (1-31) - optional, used with month and year.
    #[arg(index = 1, default_value = None, value_name = "day", value_hint = ValueHint::Other)]
    pub day_arg: Option<String>,

    /// Month (1-12 or name) - optional, used with year.
    #[arg(index = 2, default_value = None, value_name = "month", value_hint = ValueHint::Other)]
    pub month_arg: Option<String>,

    /// Year.
    #[arg(index = 3, default_value = None, value_name = "year", value_hint = ValueHint::Other)]
    pub year_arg: Option<String>,

    /// Disable colorized output.
    #[arg(long, help_heading = "Output options")]
    pub no_color: bool,

    /// Number of pages per row (or "auto" for terminal width).
    #[arg(
        short = 'c',
        long = "columns",
        help_heading = "Output options",
        value_name = "width"
    )]
    pub columns: Option<String>,
}

/// Help message displayed with --help.
const HELP_MESSAGE: &str = "Display a month or week calendar grid.

Without any arguments, display the current month.

Examples:
  calgrid                  Display current month
  calgrid 2 2024           Display February 2024
  calgrid -e -m 2 2024     February 2024, Monday first, with adjacent days
  calgrid -W 29 2 2024     Display the week of 29 February 2024
  calgrid -n 3 -S          Three months centered on the current one
  calgrid -W -n 4          The current week and the three following";

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }

    pub fn view_kind(&self) -> ViewKind {
        if self.week {
            ViewKind::Week
        } else {
            ViewKind::Month
        }
    }

    pub fn week_start(&self) -> Weekday {
        match (self.start_of_week, self.monday) {
            (Some(start), _) => start.into(),
            (None, true) => Weekday::Mon,
            (None, false) => Weekday::Sun,
        }
    }

    pub fn calendar_config(&self) -> Result<CalendarConfig> {
        if self.sunday && self.monday {
            return Err(CalendarError::ConflictingOptions(
                "Options -s and -m are mutually exclusive".to_string(),
            ));
        }
        Ok(CalendarConfig {
            start_of_week: self.week_start(),
            include_extra_days: self.extra_days,
            show_header: !self.no_header,
            show_weekday_labels: !self.no_weekday_labels,
        })
    }

    /// A single four-digit positional argument.
    pub fn is_year_only(&self) -> bool {
        self.month_arg.is_none()
            && self
                .day_arg
                .as_deref()
                .and_then(|s| s.parse::<i32>().ok())
                .is_some_and(|n| (1000..=9999).contains(&n))
    }

    pub fn page_window(&self) -> Result<PageWindow> {
        match self.pages {
            Some(0) => Err(CalendarError::InvalidArgument(
                "Number of pages must be positive".to_string(),
            )),
            Some(count) => Ok(PageWindow {
                count,
                span: self.span,
            }),
            // A bare year shows all of its months
            None if self.is_year_only() && !self.week => Ok(PageWindow {
                count: 12,
                span: false,
            }),
            None => Ok(PageWindow {
                count: 1,
                span: self.span,
            }),
        }
    }

    /// Month pager from `--from`/`--until`, defaulting to January 0000 and
    /// December 9999.
    pub fn month_pager(&self) -> Result<MonthPager> {
        let defaults = MonthPager::default();
        let start = match &self.from {
            Some(s) => s.parse::<Period>()?,
            None => defaults.start(),
        };
        let end = match &self.until {
            Some(s) => s.parse::<Period>()?,
            None => defaults.end(),
        };
        MonthPager::new(start, end)
    }

    /// Week pager bounds: first day of the `--from` month to the last day
    /// of the `--until` month.
    pub fn week_bounds(&self) -> Result<(CalendarDate, CalendarDate)> {
        let pager = self.month_pager()?;
        Ok((pager.start().first_day(), pager.end().last_day()))
    }
}

impl RenderContext {
    pub fn new(args: &Args, today: CalendarDate) -> Result<Self> {
        let color = !args.no_color && COLOR_ENABLED_BY_DEFAULT && std::io::stdout().is_terminal();

        let columns = match args.columns.as_deref() {
            Some("auto") | None => ColumnsMode::Auto,
            Some(s) => {
                let n = s.parse::<u32>().map_err(|_| {
                    CalendarError::InvalidArgument(format!("Invalid columns value: {s}"))
                })?;
                if n == 0 {
                    return Err(CalendarError::InvalidArgument(
                        "Columns must be positive".to_string(),
                    ));
                }
                ColumnsMode::Fixed(n)
            }
        };

        Ok(RenderContext {
            color,
            today,
            locale: get_system_locale(),
            gutter_width: GUTTER_WIDTH_REGULAR,
            columns,
        })
    }
}

fn parse_year(s: &str) -> Result<i32> {
    s.parse::<i32>()
        .map_err(|_| CalendarError::InvalidArgument(format!("Invalid year: {s}")))
}

fn parse_month_arg(s: &str) -> Result<u32> {
    parse_month(s).ok_or_else(|| CalendarError::InvalidArgument(format!("Invalid month: {s}")))
}

/// Selected day from the positional arguments.
///
/// Argument patterns:
/// - none: today
/// - 1 arg: year (4 digits, January 1st) or month (1-2 digits or name, the
///   1st of that month this year)
/// - 2 args: month year (the 1st)
/// - 3 args: day month year; impossible dates are rejected
pub fn get_display_date(args: &Args, today: CalendarDate) -> Result<CalendarDate> {
    match (&args.day_arg, &args.month_arg, &args.year_arg) {
        (None, None, None) => Ok(today),
        (Some(val), None, None) => {
            if let Ok(num) = val.parse::<i32>()
                && (1000..=9999).contains(&num)
            {
                return CalendarDate::new(num, 1, 1);
            }
            let month = parse_month(val)
                .ok_or_else(|| CalendarError::InvalidArgument(val.to_string()))?;
            CalendarDate::new(today.year(), month, 1)
        }
        (Some(month), Some(year), None) => {
            CalendarDate::new(parse_year(year)?, parse_month_arg(month)?, 1)
        }
        (Some(day), Some(month), Some(year)) => {
            let day = day
                .parse::<u32>()
                .map_err(|_| CalendarError::InvalidArgument(format!("Invalid day: {day}")))?;
            CalendarDate::new(parse_year(year)?, parse_month_arg(month)?, day)
        }
        _ => Err(CalendarError::InvalidArgument(
            "Invalid argument combination".to_string(),
        )),
    }
}
