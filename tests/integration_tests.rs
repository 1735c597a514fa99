//! Integration tests for views, scrolling calendars, terminal output and the CLI.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Locale, Weekday};

use calgrid::calendar::DayCellDescriptor;
use calgrid::date::{CalendarDate, Period};
use calgrid::error::CalendarError;
use calgrid::paging::{MonthPager, WeekPager};
use calgrid::render::CellRenderer;
use calgrid::types::{CalendarConfig, ColumnsMode, RenderContext, ViewKind};
use calgrid::views::{CalendarView, ScrollMonthCalendar, ScrollWeekCalendar};

fn date(year: i32, month: u32, day: u32) -> CalendarDate {
    CalendarDate::new(year, month, day).unwrap()
}

fn period(year: i32, month: u32) -> Period {
    Period::new(year, month).unwrap()
}

fn test_context() -> RenderContext {
    RenderContext {
        color: false,
        today: date(2024, 2, 18),
        locale: Locale::en_US,
        gutter_width: 2,
        columns: ColumnsMode::Fixed(3),
    }
}

fn monday_config() -> CalendarConfig {
    CalendarConfig {
        start_of_week: Weekday::Mon,
        ..CalendarConfig::default()
    }
}

/// Records every cell as a short tag.
#[derive(Default)]
struct Recorder;

impl CellRenderer for Recorder {
    type Output = String;

    fn day(&mut self, cell: &DayCellDescriptor) -> String {
        format!("D:{}", cell.date)
    }

    fn header(&mut self, period: Period) -> String {
        format!("H:{period}")
    }

    fn weekday_label(&mut self, weekday: Weekday) -> String {
        format!("L:{weekday}")
    }

    fn blank(&mut self) -> String {
        "B".to_string()
    }
}

// ===========================================================================
// Calendar views
// ===========================================================================

mod view_tests {
    use super::*;

    #[test]
    fn test_month_view_composition() {
        let view = CalendarView::month(period(2024, 2), CalendarConfig::default());
        assert_eq!(view.kind(), ViewKind::Month);

        let composition = view.render(&mut Recorder);
        assert_eq!(composition.header.as_deref(), Some("H:2024-02"));
        assert_eq!(composition.weekday_labels.len(), 7);
        assert_eq!(composition.weekday_labels[0], "L:Sun");
        assert_eq!(composition.weekday_labels[6], "L:Sat");
        assert_eq!(composition.cells.len(), 33);
        assert!(composition.cells[..4].iter().all(|c| c == "B"));
        assert_eq!(composition.cells[4], "D:2024-02-01");
        assert_eq!(composition.cells[32], "D:2024-02-29");
    }

    #[test]
    fn test_header_and_labels_can_be_hidden() {
        let config = CalendarConfig {
            show_header: false,
            show_weekday_labels: false,
            ..CalendarConfig::default()
        };
        let composition = CalendarView::month(period(2024, 2), config).render(&mut Recorder);
        assert_eq!(composition.header, None);
        assert!(composition.weekday_labels.is_empty());
        assert_eq!(composition.cells.len(), 33);
    }

    #[test]
    fn test_week_view_uses_anchor_month_header() {
        let view = CalendarView::week(date(2024, 2, 29), monday_config());
        assert_eq!(view.kind(), ViewKind::Week);
        assert_eq!(view.header_period(), period(2024, 2));

        let composition = view.render(&mut Recorder);
        assert_eq!(composition.weekday_labels[0], "L:Mon");
        assert_eq!(
            composition.cells,
            vec!["D:2024-02-26", "D:2024-02-27", "D:2024-02-28", "D:2024-02-29"]
        );
    }

    #[test]
    fn test_week_view_with_extra_days() {
        let config = CalendarConfig {
            include_extra_days: true,
            ..monday_config()
        };
        let view = CalendarView::week(date(2024, 2, 29), config);
        let composition = view.render(&mut Recorder);
        assert_eq!(composition.cells.len(), 7);
        assert_eq!(composition.cells[6], "D:2024-03-03");
    }

    #[test]
    fn test_click_ignores_blank_cells() {
        let clicked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&clicked);
        let mut view = CalendarView::month(period(2024, 2), CalendarConfig::default())
            .with_day_click(move |d| sink.borrow_mut().push(d));

        assert_eq!(view.click(3), None);
        assert_eq!(view.click(4), Some(date(2024, 2, 1)));
        assert_eq!(view.click(40), None);
        assert_eq!(*clicked.borrow(), vec![date(2024, 2, 1)]);
    }
}

// ===========================================================================
// Scrolling calendars
// ===========================================================================

mod scroll_tests {
    use super::*;

    #[test]
    fn test_month_calendar_opens_at_selected_period() {
        let calendar = ScrollMonthCalendar::new(period(2024, 2), CalendarConfig::default()).unwrap();
        assert_eq!(calendar.page_count(), 120_000);
        assert_eq!(calendar.current_page(), 24_289);
        assert_eq!(calendar.current(), period(2024, 2));
        assert_eq!(calendar.current_view().header_period(), period(2024, 2));
    }

    #[test]
    fn test_page_listener_fires_on_registration_and_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut calendar =
            ScrollMonthCalendar::new(period(2024, 2), CalendarConfig::default()).unwrap();
        calendar.set_on_page_changed(move |p| sink.borrow_mut().push(p));
        assert_eq!(*seen.borrow(), vec![period(2024, 2)]);

        assert_eq!(calendar.scroll_by(1).unwrap(), period(2024, 3));
        // Same page again is not a change
        calendar.scroll_to(calendar.current_page()).unwrap();
        assert_eq!(calendar.scroll_by(-3).unwrap(), period(2023, 12));

        assert_eq!(
            *seen.borrow(),
            vec![period(2024, 2), period(2024, 3), period(2023, 12)]
        );
    }

    #[test]
    fn test_scroll_past_bounds_keeps_current_page() {
        let pager = MonthPager::new(period(2024, 1), period(2024, 12)).unwrap();
        let mut calendar =
            ScrollMonthCalendar::with_pager(period(2024, 12), pager, CalendarConfig::default())
                .unwrap();
        assert_eq!(calendar.current_page(), 11);

        assert_eq!(
            calendar.scroll_by(1),
            Err(CalendarError::PageOutOfRange {
                page: 12,
                count: 12
            })
        );
        assert!(calendar.scroll_by(-12).is_err());
        assert_eq!(calendar.current_page(), 11);
        assert_eq!(calendar.current(), period(2024, 12));
    }

    #[test]
    fn test_selected_outside_pager_bounds() {
        let pager = MonthPager::new(period(2024, 1), period(2024, 12)).unwrap();
        assert!(matches!(
            ScrollMonthCalendar::with_pager(period(2025, 1), pager, CalendarConfig::default()),
            Err(CalendarError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_week_calendar_steps_whole_weeks() {
        let pager = WeekPager::new(date(2024, 2, 29), date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        let mut calendar = ScrollWeekCalendar::with_pager(pager, monday_config()).unwrap();
        assert_eq!(calendar.page_count(), 53);
        assert_eq!(calendar.current_page(), 8);
        assert_eq!(calendar.current(), date(2024, 2, 29));

        assert_eq!(calendar.scroll_by(1).unwrap(), date(2024, 3, 7));
        let view = calendar.current_view();
        assert_eq!(view.header_period(), period(2024, 3));
        assert_eq!(view.grid().range.first, date(2024, 3, 4));

        let first = calendar.page(0).unwrap();
        assert_eq!(first.grid().range.first, date(2024, 1, 1));
    }

    #[test]
    fn test_week_calendar_default_bounds() {
        let calendar = ScrollWeekCalendar::new(date(2024, 2, 29), monday_config()).unwrap();
        assert_eq!(calendar.current(), date(2024, 2, 29));
        assert!(calendar.current_page() < calendar.page_count());
    }

    #[test]
    fn test_click_on_page() {
        let clicked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&clicked);
        let mut calendar =
            ScrollMonthCalendar::new(period(2024, 2), CalendarConfig::default()).unwrap();
        calendar.set_on_day_click(move |d| sink.borrow_mut().push(d));

        let page = calendar.current_page();
        assert_eq!(calendar.click(page, 0).unwrap(), None);
        assert_eq!(calendar.click(page, 32).unwrap(), Some(date(2024, 2, 29)));
        assert!(calendar.click(120_000, 0).is_err());
        assert_eq!(*clicked.borrow(), vec![date(2024, 2, 29)]);
    }
}

// ===========================================================================
// Terminal output
// ===========================================================================

mod formatter_tests {
    use super::*;
    use calgrid::formatter::{
        PageWindow, TerminalRenderer, center_text, format_composition, format_month_pages,
        format_side_by_side, format_week_pages, visible_width,
    };

    fn month_lines(config: CalendarConfig) -> Vec<String> {
        let mut renderer = TerminalRenderer::new(test_context());
        let view = CalendarView::month(period(2024, 2), config);
        format_composition(&view.render(&mut renderer))
    }

    #[test]
    fn test_month_page_layout() {
        let lines = month_lines(CalendarConfig::default());
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "    February 2024   ");
        assert_eq!(lines[1], "Su Mo Tu We Th Fr Sa");
        assert_eq!(lines[2], format!("{} 1  2  3", " ".repeat(12)));
        assert_eq!(lines[3], " 4  5  6  7  8  9 10");
        assert_eq!(lines[6], "25 26 27 28 29      ");
    }

    #[test]
    fn test_month_page_with_extra_days() {
        let config = CalendarConfig {
            include_extra_days: true,
            ..CalendarConfig::default()
        };
        let lines = month_lines(config);
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[2], "28 29 30 31  1  2  3");
        assert_eq!(lines[6], "25 26 27 28 29  1  2");
    }

    #[test]
    fn test_monday_first_labels() {
        let lines = month_lines(monday_config());
        assert_eq!(lines[1], "Mo Tu We Th Fr Sa Su");
        assert_eq!(lines[2], format!("{} 1  2  3  4", " ".repeat(9)));
    }

    #[test]
    fn test_day_colors() {
        let ctx = RenderContext {
            color: true,
            ..test_context()
        };
        let mut renderer = TerminalRenderer::new(ctx);
        let feb = period(2024, 2);

        let today = renderer.day(&DayCellDescriptor {
            date: date(2024, 2, 18),
            period: feb,
        });
        assert_eq!(today, "\x1b[7m18\x1b[0m");

        let extra = renderer.day(&DayCellDescriptor {
            date: date(2024, 1, 28),
            period: feb,
        });
        assert_eq!(extra, "\x1b[2m28\x1b[0m");

        let weekend = renderer.day(&DayCellDescriptor {
            date: date(2024, 2, 17),
            period: feb,
        });
        assert_eq!(weekend, "\x1b[91m17\x1b[0m");

        let weekday = renderer.day(&DayCellDescriptor {
            date: date(2024, 2, 5),
            period: feb,
        });
        assert_eq!(weekday, " 5");
    }

    #[test]
    fn test_header_color() {
        let ctx = RenderContext {
            color: true,
            ..test_context()
        };
        let header = TerminalRenderer::new(ctx).header(period(2024, 2));
        assert!(header.starts_with("\x1b[96m"));
        assert!(header.ends_with("\x1b[0m"));
        assert_eq!(visible_width(&header), 20);
    }

    #[test]
    fn test_visible_width_and_centering() {
        assert_eq!(visible_width("\x1b[7m18\x1b[0m"), 2);
        assert_eq!(visible_width("Февраль"), 7);
        assert_eq!(center_text("ab", 6), "  ab  ");
        assert_eq!(center_text("abc", 6), "  abc ");
        assert_eq!(center_text("toolong", 3), "toolong");
    }

    #[test]
    fn test_side_by_side_pads_pages() {
        let pages = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string()],
        ];
        let lines = format_side_by_side(&pages, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("a{}c", " ".repeat(21)));
        assert_eq!(lines[1], "b");
    }

    #[test]
    fn test_month_pages_span_around_selected() {
        let window = PageWindow {
            count: 3,
            span: true,
        };
        let lines = format_month_pages(
            &test_context(),
            CalendarConfig::default(),
            MonthPager::default(),
            period(2024, 2),
            window,
        )
        .unwrap();
        let jan = lines[0].find("January 2024").unwrap();
        let feb = lines[0].find("February 2024").unwrap();
        let mar = lines[0].find("March 2024").unwrap();
        assert!(jan < feb && feb < mar);
        assert!(!lines.iter().any(|l| l.is_empty()));
    }

    #[test]
    fn test_month_pages_clipped_to_bounds() {
        let pager = MonthPager::new(period(2024, 1), period(2024, 12)).unwrap();
        let window = PageWindow {
            count: 3,
            span: false,
        };
        let lines = format_month_pages(
            &test_context(),
            CalendarConfig::default(),
            pager,
            period(2024, 12),
            window,
        )
        .unwrap();
        assert!(lines[0].contains("October 2024"));
        assert!(lines[0].contains("November 2024"));
        assert!(lines[0].contains("December 2024"));
    }

    #[test]
    fn test_month_pages_wrap_rows() {
        let pager = MonthPager::new(period(2024, 1), period(2024, 12)).unwrap();
        let window = PageWindow {
            count: 20,
            span: false,
        };
        let lines = format_month_pages(
            &test_context(),
            CalendarConfig::default(),
            pager,
            period(2024, 1),
            window,
        )
        .unwrap();
        assert_eq!(lines.iter().filter(|l| l.is_empty()).count(), 3);
        assert!(lines.iter().any(|l| l.contains("December 2024")));
    }

    #[test]
    fn test_zero_pages_rejected() {
        let window = PageWindow {
            count: 0,
            span: false,
        };
        let result = format_month_pages(
            &test_context(),
            CalendarConfig::default(),
            MonthPager::default(),
            period(2024, 2),
            window,
        );
        assert!(matches!(result, Err(CalendarError::InvalidArgument(_))));
    }

    #[test]
    fn test_week_page() {
        let lines = format_week_pages(
            &test_context(),
            monday_config(),
            date(2024, 2, 29),
            (date(2024, 1, 1), date(2024, 12, 31)),
            PageWindow::default(),
        )
        .unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "    February 2024");
        assert_eq!(lines[1], "Mo Tu We Th Fr Sa Su");
        assert_eq!(lines[2], "26 27 28 29");
    }

    #[test]
    fn test_following_week_pages() {
        let window = PageWindow {
            count: 2,
            span: false,
        };
        let lines = format_week_pages(
            &test_context(),
            monday_config(),
            date(2024, 2, 29),
            (date(2024, 1, 1), date(2024, 12, 31)),
            window,
        )
        .unwrap();
        assert!(lines[0].contains("February 2024"));
        assert!(lines[0].contains("March 2024"));
        assert!(lines[2].starts_with("26 27 28 29"));
        assert!(lines[2].ends_with(" 4  5  6  7  8  9 10"));
    }
}

mod parse_month_tests {
    use calgrid::formatter::parse_month;

    #[test]
    fn test_parse_month_numeric() {
        assert_eq!(parse_month("1"), Some(1));
        assert_eq!(parse_month("12"), Some(12));
        assert_eq!(parse_month("0"), None);
        assert_eq!(parse_month("13"), None);
    }

    #[test]
    fn test_parse_month_names() {
        assert_eq!(parse_month("February"), Some(2));
        assert_eq!(parse_month("jun"), Some(6));
        assert_eq!(parse_month("jul"), Some(7));
        assert_eq!(parse_month("MAR"), Some(3));
        assert_eq!(parse_month("ju"), None);
        assert_eq!(parse_month("xyz"), None);
    }
}

// ===========================================================================
// Command-line arguments
// ===========================================================================

mod args_tests {
    use super::*;
    use calgrid::args::{Args, get_display_date};
    use clap::Parser;

    const TODAY: (i32, u32, u32) = (2024, 2, 18);

    fn today() -> CalendarDate {
        date(TODAY.0, TODAY.1, TODAY.2)
    }

    fn display_date(argv: &[&str]) -> Result<CalendarDate, CalendarError> {
        let args = Args::parse_from(argv);
        get_display_date(&args, today())
    }

    #[test]
    fn test_display_date_patterns() {
        assert_eq!(display_date(&["calgrid"]).unwrap(), today());
        assert_eq!(display_date(&["calgrid", "2024"]).unwrap(), date(2024, 1, 1));
        assert_eq!(display_date(&["calgrid", "mar"]).unwrap(), date(2024, 3, 1));
        assert_eq!(display_date(&["calgrid", "2", "2023"]).unwrap(), date(2023, 2, 1));
        assert_eq!(
            display_date(&["calgrid", "29", "2", "2024"]).unwrap(),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn test_display_date_rejects_impossible_day() {
        assert_eq!(
            display_date(&["calgrid", "30", "2", "2024"]),
            Err(CalendarError::InvalidDate {
                year: 2024,
                month: 2,
                day: 30
            })
        );
        assert!(display_date(&["calgrid", "1", "13", "2024"]).is_err());
        assert!(display_date(&["calgrid", "x", "2", "2024"]).is_err());
    }

    #[test]
    fn test_calendar_config() {
        let config = Args::parse_from(["calgrid"]).calendar_config().unwrap();
        assert_eq!(config, CalendarConfig::default());

        let config = Args::parse_from(["calgrid", "-m", "-e", "--no-header"])
            .calendar_config()
            .unwrap();
        assert_eq!(config.start_of_week, Weekday::Mon);
        assert!(config.include_extra_days);
        assert!(!config.show_header);
        assert!(config.show_weekday_labels);

        let config = Args::parse_from(["calgrid", "--start-of-week", "wednesday"])
            .calendar_config()
            .unwrap();
        assert_eq!(config.start_of_week, Weekday::Wed);
    }

    #[test]
    fn test_sunday_and_monday_are_exclusive() {
        let result = Args::parse_from(["calgrid", "-s", "-m"]).calendar_config();
        assert!(matches!(result, Err(CalendarError::ConflictingOptions(_))));
    }

    #[test]
    fn test_page_window() {
        let window = Args::parse_from(["calgrid"]).page_window().unwrap();
        assert_eq!(window.count, 1);

        let window = Args::parse_from(["calgrid", "2024"]).page_window().unwrap();
        assert_eq!(window.count, 12);

        let window = Args::parse_from(["calgrid", "-W", "2024"]).page_window().unwrap();
        assert_eq!(window.count, 1);

        let window = Args::parse_from(["calgrid", "-n", "3", "-S"])
            .page_window()
            .unwrap();
        assert_eq!(window.count, 3);
        assert!(window.span);

        assert!(Args::parse_from(["calgrid", "-n", "0"]).page_window().is_err());
    }

    #[test]
    fn test_pager_bounds() {
        let args = Args::parse_from(["calgrid", "--from", "2024-01", "--until", "2024-06"]);
        let pager = args.month_pager().unwrap();
        assert_eq!(pager.page_count(), 6);
        assert_eq!(
            args.week_bounds().unwrap(),
            (date(2024, 1, 1), date(2024, 6, 30))
        );

        let args = Args::parse_from(["calgrid", "--from", "2024-01", "--until", "2023-12"]);
        assert!(args.month_pager().is_err());

        let args = Args::parse_from(["calgrid", "--from", "January"]);
        assert!(args.month_pager().is_err());
    }

    #[test]
    fn test_view_kind() {
        assert_eq!(Args::parse_from(["calgrid"]).view_kind(), ViewKind::Month);
        assert_eq!(Args::parse_from(["calgrid", "-W"]).view_kind(), ViewKind::Week);
    }

    #[test]
    fn test_render_context_columns() {
        let ctx = RenderContext::new(&Args::parse_from(["calgrid", "-c", "2"]), today()).unwrap();
        assert_eq!(ctx.columns, ColumnsMode::Fixed(2));
        assert_eq!(ctx.pages_per_row(), 2);

        assert!(RenderContext::new(&Args::parse_from(["calgrid", "-c", "0"]), today()).is_err());
        assert!(RenderContext::new(&Args::parse_from(["calgrid", "-c", "abc"]), today()).is_err());

        let ctx = RenderContext::new(&Args::parse_from(["calgrid", "--no-color"]), today()).unwrap();
        assert!(!ctx.color);
        assert_eq!(ctx.today, today());
    }
}

// ===========================================================================
// Binary
// ===========================================================================

mod cli_tests {
    use assert_cmd::Command;
    use predicates::prelude::*;

    fn calgrid() -> Command {
        let mut cmd = Command::cargo_bin("calgrid").unwrap();
        cmd.env("CALGRID_TEST_TIME", "2024-02-18")
            .env("LC_ALL", "en_US.UTF-8")
            .env_remove("RUST_LOG");
        cmd
    }

    #[test]
    fn test_current_month() {
        calgrid()
            .assert()
            .success()
            .stdout(predicate::str::contains("February 2024"))
            .stdout(predicate::str::contains("Su Mo Tu We Th Fr Sa"));
    }

    #[test]
    fn test_week_view() {
        calgrid()
            .args(["-W", "-m", "29", "2", "2024"])
            .assert()
            .success()
            .stdout(predicate::str::contains("26 27 28 29"))
            .stdout(predicate::str::contains("1  2  3").not());
    }

    #[test]
    fn test_extra_days() {
        calgrid()
            .args(["-e", "2", "2024"])
            .assert()
            .success()
            .stdout(predicate::str::contains("28 29 30 31  1  2  3"));
    }

    #[test]
    fn test_whole_year() {
        calgrid()
            .args(["-c", "3", "2024"])
            .assert()
            .success()
            .stdout(predicate::str::contains("January 2024"))
            .stdout(predicate::str::contains("December 2024"));
    }

    #[test]
    fn test_impossible_date_fails() {
        calgrid()
            .args(["30", "2", "2024"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Invalid date: 2024-02-30"));
    }

    #[test]
    fn test_zero_pages_fails() {
        calgrid()
            .args(["-n", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("must be positive"));
    }
}
