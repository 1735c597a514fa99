//! Terminal rendering of calendar pages with localization and color support.

use chrono::{Locale, NaiveDate, Weekday};
use log::debug;
use unicode_width::UnicodeWidthStr;

use crate::calendar::DayCellDescriptor;
use crate::date::{CalendarDate, Period};
use crate::error::{CalendarError, Result};
use crate::paging::{MonthPager, WeekPager};
use crate::render::{CellRenderer, Composition};
use crate::types::{
    COLOR_DIM, COLOR_RED, COLOR_RESET, COLOR_REVERSE, COLOR_SAND_YELLOW, COLOR_TEAL,
    CalendarConfig, ColumnsMode, DAYS_PER_WEEK, PAGE_WIDTH, RenderContext,
};
use crate::views::{PageView, ScrollCalendar};

/// Get system locale from environment (LC_ALL > LC_TIME > LANG > en_US).
pub fn get_system_locale() -> Locale {
    std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LC_TIME"))
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_else(|_| "en_US.UTF-8".to_string())
        .split('.')
        .next()
        .unwrap_or("en_US")
        .split('@')
        .next()
        .unwrap_or("en_US")
        .parse()
        .unwrap_or(Locale::en_US)
}

/// Month name in nominative case for `locale`.
pub fn get_month_name(month: u32, locale: Locale) -> String {
    // chrono's %B is genitive for Russian ("февраля")
    const RU_MONTHS: [&str; 12] = [
        "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь", "Июль", "Август", "Сентябрь",
        "Октябрь", "Ноябрь", "Декабрь",
    ];
    if matches!(locale, Locale::ru_RU)
        && let Some(name) = RU_MONTHS.get(month.wrapping_sub(1) as usize)
    {
        return (*name).to_string();
    }
    NaiveDate::from_ymd_opt(2000, month, 1)
        .map(|date| date.format_localized("%B", locale).to_string())
        .unwrap_or_default()
}

/// Get 2-character weekday abbreviation for `locale`.
pub fn get_weekday_short_name(weekday: Weekday, locale: Locale) -> String {
    // 2000-01-03 was a Monday
    NaiveDate::from_ymd_opt(2000, 1, 3 + weekday.num_days_from_monday())
        .map(|date| date.format_localized("%a", locale).to_string())
        .unwrap_or_default()
        .chars()
        .take(2)
        .collect()
}

/// Parse month from string (numeric 1-12 or English name).
pub fn parse_month(s: &str) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>()
        && (1..=12).contains(&n)
    {
        return Some(n);
    }

    const MONTH_NAMES: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    let s_lower = s.to_lowercase();
    if s_lower.len() < 3 {
        return None;
    }
    // Full names or unambiguous prefixes of at least three letters
    MONTH_NAMES
        .iter()
        .position(|name| name.starts_with(&s_lower))
        .map(|i| i as u32 + 1)
}

/// Display width ignoring ANSI escape sequences.
pub fn visible_width(text: &str) -> usize {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip the CSI sequence up to its final letter
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain.width()
}

/// Center text within a specified width, accounting for Unicode character widths.
pub fn center_text(text: &str, width: usize) -> String {
    let text_width = visible_width(text);
    if text_width >= width {
        return text.to_string();
    }
    let total_padding = width - text_width;
    let left_padding = total_padding.div_ceil(2);
    let right_padding = total_padding - left_padding;
    format!(
        "{}{}{}",
        " ".repeat(left_padding),
        text,
        " ".repeat(right_padding)
    )
}

fn paint(color: bool, code: &str, text: String) -> String {
    if color {
        format!("{code}{text}{COLOR_RESET}")
    } else {
        text
    }
}

/// Renders cells as fixed-width terminal text.
///
/// Color priority for days: today > extra day > weekend > regular.
#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    ctx: RenderContext,
}

impl TerminalRenderer {
    pub fn new(ctx: RenderContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }
}

impl CellRenderer for TerminalRenderer {
    type Output = String;

    fn day(&mut self, cell: &DayCellDescriptor) -> String {
        let day_str = format!("{:>2}", cell.date.day());
        if cell.is_today(self.ctx.today) {
            paint(self.ctx.color, COLOR_REVERSE, day_str)
        } else if cell.is_extra_day() {
            paint(self.ctx.color, COLOR_DIM, day_str)
        } else if cell.is_weekend() {
            paint(self.ctx.color, COLOR_RED, day_str)
        } else {
            day_str
        }
    }

    fn header(&mut self, period: Period) -> String {
        let header = format!(
            "{} {}",
            get_month_name(period.month(), self.ctx.locale),
            period.year()
        );
        paint(self.ctx.color, COLOR_TEAL, center_text(&header, PAGE_WIDTH))
    }

    fn weekday_label(&mut self, weekday: Weekday) -> String {
        let name = format!("{:<2}", get_weekday_short_name(weekday, self.ctx.locale));
        paint(self.ctx.color, COLOR_SAND_YELLOW, name)
    }

    fn blank(&mut self) -> String {
        "  ".to_string()
    }
}

/// Lay a composition out as lines: header, weekday labels, then rows of
/// seven cells. The last row is padded with blanks.
pub fn format_composition(composition: &Composition<String>) -> Vec<String> {
    let mut lines = Vec::with_capacity(8);

    if let Some(header) = &composition.header {
        lines.push(header.clone());
    }
    if !composition.weekday_labels.is_empty() {
        lines.push(composition.weekday_labels.join(" "));
    }
    for row in composition.cells.chunks(DAYS_PER_WEEK) {
        let mut cells: Vec<&str> = row.iter().map(String::as_str).collect();
        cells.resize(DAYS_PER_WEEK, "  ");
        lines.push(cells.join(" "));
    }

    lines
}

/// Place several pages next to each other, padding each to `PAGE_WIDTH`.
pub fn format_side_by_side(pages: &[Vec<String>], gutter_width: usize) -> Vec<String> {
    let max_height = pages.iter().map(|p| p.len()).max().unwrap_or(0);
    let mut lines = Vec::with_capacity(max_height);

    for row in 0..max_height {
        let mut line = String::new();
        for (i, page) in pages.iter().enumerate() {
            let text = page.get(row).map(String::as_str).unwrap_or("");
            line.push_str(text);
            let padding = PAGE_WIDTH.saturating_sub(visible_width(text));
            line.push_str(&" ".repeat(padding));
            if i < pages.len() - 1 {
                line.push_str(&" ".repeat(gutter_width));
            }
        }
        lines.push(line.trim_end().to_string());
    }

    lines
}

impl RenderContext {
    pub fn pages_per_row(&self) -> usize {
        match self.columns {
            ColumnsMode::Fixed(n) => n as usize,
            ColumnsMode::Auto => {
                // Clamp to 1-3 pages for readability
                let page_width = PAGE_WIDTH + self.gutter_width;
                if let Some(term_width) = get_terminal_width() {
                    (term_width / page_width).clamp(1, 3)
                } else {
                    3
                }
            }
        }
    }
}

/// Get terminal width using terminal_size crate.
fn get_terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}

/// Which pages of a scroll calendar to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Number of consecutive pages.
    pub count: usize,
    /// Center the window on the selected page instead of starting at it.
    pub span: bool,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            count: 1,
            span: false,
        }
    }
}

/// Render `window` pages of a scroll calendar, starting at (or centered on)
/// its current page, clipped to the pager bounds.
pub fn format_pages<P: PageView>(
    ctx: &RenderContext,
    calendar: &mut ScrollCalendar<P>,
    window: PageWindow,
) -> Result<Vec<String>> {
    if window.count == 0 {
        return Err(CalendarError::InvalidArgument(
            "Number of pages must be positive".to_string(),
        ));
    }
    let page_count = calendar.page_count();
    let count = window.count.min(page_count);
    let selected = calendar.current_page();
    let first = if window.span {
        selected.saturating_sub((count - 1) / 2)
    } else {
        selected
    }
    .min(page_count - count);
    debug!("rendering pages {first}..{} of {page_count}", first + count);

    let mut renderer = TerminalRenderer::new(ctx.clone());
    let mut pages = Vec::with_capacity(count);
    for page in first..first + count {
        calendar.scroll_to(page)?;
        let view = calendar.current_view();
        pages.push(format_composition(&view.render(&mut renderer)));
    }
    calendar.scroll_to(selected)?;

    let mut lines = Vec::new();
    for (i, chunk) in pages.chunks(ctx.pages_per_row().max(1)).enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(format_side_by_side(chunk, ctx.gutter_width));
    }
    Ok(lines)
}

/// Month pages starting at (or around) `selected`.
pub fn format_month_pages(
    ctx: &RenderContext,
    config: CalendarConfig,
    pager: MonthPager,
    selected: Period,
    window: PageWindow,
) -> Result<Vec<String>> {
    let mut calendar = ScrollCalendar::<MonthPager>::with_pager(selected, pager, config)?;
    calendar.set_on_page_changed(|period| debug!("month page changed to {period}"));
    format_pages(ctx, &mut calendar, window)
}

/// Week pages starting at (or around) the week of `selected`.
pub fn format_week_pages(
    ctx: &RenderContext,
    config: CalendarConfig,
    selected: CalendarDate,
    bounds: (CalendarDate, CalendarDate),
    window: PageWindow,
) -> Result<Vec<String>> {
    let pager = WeekPager::new(selected, bounds.0, bounds.1)?;
    let mut calendar = ScrollCalendar::<WeekPager>::with_pager(pager, config)?;
    calendar.set_on_page_changed(|anchor| debug!("week page changed to {anchor}"));
    format_pages(ctx, &mut calendar, window)
}
