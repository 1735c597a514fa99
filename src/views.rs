//! Month and week calendar views and their paged variants.
//!
//! A view resolves its grid once at construction and hands it to any
//! [`CellRenderer`]. Paged views map page numbers to periods (or week
//! anchors) through a [`Pager`] and build one view per requested page.

use std::fmt;

use log::debug;

use crate::calendar::{GridLayout, WeekdayOrdering, build_month_grid, build_week_grid};
use crate::date::{CalendarDate, Period};
use crate::error::{CalendarError, Result};
use crate::paging::{MonthPager, Pager, WeekPager};
use crate::render::{CellRenderer, Composition, compose};
use crate::types::{CalendarConfig, ViewKind};

pub type DayClickHandler = Box<dyn FnMut(CalendarDate)>;

/// One calendar page: a month, or the week around an anchor date.
pub struct CalendarView {
    kind: ViewKind,
    header: Period,
    config: CalendarConfig,
    grid: GridLayout,
    on_day_click: Option<DayClickHandler>,
}

impl CalendarView {
    pub fn month(period: Period, config: CalendarConfig) -> Self {
        let ordering = WeekdayOrdering::new(config.start_of_week);
        let grid = build_month_grid(period, &ordering, config.include_extra_days);
        debug!(
            "month view {period}: {} cells, offset {}",
            grid.cells.len(),
            grid.leading_offset
        );
        Self {
            kind: ViewKind::Month,
            header: period,
            config,
            grid,
            on_day_click: None,
        }
    }

    /// Week containing `anchor`; the header shows the anchor's month.
    pub fn week(anchor: CalendarDate, config: CalendarConfig) -> Self {
        let ordering = WeekdayOrdering::new(config.start_of_week);
        let grid = build_week_grid(anchor, &ordering, config.include_extra_days);
        debug!(
            "week view {anchor}: {} cells, offset {}",
            grid.cells.len(),
            grid.leading_offset
        );
        Self {
            kind: ViewKind::Week,
            header: anchor.period(),
            config,
            grid,
            on_day_click: None,
        }
    }

    pub fn with_day_click(mut self, handler: impl FnMut(CalendarDate) + 'static) -> Self {
        self.on_day_click = Some(Box::new(handler));
        self
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn header_period(&self) -> Period {
        self.header
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridLayout {
        &self.grid
    }

    pub fn render<R: CellRenderer>(&self, renderer: &mut R) -> Composition<R::Output> {
        compose(&self.grid, self.header, &self.config, renderer)
    }

    /// Click on a grid position (leading blanks included). Blank positions
    /// are ignored; a day fires the click handler and is returned.
    pub fn click(&mut self, position: usize) -> Option<CalendarDate> {
        let date = self.grid.date_at(position)?;
        if let Some(handler) = self.on_day_click.as_mut() {
            handler(date);
        }
        Some(date)
    }
}

impl fmt::Debug for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarView")
            .field("kind", &self.kind)
            .field("header", &self.header)
            .field("config", &self.config)
            .field("grid", &self.grid)
            .finish_non_exhaustive()
    }
}

/// How a pager's item becomes a calendar page.
pub trait PageView: Pager {
    fn view(item: Self::Item, config: CalendarConfig) -> CalendarView;
}

impl PageView for MonthPager {
    fn view(period: Period, config: CalendarConfig) -> CalendarView {
        CalendarView::month(period, config)
    }
}

impl PageView for WeekPager {
    fn view(anchor: CalendarDate, config: CalendarConfig) -> CalendarView {
        CalendarView::week(anchor, config)
    }
}

/// Horizontally paged calendar. Tracks the current page and reports page
/// changes to an optional listener.
pub struct ScrollCalendar<P: PageView> {
    pager: P,
    config: CalendarConfig,
    current_page: usize,
    current: P::Item,
    on_page_changed: Option<Box<dyn FnMut(P::Item)>>,
    on_day_click: Option<DayClickHandler>,
}

pub type ScrollMonthCalendar = ScrollCalendar<MonthPager>;
pub type ScrollWeekCalendar = ScrollCalendar<WeekPager>;

impl ScrollCalendar<MonthPager> {
    /// Month pager over the default bounds, opened at `selected`.
    pub fn new(selected: Period, config: CalendarConfig) -> Result<Self> {
        Self::with_pager(selected, MonthPager::default(), config)
    }

    pub fn with_pager(selected: Period, pager: MonthPager, config: CalendarConfig) -> Result<Self> {
        let page = pager.page_of(selected)?;
        Ok(Self::open(pager, page, selected, config))
    }
}

impl ScrollCalendar<WeekPager> {
    /// Week pager over the default bounds, opened at the week of `selected`.
    pub fn new(selected: CalendarDate, config: CalendarConfig) -> Result<Self> {
        Self::with_pager(WeekPager::around(selected)?, config)
    }

    pub fn with_pager(pager: WeekPager, config: CalendarConfig) -> Result<Self> {
        let page = pager.initial_page();
        Ok(Self::open(pager, page, pager.selected(), config))
    }
}

impl<P: PageView> ScrollCalendar<P> {
    fn open(pager: P, page: usize, current: P::Item, config: CalendarConfig) -> Self {
        Self {
            pager,
            config,
            current_page: page,
            current,
            on_page_changed: None,
            on_day_click: None,
        }
    }

    /// Register the page-changed listener. It is called right away with the
    /// current page's value, then on every page change.
    pub fn set_on_page_changed(&mut self, mut listener: impl FnMut(P::Item) + 'static) {
        listener(self.current);
        self.on_page_changed = Some(Box::new(listener));
    }

    pub fn set_on_day_click(&mut self, handler: impl FnMut(CalendarDate) + 'static) {
        self.on_day_click = Some(Box::new(handler));
    }

    pub fn pager(&self) -> &P {
        &self.pager
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn page_count(&self) -> usize {
        self.pager.page_count()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Period or anchor date of the current page.
    pub fn current(&self) -> P::Item {
        self.current
    }

    pub fn scroll_to(&mut self, page: usize) -> Result<P::Item> {
        let item = self.pager.item_at(page)?;
        if page != self.current_page {
            debug!("page {} -> {page} ({item})", self.current_page);
            self.current_page = page;
            self.current = item;
            if let Some(listener) = self.on_page_changed.as_mut() {
                listener(item);
            }
        }
        Ok(item)
    }

    /// Move by `delta` pages; negative moves backward.
    pub fn scroll_by(&mut self, delta: isize) -> Result<P::Item> {
        let page = self.current_page.checked_add_signed(delta).ok_or(
            CalendarError::PageOutOfRange {
                page: self.current_page,
                count: self.page_count(),
            },
        )?;
        self.scroll_to(page)
    }

    pub fn page(&self, page: usize) -> Result<CalendarView> {
        let item = self.pager.item_at(page)?;
        Ok(P::view(item, self.config))
    }

    pub fn current_view(&self) -> CalendarView {
        P::view(self.current, self.config)
    }

    /// Click a grid position on `page`; see [`CalendarView::click`].
    pub fn click(&mut self, page: usize, position: usize) -> Result<Option<CalendarDate>> {
        let date = self.page(page)?.grid().date_at(position);
        if let (Some(date), Some(handler)) = (date, self.on_day_click.as_mut()) {
            handler(date);
        }
        Ok(date)
    }
}
