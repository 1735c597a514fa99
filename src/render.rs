//! Rendering seam between the grid engine and whatever draws the cells.

use chrono::Weekday;

use crate::calendar::{DayCellDescriptor, GridLayout};
use crate::date::Period;
use crate::types::CalendarConfig;

/// Draws the three kinds of calendar cell. Implementations that need
/// "today" take it at construction.
pub trait CellRenderer {
    type Output;

    fn day(&mut self, cell: &DayCellDescriptor) -> Self::Output;

    fn header(&mut self, period: Period) -> Self::Output;

    fn weekday_label(&mut self, weekday: Weekday) -> Self::Output;

    /// Empty cell before the first day.
    fn blank(&mut self) -> Self::Output;
}

/// Rendered pieces of one calendar page, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition<T> {
    pub header: Option<T>,
    pub weekday_labels: Vec<T>,
    /// Leading blanks followed by the day cells, seven per row.
    pub cells: Vec<T>,
}

/// Run `renderer` over a grid, honoring the header and weekday-label
/// switches of `config`.
pub fn compose<R: CellRenderer>(
    grid: &GridLayout,
    header_period: Period,
    config: &CalendarConfig,
    renderer: &mut R,
) -> Composition<R::Output> {
    let header = config
        .show_header
        .then(|| renderer.header(header_period));

    let weekday_labels = if config.show_weekday_labels {
        grid.ordering
            .iter()
            .map(|weekday| renderer.weekday_label(weekday))
            .collect()
    } else {
        Vec::new()
    };

    let mut cells = Vec::with_capacity(grid.len());
    for _ in 0..grid.leading_offset {
        cells.push(renderer.blank());
    }
    for cell in &grid.cells {
        cells.push(renderer.day(cell));
    }

    Composition {
        header,
        weekday_labels,
        cells,
    }
}
