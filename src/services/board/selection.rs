//! Drag-to-select over day cells.
//!
//! The controller works on linear grid indices: "between" means between two
//! positions in the grid's cell order, not between two dates.

use std::ops::RangeInclusive;

use chrono::NaiveDate;

use crate::models::event::DateRange;
use crate::models::grid::CalendarGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Selecting { anchor: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    state: SelectionState,
    highlighted: Option<(usize, usize)>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.state, SelectionState::Selecting { .. })
    }

    /// Start a selection at `cell`. Presses that land on a strip or outside
    /// the grid do not start one.
    pub fn pointer_down(&mut self, grid: &CalendarGrid, cell: usize, on_strip: bool) -> bool {
        if on_strip || grid.cell(cell).is_none() {
            return false;
        }
        self.clear();
        self.state = SelectionState::Selecting { anchor: cell };
        self.highlighted = Some((cell, cell));
        true
    }

    /// Extend the selection to the run between the anchor and `cell`.
    pub fn pointer_enter(&mut self, grid: &CalendarGrid, cell: usize) -> bool {
        let SelectionState::Selecting { anchor } = self.state else {
            return false;
        };
        if grid.cell(cell).is_none() {
            return false;
        }
        let run = (anchor.min(cell), anchor.max(cell));
        let changed = self.highlighted != Some(run);
        self.highlighted = Some(run);
        changed
    }

    /// Finish the gesture. Returns the date range to create an event for, or
    /// `None` when nothing was being selected. The highlight stays until
    /// [`clear`](Self::clear) so it remains visible while the title is asked
    /// for and the event is saved.
    pub fn pointer_up(&mut self, grid: &CalendarGrid) -> Option<DateRange> {
        if !self.is_selecting() {
            return None;
        }
        self.state = SelectionState::Idle;
        self.selected_range(grid)
    }

    /// Dates covered by the current highlight.
    pub fn selected_range(&self, grid: &CalendarGrid) -> Option<DateRange> {
        let dates = self.highlighted_dates(grid);
        let start = dates.iter().min()?;
        let end = dates.iter().max()?;
        DateRange::new(*start, *end).ok()
    }

    pub fn clear(&mut self) {
        self.state = SelectionState::Idle;
        self.highlighted = None;
    }

    /// Drop the highlight of a finished selection covering `range`. A
    /// selection still in progress, or one for other dates, is left alone.
    pub fn release(&mut self, grid: &CalendarGrid, range: DateRange) -> bool {
        if self.is_selecting() || self.selected_range(grid) != Some(range) {
            return false;
        }
        self.highlighted = None;
        true
    }

    pub fn highlighted(&self) -> Option<RangeInclusive<usize>> {
        self.highlighted.map(|(from, to)| from..=to)
    }

    pub fn is_highlighted(&self, cell: usize) -> bool {
        self.highlighted
            .map(|(from, to)| from <= cell && cell <= to)
            .unwrap_or(false)
    }

    pub fn highlighted_dates(&self, grid: &CalendarGrid) -> Vec<NaiveDate> {
        self.highlighted()
            .into_iter()
            .flatten()
            .filter_map(|index| grid.cell(index).map(|cell| cell.date))
            .collect()
    }
}
