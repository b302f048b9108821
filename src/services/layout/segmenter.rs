//! Clips an event's date range to the week rows of the grid.

use crate::models::event::DateRange;
use crate::models::grid::WeekRow;
use crate::utils::date::days_between;

use super::Segment;

/// A clipped segment together with the index of the row it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSegment {
    pub row: usize,
    pub segment: Segment,
}

pub struct RowSegmenter;

impl RowSegmenter {
    /// One segment per row the range overlaps, in row order. Rows the range
    /// misses produce nothing.
    pub fn segment(range: &DateRange, rows: &[WeekRow]) -> Vec<RowSegment> {
        rows.iter()
            .enumerate()
            .filter_map(|(row, week)| {
                Self::clip(range, week).map(|segment| RowSegment { row, segment })
            })
            .collect()
    }

    /// Segment of `range` inside a single week row.
    pub fn clip(range: &DateRange, week: &WeekRow) -> Option<Segment> {
        let week_start = week.week_start();
        let week_end = week.week_end();
        if range.end() < week_start || range.start() > week_end {
            return None;
        }

        let actual_start = range.start().max(week_start);
        let actual_end = range.end().min(week_end);
        let day_offset = days_between(week_start, actual_start);
        let day_count = days_between(actual_start, actual_end) + 1;

        Segment::new(day_offset as usize, day_count as usize)
    }

    /// Total days of `range` that land on visible rows.
    pub fn visible_days(range: &DateRange, rows: &[WeekRow]) -> usize {
        Self::segment(range, rows)
            .iter()
            .map(|placed| placed.segment.day_count)
            .sum()
    }
}
