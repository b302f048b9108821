// Grid module
// Week rows and day cells shown by the calendar board

use chrono::NaiveDate;

use crate::models::event::DateRange;
use crate::utils::date::{add_days, days_between};

/// Number of day cells in one week row.
pub const DAYS_PER_WEEK: usize = 7;

/// One day cell. `index` is the cell's position in the grid's linear order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub row: usize,
    pub column: usize,
    pub index: usize,
}

/// Seven consecutive days starting at `week_start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRow {
    week_start: NaiveDate,
}

impl WeekRow {
    pub fn new(week_start: NaiveDate) -> Self {
        Self { week_start }
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    pub fn week_end(&self) -> NaiveDate {
        add_days(self.week_start, DAYS_PER_WEEK as i64 - 1)
    }

    pub fn span(&self) -> DateRange {
        DateRange::new(self.week_start, self.week_end()).unwrap_or(DateRange::single(self.week_start))
    }

    /// Dates of the seven cells, in column order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..DAYS_PER_WEEK as i64).map(move |offset| add_days(self.week_start, offset))
    }

    /// Column of `date` within this row, if the row covers it.
    pub fn column_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = days_between(self.week_start, date);
        (0..DAYS_PER_WEEK as i64)
            .contains(&offset)
            .then_some(offset as usize)
    }
}

/// Ordered, possibly non-contiguous, list of week rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalendarGrid {
    rows: Vec<WeekRow>,
}

impl CalendarGrid {
    /// `weeks` consecutive rows starting at `first_week_start`.
    pub fn contiguous(first_week_start: NaiveDate, weeks: usize) -> Self {
        let rows = (0..weeks)
            .map(|week| WeekRow::new(add_days(first_week_start, (week * DAYS_PER_WEEK) as i64)))
            .collect();
        Self { rows }
    }

    /// Rows from explicit week starts. Starts must be chronological and rows
    /// must not share days; gaps between rows are allowed.
    pub fn from_week_starts(week_starts: Vec<NaiveDate>) -> Result<Self, String> {
        for pair in week_starts.windows(2) {
            if days_between(pair[0], pair[1]) < DAYS_PER_WEEK as i64 {
                return Err(format!(
                    "Week starting {} overlaps or precedes week starting {}",
                    pair[1], pair[0]
                ));
            }
        }
        Ok(Self {
            rows: week_starts.into_iter().map(WeekRow::new).collect(),
        })
    }

    pub fn rows(&self) -> &[WeekRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&WeekRow> {
        self.rows.get(index)
    }

    pub fn cell_count(&self) -> usize {
        self.rows.len() * DAYS_PER_WEEK
    }

    /// Cell at a linear grid index.
    pub fn cell(&self, index: usize) -> Option<DayCell> {
        let row = index / DAYS_PER_WEEK;
        let column = index % DAYS_PER_WEEK;
        self.rows.get(row).map(|week| DayCell {
            date: add_days(week.week_start(), column as i64),
            row,
            column,
            index,
        })
    }

    /// Cell showing `date`, if any row covers it.
    pub fn cell_for_date(&self, date: NaiveDate) -> Option<DayCell> {
        self.rows.iter().enumerate().find_map(|(row, week)| {
            week.column_of(date).map(|column| DayCell {
                date,
                row,
                column,
                index: row * DAYS_PER_WEEK + column,
            })
        })
    }

    pub fn cells(&self) -> impl Iterator<Item = DayCell> + '_ {
        (0..self.cell_count()).filter_map(move |index| self.cell(index))
    }

    /// First through last visible day. Gaps between rows are included.
    pub fn visible_range(&self) -> Option<DateRange> {
        let first = self.rows.first()?;
        let last = self.rows.last()?;
        DateRange::new(first.week_start(), last.week_end()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_row_bounds() {
        let row = WeekRow::new(date(2024, 1, 1));
        assert_eq!(row.week_end(), date(2024, 1, 7));
        assert_eq!(row.dates().count(), 7);
        assert_eq!(row.column_of(date(2024, 1, 3)), Some(2));
        assert_eq!(row.column_of(date(2024, 1, 8)), None);
        assert_eq!(row.column_of(date(2023, 12, 31)), None);
    }

    #[test]
    fn test_contiguous_grid_cells_follow_dates() {
        let grid = CalendarGrid::contiguous(date(2024, 1, 1), 2);
        assert_eq!(grid.cell_count(), 14);
        let cell = grid.cell(9).unwrap();
        assert_eq!(cell.date, date(2024, 1, 10));
        assert_eq!((cell.row, cell.column), (1, 2));
        assert!(grid.cell(14).is_none());
    }

    #[test]
    fn test_cell_for_date_round_trips_index() {
        let grid = CalendarGrid::contiguous(date(2024, 1, 1), 3);
        for cell in grid.cells() {
            assert_eq!(grid.cell_for_date(cell.date), Some(cell));
        }
        assert!(grid.cell_for_date(date(2024, 2, 1)).is_none());
    }

    #[test]
    fn test_non_contiguous_rows_are_allowed() {
        let grid =
            CalendarGrid::from_week_starts(vec![date(2024, 1, 1), date(2024, 1, 15)]).unwrap();
        assert_eq!(grid.cell(7).unwrap().date, date(2024, 1, 15));
        assert!(grid.cell_for_date(date(2024, 1, 10)).is_none());
        assert_eq!(
            grid.visible_range().unwrap(),
            DateRange::new(date(2024, 1, 1), date(2024, 1, 21)).unwrap()
        );
    }

    #[test]
    fn test_overlapping_rows_are_rejected() {
        let result = CalendarGrid::from_week_starts(vec![date(2024, 1, 1), date(2024, 1, 4)]);
        assert!(result.is_err());
        let result = CalendarGrid::from_week_starts(vec![date(2024, 1, 8), date(2024, 1, 1)]);
        assert!(result.is_err());
    }
}
