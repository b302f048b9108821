// Test fixtures - reusable test data
// Provides the reference grid, boards and stores shared by the test files

#![allow(dead_code)]

use chrono::NaiveDate;
use strip_calendar::models::event::DateRange;
use strip_calendar::models::grid::CalendarGrid;
use strip_calendar::models::settings::{OffscreenMovePolicy, DEFAULT_CELL_WIDTH, DEFAULT_LANE_HEIGHT};
use strip_calendar::services::board::CalendarBoard;
use strip_calendar::services::layout::LayoutMetrics;
use strip_calendar::services::persistence::SqliteEventStore;
use tempfile::TempDir;

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Monday, Jan 1 2024: first day of the reference week row
    pub fn jan_1_2024() -> NaiveDate {
        ymd(2024, 1, 1)
    }

    pub fn jan(day: u32) -> NaiveDate {
        ymd(2024, 1, day)
    }

    pub fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange::new(start, end).unwrap()
    }
}

/// Boards laid out with the reference cell width and lane height
pub mod boards {
    use super::*;

    pub fn reference_metrics() -> LayoutMetrics {
        LayoutMetrics::new(DEFAULT_CELL_WIDTH, DEFAULT_LANE_HEIGHT)
    }

    /// `weeks` contiguous rows starting Monday Jan 1 2024
    pub fn reference_board(weeks: usize) -> CalendarBoard {
        board_with_policy(weeks, OffscreenMovePolicy::Allow)
    }

    pub fn board_with_policy(weeks: usize, policy: OffscreenMovePolicy) -> CalendarBoard {
        CalendarBoard::new(
            CalendarGrid::contiguous(dates::jan_1_2024(), weeks),
            reference_metrics(),
            policy,
        )
    }
}

/// SQLite stores backed by temporary files
pub mod stores {
    use super::*;

    /// Keep the `TempDir` alive for as long as the store is used.
    pub fn temp_store() -> (TempDir, SqliteEventStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = reopen(&dir);
        (dir, store)
    }

    pub fn reopen(dir: &TempDir) -> SqliteEventStore {
        let path = dir.path().join("events.db");
        SqliteEventStore::open(path.to_str().unwrap()).unwrap()
    }
}
