// Property-based tests for the strip layout pipeline
// Random events, rows and pointer paths against the layout invariants

use chrono::NaiveDate;
use proptest::prelude::*;
use strip_calendar::models::event::DateRange;
use strip_calendar::models::grid::{CalendarGrid, WeekRow};
use strip_calendar::services::board::SelectionController;
use strip_calendar::services::layout::{
    Extent, LaneAllocator, LayoutMetrics, PlacedExtent, RowSegmenter, Segment,
};
use strip_calendar::utils::date::add_days;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn event_range() -> impl Strategy<Value = DateRange> {
    (0i64..120, 1u32..60).prop_map(|(offset, days)| {
        DateRange::from_duration(add_days(base(), offset), days).unwrap()
    })
}

fn segment() -> impl Strategy<Value = Segment> {
    (0usize..7)
        .prop_flat_map(|offset| (Just(offset), 1usize..=(7 - offset)))
        .prop_map(|(offset, count)| Segment::new(offset, count).unwrap())
}

proptest! {
    /// Property: rows covering the whole event receive every one of its days
    #[test]
    fn prop_clipping_sums_to_duration(range in event_range(), lead_weeks in 0i64..3) {
        let first = add_days(range.start(), -(7 * lead_weeks));
        let weeks = (range.duration_days() as usize + 6) / 7 + 1 + lead_weeks as usize;
        let grid = CalendarGrid::contiguous(first, weeks);

        let segments = RowSegmenter::segment(&range, grid.rows());
        let total: usize = segments.iter().map(|placed| placed.segment.day_count).sum();

        prop_assert_eq!(total as i64, range.duration_days());
        for placed in &segments {
            prop_assert!(placed.segment.day_count >= 1);
            prop_assert!(placed.segment.day_offset + placed.segment.day_count <= 7);
        }
    }

    /// Property: any single row sees at most its own seven days
    #[test]
    fn prop_clip_stays_inside_row(range in event_range(), week_offset in 0i64..30) {
        let row = WeekRow::new(add_days(base(), week_offset * 7));
        if let Some(segment) = RowSegmenter::clip(&range, &row) {
            prop_assert!(segment.day_offset + segment.day_count <= 7);
            prop_assert!(range.overlaps(&row.span()));
        } else {
            prop_assert!(!range.overlaps(&row.span()));
        }
    }

    /// Property: strips sharing a lane never overlap horizontally
    #[test]
    fn prop_lanes_never_overlap(segments in prop::collection::vec(segment(), 1..25)) {
        let metrics = LayoutMetrics::default();
        let mut placed: Vec<PlacedExtent> = Vec::new();
        for segment in segments {
            let extent = metrics.extent(segment);
            let lane = LaneAllocator::assign_lane(extent, placed.iter().copied());
            placed.push(PlacedExtent { lane, extent });
        }

        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                if a.lane == b.lane {
                    prop_assert!(!a.extent.intersects(&b.extent));
                }
            }
        }
    }

    /// Property: pairwise disjoint strips all fit in lane 0
    #[test]
    fn prop_disjoint_strips_share_lane_zero(cuts in prop::collection::btree_set(1usize..7, 0..6)) {
        let metrics = LayoutMetrics::default();
        let mut bounds: Vec<usize> = vec![0];
        bounds.extend(cuts);
        bounds.push(7);

        let mut placed: Vec<PlacedExtent> = Vec::new();
        for pair in bounds.windows(2) {
            let segment = Segment::new(pair[0], pair[1] - pair[0]).unwrap();
            let extent: Extent = metrics.extent(segment);
            let lane = LaneAllocator::assign_lane(extent, placed.iter().copied());
            prop_assert_eq!(lane, 0);
            placed.push(PlacedExtent { lane, extent });
        }
    }

    /// Property: the rendered width gives back the day count
    #[test]
    fn prop_width_round_trips_duration(days in 1usize..=7, cell_width in 20.0f32..400.0) {
        let metrics = LayoutMetrics::new(cell_width, 28.0);
        let extent = metrics.extent(Segment::new(0, days).unwrap());
        prop_assert_eq!(metrics.days_for_width(extent.width), days as u32);
    }

    /// Property: the highlight is exactly the index run between anchor and pointer
    #[test]
    fn prop_selection_is_contiguous(anchor in 0usize..42, path in prop::collection::vec(0usize..42, 1..20)) {
        let grid = CalendarGrid::contiguous(base(), 6);
        let mut selection = SelectionController::new();
        prop_assert!(selection.pointer_down(&grid, anchor, false));

        for cell in path {
            selection.pointer_enter(&grid, cell);
            let expected = anchor.min(cell)..=anchor.max(cell);
            prop_assert_eq!(selection.highlighted(), Some(expected.clone()));
            for index in 0..grid.cell_count() {
                prop_assert_eq!(selection.is_highlighted(index), expected.contains(&index));
            }
        }
    }
}
