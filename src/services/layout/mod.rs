//! Strip layout engine.
//!
//! Turns an event's date range into positioned strips: [`segmenter`] clips the
//! range to week rows, [`lanes`] stacks strips that share a row, and
//! [`renderer`] owns the resulting visual handles per row.

use serde::{Deserialize, Serialize};

use crate::models::event::EventId;
use crate::models::grid::DAYS_PER_WEEK;
use crate::models::settings::Settings;

pub mod lanes;
pub mod renderer;
pub mod segmenter;

pub use lanes::{LaneAllocator, PlacedExtent};
pub use renderer::{RowOverlay, StripHandle, StripRenderer};
pub use segmenter::{RowSegment, RowSegmenter};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("event {event_id} already has a strip in row {row}")]
    DuplicateStrip { event_id: EventId, row: usize },
}

/// Portion of an event inside one week row, in whole days.
///
/// Invariant: `day_offset + day_count <= 7` and `day_count >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub day_offset: usize,
    pub day_count: usize,
}

impl Segment {
    pub fn new(day_offset: usize, day_count: usize) -> Option<Self> {
        (day_count >= 1 && day_offset + day_count <= DAYS_PER_WEEK).then_some(Self {
            day_offset,
            day_count,
        })
    }
}

/// Horizontal pixel span, treated as the half-open interval `[left, left + width)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub left: f32,
    pub width: f32,
}

impl Extent {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Touching edges do not count as an intersection.
    pub fn intersects(&self, other: &Extent) -> bool {
        !(self.right() <= other.left || self.left >= other.right())
    }
}

/// Fixed pixel constants of the grid layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub cell_width: f32,
    pub lane_height: f32,
}

impl LayoutMetrics {
    pub fn new(cell_width: f32, lane_height: f32) -> Self {
        Self {
            cell_width,
            lane_height,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.cell_width, settings.lane_height)
    }

    pub fn extent(&self, segment: Segment) -> Extent {
        Extent {
            left: segment.day_offset as f32 * self.cell_width,
            width: segment.day_count as f32 * self.cell_width,
        }
    }

    pub fn lane_top(&self, lane: usize) -> f32 {
        lane as f32 * self.lane_height
    }

    /// Day count recovered from a rendered width.
    ///
    /// Only exact for strips that show a whole event. Drag payloads take their
    /// duration from the event's range instead, so a clipped strip still moves
    /// the full event. Rendering checks the round trip in debug builds.
    pub fn days_for_width(&self, width: f32) -> u32 {
        (width / self.cell_width).round().max(0.0) as u32
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_invariant() {
        assert!(Segment::new(0, 7).is_some());
        assert!(Segment::new(6, 1).is_some());
        assert!(Segment::new(4, 4).is_none());
        assert!(Segment::new(2, 0).is_none());
    }

    #[test]
    fn test_extent_pixels_for_reference_layout() {
        let metrics = LayoutMetrics::default();
        let extent = metrics.extent(Segment::new(1, 3).unwrap());
        assert_eq!(extent.left, 185.5);
        assert_eq!(extent.width, 556.5);
        assert_eq!(metrics.lane_top(2), 56.0);
    }

    #[test]
    fn test_touching_extents_do_not_intersect() {
        let a = Extent { left: 0.0, width: 10.0 };
        let b = Extent { left: 10.0, width: 5.0 };
        let c = Extent { left: 9.5, width: 5.0 };
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn test_days_for_width_inverts_extent() {
        let metrics = LayoutMetrics::default();
        for days in 1..=7 {
            let extent = metrics.extent(Segment::new(0, days).unwrap());
            assert_eq!(metrics.days_for_width(extent.width), days as u32);
        }
    }
}
