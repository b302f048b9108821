//! Greedy lane stacking for strips that share a week row.

use super::Extent;

/// A strip already placed in a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedExtent {
    pub lane: usize,
    pub extent: Extent,
}

pub struct LaneAllocator;

impl LaneAllocator {
    /// Lowest lane whose strips do not intersect `new`.
    ///
    /// Lanes are tried from 0 upward in arrival order, so the result is
    /// deterministic for a given set of existing strips but not a global
    /// minimum over every insertion order.
    ///
    /// # Examples
    /// ```
    /// use strip_calendar::services::layout::{Extent, LaneAllocator, PlacedExtent};
    ///
    /// let existing = [PlacedExtent { lane: 0, extent: Extent { left: 0.0, width: 20.0 } }];
    /// let lane = LaneAllocator::assign_lane(Extent { left: 10.0, width: 5.0 }, existing);
    /// assert_eq!(lane, 1);
    /// ```
    pub fn assign_lane<I>(new: Extent, existing: I) -> usize
    where
        I: IntoIterator<Item = PlacedExtent>,
    {
        let placed: Vec<PlacedExtent> = existing.into_iter().collect();
        // n strips can block at most n lanes.
        (0..=placed.len())
            .find(|&lane| {
                !placed
                    .iter()
                    .any(|strip| strip.lane == lane && strip.extent.intersects(&new))
            })
            .unwrap_or(placed.len())
    }
}
