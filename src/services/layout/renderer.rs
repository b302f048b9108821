//! Strip visuals owned per week row.
//!
//! A [`RowOverlay`] is the overlay area of one week row. It owns the
//! [`StripHandle`]s drawn in it, keyed by event id, so removing or redrawing an
//! event is an explicit operation on the overlay rather than a global lookup.

use crate::models::drag::DragPayload;
use crate::models::event::{EventId, EventRecord};

use super::lanes::{LaneAllocator, PlacedExtent};
use super::{Extent, LayoutError, LayoutMetrics, Segment};

/// A positioned strip for one event segment in one row.
#[derive(Debug, Clone, PartialEq)]
pub struct StripHandle {
    event_id: EventId,
    title: String,
    row: usize,
    segment: Segment,
    lane: usize,
    extent: Extent,
    top: f32,
    event_days: u32,
    drag_payload: Option<String>,
}

impl StripHandle {
    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn lane(&self) -> usize {
        self.lane
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn left(&self) -> f32 {
        self.extent.left
    }

    pub fn width(&self) -> f32 {
        self.extent.width
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    /// Serialized drag payload, present once the handle is bound.
    pub fn drag_payload(&self) -> Option<&str> {
        self.drag_payload.as_deref()
    }

    pub fn is_drag_bound(&self) -> bool {
        self.drag_payload.is_some()
    }

    /// Attach the drag-start payload. Returns `false` when the handle was
    /// already bound; a handle is only ever bound once.
    pub fn bind_drag(&mut self) -> bool {
        if self.drag_payload.is_some() {
            return false;
        }

        let payload = DragPayload {
            event_id: self.event_id,
            duration: self.event_days,
        };
        match payload.to_json() {
            Ok(json) => {
                self.drag_payload = Some(json);
                true
            }
            Err(err) => {
                log::error!("Failed to serialize drag payload for event {}: {}", self.event_id, err);
                false
            }
        }
    }

    pub(crate) fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }
}

/// Overlay area of a single week row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowOverlay {
    row: usize,
    strips: Vec<StripHandle>,
}

impl RowOverlay {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            strips: Vec::new(),
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Strips in insertion order.
    pub fn strips(&self) -> &[StripHandle] {
        &self.strips
    }

    pub fn strip(&self, event_id: EventId) -> Option<&StripHandle> {
        self.strips.iter().find(|strip| strip.event_id == event_id)
    }

    pub(crate) fn strip_mut(&mut self, event_id: EventId) -> Option<&mut StripHandle> {
        self.strips.iter_mut().find(|strip| strip.event_id == event_id)
    }

    pub fn contains(&self, event_id: EventId) -> bool {
        self.strip(event_id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }

    /// Add a handle. An event may have at most one strip per row.
    pub fn insert(&mut self, handle: StripHandle) -> Result<&mut StripHandle, LayoutError> {
        if self.contains(handle.event_id) {
            return Err(LayoutError::DuplicateStrip {
                event_id: handle.event_id,
                row: self.row,
            });
        }
        self.strips.push(handle);
        let last = self.strips.len() - 1;
        Ok(&mut self.strips[last])
    }

    pub fn remove(&mut self, event_id: EventId) -> Option<StripHandle> {
        let position = self.strips.iter().position(|strip| strip.event_id == event_id)?;
        Some(self.strips.remove(position))
    }

    pub fn placed_extents(&self) -> impl Iterator<Item = PlacedExtent> + '_ {
        self.strips.iter().map(|strip| PlacedExtent {
            lane: strip.lane,
            extent: strip.extent,
        })
    }

    /// Lanes in use: one past the highest occupied lane.
    pub fn lane_count(&self) -> usize {
        self.strips.iter().map(|strip| strip.lane + 1).max().unwrap_or(0)
    }

    /// Pixel height of the overlay area.
    pub fn height(&self, metrics: &LayoutMetrics) -> f32 {
        metrics.lane_top(self.lane_count())
    }
}

/// Creates positioned strips inside row overlays.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StripRenderer {
    metrics: LayoutMetrics,
}

impl StripRenderer {
    pub fn new(metrics: LayoutMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Insert a strip for `record` in an explicit lane and bind its drag
    /// payload. The caller removes any earlier strip for the same event first.
    pub fn render<'a>(
        &self,
        overlay: &'a mut RowOverlay,
        record: &EventRecord,
        segment: Segment,
        lane: usize,
    ) -> Result<&'a StripHandle, LayoutError> {
        let handle = StripHandle {
            event_id: record.id,
            title: record.title.clone(),
            row: overlay.row(),
            segment,
            lane,
            extent: self.metrics.extent(segment),
            top: self.metrics.lane_top(lane),
            event_days: record.range.duration_days().max(1) as u32,
            drag_payload: None,
        };
        debug_assert!(
            segment.day_count as u32 != handle.event_days
                || self.metrics.days_for_width(handle.extent.width) == handle.event_days,
            "unclipped strip width does not give back the event's duration"
        );

        let inserted = overlay.insert(handle)?;
        inserted.bind_drag();
        Ok(inserted)
    }

    /// Pick a lane against the overlay's current strips, then render.
    pub fn place<'a>(
        &self,
        overlay: &'a mut RowOverlay,
        record: &EventRecord,
        segment: Segment,
    ) -> Result<&'a StripHandle, LayoutError> {
        if overlay.contains(record.id) {
            return Err(LayoutError::DuplicateStrip {
                event_id: record.id,
                row: overlay.row(),
            });
        }

        let extent = self.metrics.extent(segment);
        let lane = LaneAllocator::assign_lane(extent, overlay.placed_extents());
        log::debug!(
            "Placing event {} in row {} at offset {} for {} day(s), lane {}",
            record.id,
            overlay.row(),
            segment.day_offset,
            segment.day_count,
            lane
        );
        self.render(overlay, record, segment, lane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::DateRange;
    use chrono::NaiveDate;

    fn record(id: i64, title: &str, start: (u32, u32), end: (u32, u32)) -> EventRecord {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, start.0, start.1).unwrap(),
            NaiveDate::from_ymd_opt(2024, end.0, end.1).unwrap(),
        )
        .unwrap();
        EventRecord::new(EventId(id), title, range).unwrap()
    }

    #[test]
    fn test_render_positions_strip() {
        let renderer = StripRenderer::default();
        let mut overlay = RowOverlay::new(3);
        let event = record(1, "A", (1, 2), (1, 4));
        let strip = renderer
            .render(&mut overlay, &event, Segment::new(1, 3).unwrap(), 2)
            .unwrap();

        assert_eq!(strip.row(), 3);
        assert_eq!(strip.left(), 185.5);
        assert_eq!(strip.width(), 556.5);
        assert_eq!(strip.top(), 56.0);
        assert_eq!(strip.title(), "A");
        assert!(strip.is_drag_bound());
    }

    #[test]
    fn test_drag_payload_carries_id_and_duration() {
        let renderer = StripRenderer::default();
        let mut overlay = RowOverlay::new(0);
        let event = record(9, "A", (1, 2), (1, 4));
        let strip = renderer.place(&mut overlay, &event, Segment::new(1, 3).unwrap()).unwrap();

        let payload = DragPayload::parse(strip.drag_payload().unwrap()).unwrap();
        assert_eq!(payload.event_id, EventId(9));
        assert_eq!(payload.duration, 3);
        assert_eq!(renderer.metrics().days_for_width(strip.width()), 3);
    }

    #[test]
    fn test_clipped_strip_payload_keeps_full_duration() {
        let renderer = StripRenderer::default();
        let mut overlay = RowOverlay::new(0);
        let event = record(4, "Trip", (1, 5), (1, 12));
        let strip = renderer.place(&mut overlay, &event, Segment::new(4, 3).unwrap()).unwrap();

        let payload = DragPayload::parse(strip.drag_payload().unwrap()).unwrap();
        assert_eq!(payload.duration, 8);
    }

    #[test]
    fn test_bind_drag_is_idempotent() {
        let renderer = StripRenderer::default();
        let mut overlay = RowOverlay::new(0);
        let event = record(1, "A", (1, 2), (1, 2));
        renderer.place(&mut overlay, &event, Segment::new(1, 1).unwrap()).unwrap();

        let strip = overlay.strip_mut(EventId(1)).unwrap();
        let before = strip.drag_payload().map(str::to_string);
        assert!(!strip.bind_drag());
        assert_eq!(strip.drag_payload().map(str::to_string), before);
    }

    #[test]
    fn test_duplicate_strip_in_row_is_rejected() {
        let renderer = StripRenderer::default();
        let mut overlay = RowOverlay::new(5);
        let event = record(1, "A", (1, 2), (1, 2));
        renderer.place(&mut overlay, &event, Segment::new(1, 1).unwrap()).unwrap();

        let err = renderer
            .place(&mut overlay, &event, Segment::new(2, 1).unwrap())
            .unwrap_err();
        assert_eq!(err, LayoutError::DuplicateStrip { event_id: EventId(1), row: 5 });
        assert_eq!(overlay.strips().len(), 1);
    }

    #[test]
    fn test_place_stacks_overlapping_strips_and_reports_height() {
        let renderer = StripRenderer::default();
        let mut overlay = RowOverlay::new(0);
        let a = record(1, "A", (1, 2), (1, 4));
        let b = record(2, "B", (1, 3), (1, 5));
        let c = record(3, "C", (1, 6), (1, 7));

        assert_eq!(renderer.place(&mut overlay, &a, Segment::new(1, 3).unwrap()).unwrap().lane(), 0);
        assert_eq!(renderer.place(&mut overlay, &b, Segment::new(2, 3).unwrap()).unwrap().lane(), 1);
        assert_eq!(renderer.place(&mut overlay, &c, Segment::new(5, 2).unwrap()).unwrap().lane(), 0);
        assert_eq!(overlay.lane_count(), 2);
        assert_eq!(overlay.height(renderer.metrics()), 56.0);
    }

    #[test]
    fn test_remove_frees_the_lane() {
        let renderer = StripRenderer::default();
        let mut overlay = RowOverlay::new(0);
        let a = record(1, "A", (1, 2), (1, 4));
        let b = record(2, "B", (1, 3), (1, 5));
        renderer.place(&mut overlay, &a, Segment::new(1, 3).unwrap()).unwrap();
        renderer.place(&mut overlay, &b, Segment::new(2, 3).unwrap()).unwrap();

        assert!(overlay.remove(EventId(1)).is_some());
        assert!(overlay.remove(EventId(1)).is_none());
        let again = record(3, "C", (1, 1), (1, 2));
        assert_eq!(renderer.place(&mut overlay, &again, Segment::new(0, 2).unwrap()).unwrap().lane(), 0);
    }
}
