//! Moving an existing event by dropping one of its strips on a day cell.

use chrono::NaiveDate;

use crate::models::drag::DragPayload;
use crate::models::event::DateRange;
use crate::models::grid::WeekRow;
use crate::models::settings::OffscreenMovePolicy;
use crate::services::layout::RowSegmenter;
use crate::services::persistence::MoveRequest;

use super::BoardError;

pub struct DragMoveController;

impl DragMoveController {
    /// Relocation that puts the dragged event's first day on `target`,
    /// keeping its duration.
    pub fn plan(payload: &DragPayload, target: NaiveDate) -> Result<MoveRequest, BoardError> {
        let range = DateRange::from_duration(target, payload.duration)
            .map_err(BoardError::MalformedDragPayload)?;
        Ok(MoveRequest {
            event_id: payload.event_id,
            range,
        })
    }

    /// Apply the clipped-move policy before anything is sent.
    pub fn check_policy(
        request: &MoveRequest,
        rows: &[WeekRow],
        policy: OffscreenMovePolicy,
    ) -> Result<(), BoardError> {
        if policy == OffscreenMovePolicy::Allow {
            return Ok(());
        }
        let visible = RowSegmenter::visible_days(&request.range, rows) as i64;
        if visible < request.range.duration_days() {
            return Err(BoardError::MoveOutsideGrid {
                range: request.range,
            });
        }
        Ok(())
    }
}
