use egui::{Context, DragAndDrop, Id, Pos2, Rect, Vec2};

use crate::models::event::EventId;

/// Strip drag in flight. The JSON drag payload itself travels through
/// egui's drag-and-drop slot; this only tracks what is needed to draw it.
#[derive(Clone, Debug)]
pub struct StripDrag {
    pub event_id: EventId,
    pub title: String,
    /// Pointer position relative to the strip's top-left corner at grab time.
    pub grab_offset: Vec2,
    pub size: Vec2,
    pub hovered_cell: Option<usize>,
}

impl StripDrag {
    pub fn new(event_id: EventId, title: &str, strip_rect: Rect, pointer: Pos2) -> Self {
        Self {
            event_id,
            title: title.to_owned(),
            grab_offset: pointer - strip_rect.min,
            size: strip_rect.size(),
            hovered_cell: None,
        }
    }

    /// Where to draw the dragged strip for the given pointer position.
    pub fn ghost_rect(&self, pointer: Pos2) -> Rect {
        Rect::from_min_size(pointer - self.grab_offset, self.size)
    }
}

pub struct DragManager;

impl DragManager {
    fn storage_id() -> Id {
        Id::new("strip_calendar_drag_state")
    }

    pub fn begin(ctx: &Context, payload: String, drag: StripDrag) {
        log::debug!("Dragging event {}", drag.event_id);
        DragAndDrop::set_payload(ctx, payload);
        ctx.memory_mut(|mem| {
            mem.data.insert_temp(Self::storage_id(), drag);
        });
    }

    pub fn active(ctx: &Context) -> Option<StripDrag> {
        if !DragAndDrop::has_payload_of_type::<String>(ctx) {
            return None;
        }
        ctx.memory_mut(|mem| mem.data.get_temp::<StripDrag>(Self::storage_id()))
    }

    pub fn update_hover(ctx: &Context, cell: Option<usize>) {
        let id = Self::storage_id();
        ctx.memory_mut(|mem| {
            if let Some(mut state) = mem.data.get_temp::<StripDrag>(id) {
                state.hovered_cell = cell;
                mem.data.insert_temp(id, state);
            }
        });
    }

    /// End the drag, handing back the payload text and the drag state.
    pub fn finish(ctx: &Context) -> Option<(String, StripDrag)> {
        let payload = DragAndDrop::take_payload::<String>(ctx);
        let id = Self::storage_id();
        let drag = ctx.memory_mut(|mem| {
            let drag = mem.data.get_temp::<StripDrag>(id);
            mem.data.remove::<StripDrag>(id);
            drag
        });
        Some((payload?.as_ref().clone(), drag?))
    }

    pub fn cancel(ctx: &Context) {
        DragAndDrop::clear_payload(ctx);
        ctx.memory_mut(|mem| {
            mem.data.remove::<StripDrag>(Self::storage_id());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_ghost_keeps_grab_offset() {
        let strip = Rect::from_min_size(pos2(100.0, 40.0), vec2(185.5, 24.0));
        let drag = StripDrag::new(EventId(3), "A", strip, pos2(110.0, 50.0));

        let ghost = drag.ghost_rect(pos2(300.0, 200.0));
        assert_eq!(ghost.min, pos2(290.0, 190.0));
        assert_eq!(ghost.size(), strip.size());
        assert_eq!(drag.hovered_cell, None);
    }
}
