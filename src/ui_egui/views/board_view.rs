use chrono::{Datelike, NaiveDate, Weekday};
use egui::{vec2, Align2, CursorIcon, FontId, Id, LayerId, Order, Painter, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2};

use super::palette::BoardPalette;
use crate::models::event::{DateRange, EventId};
use crate::models::grid::DAYS_PER_WEEK;
use crate::services::board::CalendarBoard;
use crate::services::layout::StripHandle;
use crate::ui_egui::drag::{DragManager, StripDrag};

pub const WEEKDAY_BAR_HEIGHT: f32 = 22.0;
pub const DAY_LABEL_HEIGHT: f32 = 20.0;
const MIN_LANES: usize = 3;
const ROW_PADDING: f32 = 4.0;
const STRIP_INSET: f32 = 2.0;

/// What the user asked for this frame; the app turns these into requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardViewAction {
    SelectionFinished(DateRange),
    Dropped { payload: String, cell: usize },
    Rename(EventId),
    Delete(EventId),
}

/// Screen placement of the week rows. Rows grow with their lane count.
#[derive(Debug, Clone)]
pub struct GridGeometry {
    origin: Pos2,
    cell_width: f32,
    lane_height: f32,
    row_tops: Vec<f32>,
    row_heights: Vec<f32>,
}

impl GridGeometry {
    pub fn measure(board: &CalendarBoard) -> Self {
        let metrics = board.metrics();
        let min_lanes = metrics.lane_height * MIN_LANES as f32;

        let mut row_tops = Vec::with_capacity(board.grid().rows().len());
        let mut row_heights = Vec::with_capacity(board.grid().rows().len());
        let mut top = WEEKDAY_BAR_HEIGHT;
        for row in 0..board.grid().rows().len() {
            let lanes = board.overlay(row).map(|overlay| overlay.height(metrics)).unwrap_or(0.0);
            let height = DAY_LABEL_HEIGHT + lanes.max(min_lanes) + ROW_PADDING;
            row_tops.push(top);
            row_heights.push(height);
            top += height;
        }

        Self {
            origin: Pos2::ZERO,
            cell_width: metrics.cell_width,
            lane_height: metrics.lane_height,
            row_tops,
            row_heights,
        }
    }

    pub fn at(mut self, origin: Pos2) -> Self {
        self.origin = origin;
        self
    }

    pub fn size(&self) -> Vec2 {
        let height = match (self.row_tops.last(), self.row_heights.last()) {
            (Some(top), Some(height)) => top + height,
            _ => WEEKDAY_BAR_HEIGHT,
        };
        vec2(self.cell_width * DAYS_PER_WEEK as f32, height)
    }

    pub fn row_height(&self, row: usize) -> Option<f32> {
        self.row_heights.get(row).copied()
    }

    pub fn cell_rect(&self, index: usize) -> Option<Rect> {
        let row = index / DAYS_PER_WEEK;
        let column = index % DAYS_PER_WEEK;
        let top = *self.row_tops.get(row)?;
        let height = self.row_heights[row];
        Some(Rect::from_min_size(
            self.origin + vec2(column as f32 * self.cell_width, top),
            vec2(self.cell_width, height),
        ))
    }

    pub fn cell_at(&self, pos: Pos2) -> Option<usize> {
        let rel = pos - self.origin;
        if rel.x < 0.0 || rel.x >= self.cell_width * DAYS_PER_WEEK as f32 {
            return None;
        }
        let column = ((rel.x / self.cell_width) as usize).min(DAYS_PER_WEEK - 1);
        let row = self
            .row_tops
            .iter()
            .zip(&self.row_heights)
            .position(|(top, height)| rel.y >= *top && rel.y < top + height)?;
        Some(row * DAYS_PER_WEEK + column)
    }

    pub fn strip_rect(&self, handle: &StripHandle) -> Option<Rect> {
        let row_top = *self.row_tops.get(handle.row())?;
        let min = self.origin + vec2(handle.left(), row_top + DAY_LABEL_HEIGHT + handle.top());
        Some(Rect::from_min_size(min, vec2(handle.width(), self.lane_height)).shrink(STRIP_INSET))
    }
}

struct StripView {
    event_id: EventId,
    row: usize,
    title: String,
    rect: Rect,
    payload: Option<String>,
}

pub struct BoardView;

impl BoardView {
    pub fn show(ui: &mut Ui, board: &mut CalendarBoard, today: NaiveDate) -> Vec<BoardViewAction> {
        let mut actions = Vec::new();

        let geometry = GridGeometry::measure(board);
        let (rect, response) = ui.allocate_exact_size(geometry.size(), Sense::click_and_drag());
        let geometry = geometry.at(rect.min);
        let palette = BoardPalette::from_visuals(ui.visuals());
        let painter = ui.painter_at(rect);

        paint_weekday_bar(&painter, board, &geometry, &palette);
        paint_cells(&painter, board, &geometry, &palette, today);

        let strips: Vec<StripView> = board
            .overlays()
            .iter()
            .flat_map(|overlay| overlay.strips())
            .filter_map(|handle| {
                Some(StripView {
                    event_id: handle.event_id(),
                    row: handle.row(),
                    title: handle.title().to_owned(),
                    rect: geometry.strip_rect(handle)?,
                    payload: handle.drag_payload().map(str::to_owned),
                })
            })
            .collect();

        for strip in &strips {
            show_strip(ui, strip, &palette, &mut actions);
        }

        handle_selection(ui, &response, board, &geometry, &strips, &mut actions);
        handle_strip_drag(ui, &painter, &geometry, &palette, &mut actions);

        actions
    }
}

fn paint_weekday_bar(painter: &Painter, board: &CalendarBoard, geometry: &GridGeometry, palette: &BoardPalette) {
    let Some(first_row) = board.grid().row(0) else {
        return;
    };
    for (column, date) in first_row.dates().enumerate() {
        let center = geometry.origin
            + vec2((column as f32 + 0.5) * geometry.cell_width, WEEKDAY_BAR_HEIGHT / 2.0);
        painter.text(
            center,
            Align2::CENTER_CENTER,
            date.format("%a").to_string(),
            FontId::proportional(12.0),
            palette.muted_text,
        );
    }
}

fn paint_cells(
    painter: &Painter,
    board: &CalendarBoard,
    geometry: &GridGeometry,
    palette: &BoardPalette,
    today: NaiveDate,
) {
    for cell in board.grid().cells() {
        let Some(rect) = geometry.cell_rect(cell.index) else {
            continue;
        };

        let fill = if cell.date == today {
            palette.today_bg
        } else if matches!(cell.date.weekday(), Weekday::Sat | Weekday::Sun) {
            palette.weekend_bg
        } else {
            palette.cell_bg
        };
        painter.rect_filled(rect, 0.0, fill);
        if board.selection().is_highlighted(cell.index) {
            painter.rect_filled(rect, 0.0, palette.selection_bg);
        }
        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, palette.border));

        // Month name on the 1st so month boundaries are visible
        let label = if cell.date.day() == 1 {
            cell.date.format("%b %-d").to_string()
        } else {
            cell.date.day().to_string()
        };
        painter.text(
            rect.min + vec2(6.0, 4.0),
            Align2::LEFT_TOP,
            label,
            FontId::proportional(12.0),
            palette.text,
        );
    }
}

fn show_strip(ui: &mut Ui, strip: &StripView, palette: &BoardPalette, actions: &mut Vec<BoardViewAction>) {
    ui.painter().rect_filled(strip.rect, 4.0, palette.strip_bg);
    ui.painter_at(strip.rect).text(
        strip.rect.left_center() + vec2(6.0, 0.0),
        Align2::LEFT_CENTER,
        &strip.title,
        FontId::proportional(13.0),
        palette.strip_text,
    );

    let id = ui.id().with(("strip", strip.event_id.0, strip.row));
    let response = ui
        .interact(strip.rect, id, Sense::click_and_drag())
        .on_hover_text(&strip.title);

    if response.drag_started() {
        match (&strip.payload, response.interact_pointer_pos()) {
            (Some(payload), Some(pointer)) => DragManager::begin(
                ui.ctx(),
                payload.clone(),
                StripDrag::new(strip.event_id, &strip.title, strip.rect, pointer),
            ),
            (None, _) => log::warn!("Strip for event {} has no drag binding", strip.event_id),
            _ => {}
        }
    }

    response.context_menu(|ui| {
        if ui.button("Rename...").clicked() {
            actions.push(BoardViewAction::Rename(strip.event_id));
            ui.close_menu();
        }
        if ui.button("Delete").clicked() {
            actions.push(BoardViewAction::Delete(strip.event_id));
            ui.close_menu();
        }
    });
}

fn handle_selection(
    ui: &Ui,
    response: &Response,
    board: &mut CalendarBoard,
    geometry: &GridGeometry,
    strips: &[StripView],
    actions: &mut Vec<BoardViewAction>,
) {
    let on_strip = |pos: Pos2| strips.iter().any(|strip| strip.rect.contains(pos));

    if response.clicked() {
        // A click is a one-day selection
        if let Some(pos) = response.interact_pointer_pos() {
            if let Some(cell) = geometry.cell_at(pos) {
                board.pointer_down(cell, on_strip(pos));
                if let Some(range) = board.pointer_up() {
                    actions.push(BoardViewAction::SelectionFinished(range));
                }
            }
        }
        return;
    }

    if response.drag_started() {
        if let Some(pos) = ui.input(|i| i.pointer.press_origin()) {
            if let Some(cell) = geometry.cell_at(pos) {
                board.pointer_down(cell, on_strip(pos));
            }
        }
    }

    if response.dragged() {
        if let Some(cell) = response.interact_pointer_pos().and_then(|pos| geometry.cell_at(pos)) {
            board.pointer_enter(cell);
        }
    }

    if response.drag_stopped() {
        if let Some(range) = board.pointer_up() {
            actions.push(BoardViewAction::SelectionFinished(range));
        }
    }
}

fn handle_strip_drag(
    ui: &Ui,
    painter: &Painter,
    geometry: &GridGeometry,
    palette: &BoardPalette,
    actions: &mut Vec<BoardViewAction>,
) {
    let ctx = ui.ctx();
    let Some(drag) = DragManager::active(ctx) else {
        return;
    };

    let pointer = ctx.input(|i| i.pointer.latest_pos());
    let hovered = pointer.and_then(|pos| geometry.cell_at(pos));
    if hovered != drag.hovered_cell {
        DragManager::update_hover(ctx, hovered);
    }

    if let Some(rect) = hovered.and_then(|cell| geometry.cell_rect(cell)) {
        painter.rect_stroke(rect.shrink(1.0), 2.0, Stroke::new(2.0, palette.drop_target));
    }
    if let Some(pos) = pointer {
        let ghost = drag.ghost_rect(pos);
        let layer = ctx.layer_painter(LayerId::new(Order::Tooltip, Id::new("strip_drag_ghost")));
        layer.rect_filled(ghost, 4.0, palette.ghost_bg);
        layer.with_clip_rect(ghost).text(
            ghost.left_center() + vec2(6.0, 0.0),
            Align2::LEFT_CENTER,
            &drag.title,
            FontId::proportional(13.0),
            palette.strip_text,
        );
    }
    ctx.set_cursor_icon(CursorIcon::Grabbing);

    if ctx.input(|i| i.pointer.any_released()) {
        let Some((payload, drag)) = DragManager::finish(ctx) else {
            return;
        };
        match hovered {
            Some(cell) => actions.push(BoardViewAction::Dropped { payload, cell }),
            None => log::debug!("Event {} dropped outside the grid", drag.event_id),
        }
    } else if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        DragManager::cancel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventRecord;
    use crate::models::grid::CalendarGrid;
    use crate::models::settings::OffscreenMovePolicy;
    use crate::services::layout::LayoutMetrics;
    use egui::pos2;

    fn board() -> CalendarBoard {
        let first = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        CalendarBoard::new(
            CalendarGrid::contiguous(first, 2),
            LayoutMetrics::new(100.0, 20.0),
            OffscreenMovePolicy::Allow,
        )
    }

    fn empty_row_height() -> f32 {
        DAY_LABEL_HEIGHT + 20.0 * MIN_LANES as f32 + ROW_PADDING
    }

    #[test]
    fn test_cell_at_maps_columns_and_rows() {
        let geometry = GridGeometry::measure(&board()).at(pos2(10.0, 10.0));
        let first_row_y = 10.0 + WEEKDAY_BAR_HEIGHT + 1.0;
        let second_row_y = first_row_y + empty_row_height();

        assert_eq!(geometry.cell_at(pos2(10.0, first_row_y)), Some(0));
        assert_eq!(geometry.cell_at(pos2(10.0 + 250.0, first_row_y)), Some(2));
        assert_eq!(geometry.cell_at(pos2(10.0 + 699.0, second_row_y)), Some(13));
    }

    #[test]
    fn test_cell_at_outside_grid() {
        let geometry = GridGeometry::measure(&board());
        assert_eq!(geometry.cell_at(pos2(-1.0, 30.0)), None);
        assert_eq!(geometry.cell_at(pos2(700.0, 30.0)), None);
        // Weekday bar is not a cell
        assert_eq!(geometry.cell_at(pos2(50.0, 5.0)), None);
        assert_eq!(geometry.cell_at(pos2(50.0, geometry.size().y + 1.0)), None);
    }

    #[test]
    fn test_rows_grow_with_lanes() {
        let mut board = board();
        let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        for id in 1..=5 {
            let range = DateRange::from_duration(start, 2).unwrap();
            board
                .render_event(EventRecord::new(EventId(id), format!("E{}", id), range).unwrap())
                .unwrap();
        }

        let geometry = GridGeometry::measure(&board);
        assert_eq!(geometry.row_height(0), Some(DAY_LABEL_HEIGHT + 5.0 * 20.0 + ROW_PADDING));
        assert_eq!(geometry.row_height(1), Some(empty_row_height()));
    }

    #[test]
    fn test_strip_rect_sits_in_its_lane() {
        let mut board = board();
        let start = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
        let range = DateRange::from_duration(start, 3).unwrap();
        board
            .render_event(EventRecord::new(EventId(1), "A".to_string(), range).unwrap())
            .unwrap();
        board
            .render_event(EventRecord::new(EventId(2), "B".to_string(), range).unwrap())
            .unwrap();

        let geometry = GridGeometry::measure(&board);
        let strip = board.overlay(0).and_then(|overlay| overlay.strip(EventId(2))).unwrap();
        let rect = geometry.strip_rect(strip).unwrap();

        assert_eq!(rect.min.x, 200.0 + STRIP_INSET);
        assert_eq!(rect.min.y, WEEKDAY_BAR_HEIGHT + DAY_LABEL_HEIGHT + 20.0 + STRIP_INSET);
        assert_eq!(rect.width(), 300.0 - 2.0 * STRIP_INSET);
    }
}
