//! The calendar board: week grid, strip overlays and the interaction flow.
//!
//! The board turns pointer and drop gestures into store requests and applies
//! their results when they come back. It owns all render-derived state: the
//! selection highlight, one [`RowOverlay`] per week row and the records of the
//! events it has drawn. Nothing here talks to storage; requests and their
//! completions are passed in and out explicitly, so a request may still be in
//! flight while the next gesture is handled.

use std::collections::BTreeMap;
use std::fmt;

use crate::models::event::{validate_title, DateRange, EventId, EventRecord};
use crate::models::grid::CalendarGrid;
use crate::models::settings::{OffscreenMovePolicy, Settings};
use crate::services::layout::{
    LayoutError, LayoutMetrics, RowOverlay, RowSegment, RowSegmenter, StripHandle, StripRenderer,
};
use crate::services::persistence::{
    CreateRequest, DeleteRequest, LoadRequest, MoveRequest, PersistenceError, RenameRequest,
    StoreRequest, StoreResponse,
};

pub mod drag_move;
pub mod selection;

pub use crate::models::drag::DragPayload;
pub use drag_move::DragMoveController;
pub use selection::{SelectionController, SelectionState};

/// Store operation a failure belongs to, used in user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    Save,
    Move,
    Rename,
    Delete,
    Load,
}

impl fmt::Display for BoardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            BoardAction::Save => "save",
            BoardAction::Move => "move",
            BoardAction::Rename => "rename",
            BoardAction::Delete => "delete",
            BoardAction::Load => "load",
        };
        f.write_str(verb)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("Failed to {action} event: {source}")]
    Persistence {
        action: BoardAction,
        #[source]
        source: PersistenceError,
    },

    /// Drop data that is not a strip payload. Never shown to the user.
    #[error("malformed drag payload: {0}")]
    MalformedDragPayload(String),

    #[error("Cannot move the event to {range}: part of it would fall outside the visible weeks")]
    MoveOutsideGrid { range: DateRange },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("{0}")]
    Validation(String),
}

impl BoardError {
    /// Whether the failure should be put in front of the user.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, BoardError::MalformedDragPayload(_))
    }

    fn persistence(action: BoardAction, source: PersistenceError) -> Self {
        BoardError::Persistence { action, source }
    }
}

pub struct CalendarBoard {
    grid: CalendarGrid,
    overlays: Vec<RowOverlay>,
    renderer: StripRenderer,
    selection: SelectionController,
    events: BTreeMap<EventId, EventRecord>,
    offscreen_moves: OffscreenMovePolicy,
}

impl CalendarBoard {
    pub fn new(grid: CalendarGrid, metrics: LayoutMetrics, offscreen_moves: OffscreenMovePolicy) -> Self {
        let overlays = (0..grid.rows().len()).map(RowOverlay::new).collect();
        Self {
            grid,
            overlays,
            renderer: StripRenderer::new(metrics),
            selection: SelectionController::new(),
            events: BTreeMap::new(),
            offscreen_moves,
        }
    }

    pub fn from_settings(grid: CalendarGrid, settings: &Settings) -> Self {
        Self::new(grid, LayoutMetrics::from_settings(settings), settings.offscreen_moves)
    }

    pub fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        self.renderer.metrics()
    }

    pub fn overlays(&self) -> &[RowOverlay] {
        &self.overlays
    }

    pub fn overlay(&self, row: usize) -> Option<&RowOverlay> {
        self.overlays.get(row)
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn record(&self, event_id: EventId) -> Option<&EventRecord> {
        self.events.get(&event_id)
    }

    pub fn records(&self) -> impl Iterator<Item = &EventRecord> {
        self.events.values()
    }

    /// Every strip currently drawn for an event, in row order.
    pub fn strips_for(&self, event_id: EventId) -> Vec<&StripHandle> {
        self.overlays
            .iter()
            .filter_map(|overlay| overlay.strip(event_id))
            .collect()
    }

    /// Request for the events the grid shows, if it shows any days.
    pub fn load_request(&self) -> Option<LoadRequest> {
        self.grid.visible_range().map(|range| LoadRequest { range })
    }

    /// Draw already-stored events, in the given order.
    pub fn load_events(&mut self, records: Vec<EventRecord>) -> usize {
        let mut drawn = 0;
        for record in records {
            let event_id = record.id;
            match self.render_event(record) {
                Ok(_) => drawn += 1,
                Err(err) => log::warn!("Skipping event {} while loading: {}", event_id, err),
            }
        }
        log::info!("Loaded {} event(s) onto the board", drawn);
        drawn
    }

    /// (Re)draw an event across every row it touches. Strips drawn earlier for
    /// the same event are removed first so each row holds at most one.
    pub fn render_event(&mut self, record: EventRecord) -> Result<Vec<RowSegment>, BoardError> {
        self.remove_event_visuals(record.id);

        let segments = RowSegmenter::segment(&record.range, self.grid.rows());
        for placed in &segments {
            let Some(overlay) = self.overlays.get_mut(placed.row) else {
                continue;
            };
            self.renderer.place(overlay, &record, placed.segment)?;
        }

        log::debug!(
            "Rendered event {} ({}) in {} row(s)",
            record.id,
            record.range,
            segments.len()
        );
        self.events.insert(record.id, record);
        Ok(segments)
    }

    /// Remove every strip of an event. Returns how many were removed.
    pub fn remove_event_visuals(&mut self, event_id: EventId) -> usize {
        self.overlays
            .iter_mut()
            .filter_map(|overlay| overlay.remove(event_id))
            .count()
    }

    // ---- drag-to-create -------------------------------------------------

    pub fn pointer_down(&mut self, cell: usize, on_strip: bool) -> bool {
        self.selection.pointer_down(&self.grid, cell, on_strip)
    }

    pub fn pointer_enter(&mut self, cell: usize) -> bool {
        self.selection.pointer_enter(&self.grid, cell)
    }

    /// Finish a drag-select. `Some(range)` means a title should be asked for.
    pub fn pointer_up(&mut self) -> Option<DateRange> {
        let range = self.selection.pointer_up(&self.grid)?;
        log::debug!("Selected {} for a new event", range);
        Some(range)
    }

    /// Turn the title answer into a create request. A cancelled or blank
    /// title clears the selection and produces nothing.
    pub fn submit_title(&mut self, range: DateRange, title: Option<&str>) -> Option<CreateRequest> {
        let title = match title.map(validate_title) {
            Some(Ok(title)) => title,
            _ => {
                log::debug!("Event creation cancelled for {}", range);
                self.selection.release(&self.grid, range);
                return None;
            }
        };
        Some(CreateRequest { title, range })
    }

    pub fn complete_create(
        &mut self,
        request: &CreateRequest,
        result: Result<EventId, PersistenceError>,
    ) -> Result<EventRecord, BoardError> {
        // A newer drag-select may be under way; only this request's highlight goes
        self.selection.release(&self.grid, request.range);
        let event_id = result.map_err(|err| BoardError::persistence(BoardAction::Save, err))?;

        let record = EventRecord::new(event_id, request.title.clone(), request.range)
            .map_err(BoardError::Validation)?;
        self.render_event(record.clone())?;
        log::info!("Created event {} \"{}\" ({})", event_id, record.title, record.range);
        Ok(record)
    }

    // ---- drag-to-move ---------------------------------------------------

    /// Handle a strip dropped on a cell. Malformed drop data is ignored;
    /// `Ok(None)` means there is nothing to send.
    pub fn drop_on_cell(&mut self, payload: &str, cell: usize) -> Result<Option<MoveRequest>, BoardError> {
        let Some(target) = self.grid.cell(cell) else {
            log::warn!("Ignoring drop on unknown cell {}", cell);
            return Ok(None);
        };
        let payload = match DragPayload::parse(payload) {
            Ok(payload) => payload,
            Err(err) => {
                log::warn!("Ignoring drop on {}: {}", target.date, err);
                return Ok(None);
            }
        };

        let request = DragMoveController::plan(&payload, target.date)?;
        if let Err(err) = DragMoveController::check_policy(&request, self.grid.rows(), self.offscreen_moves) {
            log::warn!("Rejected move of event {}: {}", request.event_id, err);
            return Err(err);
        }
        Ok(Some(request))
    }

    /// Apply a relocation result. Visuals change only after success.
    pub fn complete_move(
        &mut self,
        request: &MoveRequest,
        result: Result<(), PersistenceError>,
    ) -> Result<Vec<RowSegment>, BoardError> {
        result.map_err(|err| BoardError::persistence(BoardAction::Move, err))?;

        let title = match self.events.get(&request.event_id) {
            Some(record) => record.title.clone(),
            None => {
                log::warn!("Moved event {} was not on the board", request.event_id);
                format!("Event {}", request.event_id)
            }
        };
        let record = EventRecord::new(request.event_id, title, request.range)
            .map_err(BoardError::Validation)?;
        let segments = self.render_event(record)?;
        log::info!("Moved event {} to {}", request.event_id, request.range);
        Ok(segments)
    }

    // ---- rename / delete ------------------------------------------------

    pub fn request_rename(&self, event_id: EventId, title: Option<&str>) -> Option<RenameRequest> {
        let title = validate_title(title?).ok()?;
        Some(RenameRequest { event_id, title })
    }

    pub fn complete_rename(
        &mut self,
        request: &RenameRequest,
        result: Result<(), PersistenceError>,
    ) -> Result<(), BoardError> {
        result.map_err(|err| BoardError::persistence(BoardAction::Rename, err))?;

        if let Some(record) = self.events.get_mut(&request.event_id) {
            record.title = request.title.clone();
        }
        for overlay in &mut self.overlays {
            if let Some(strip) = overlay.strip_mut(request.event_id) {
                strip.set_title(&request.title);
            }
        }
        log::info!("Renamed event {} to \"{}\"", request.event_id, request.title);
        Ok(())
    }

    pub fn request_delete(&self, event_id: EventId) -> DeleteRequest {
        DeleteRequest { event_id }
    }

    pub fn complete_delete(
        &mut self,
        request: &DeleteRequest,
        result: Result<(), PersistenceError>,
    ) -> Result<(), BoardError> {
        result.map_err(|err| BoardError::persistence(BoardAction::Delete, err))?;

        let removed = self.remove_event_visuals(request.event_id);
        self.events.remove(&request.event_id);
        log::info!("Deleted event {} ({} strip(s) removed)", request.event_id, removed);
        Ok(())
    }

    /// Route a store completion to the matching `complete_*` step.
    pub fn apply(
        &mut self,
        request: &StoreRequest,
        result: Result<StoreResponse, PersistenceError>,
    ) -> Result<(), BoardError> {
        match request {
            StoreRequest::Create(create) => {
                let result = result.and_then(|response| match response {
                    StoreResponse::Created(event_id) => Ok(event_id),
                    other => Err(unexpected(other)),
                });
                self.complete_create(create, result).map(|_| ())
            }
            StoreRequest::Move(relocate) => {
                let result = result.and_then(|response| expect_response(response, StoreResponse::Moved));
                self.complete_move(relocate, result).map(|_| ())
            }
            StoreRequest::Rename(rename) => {
                let result = result.and_then(|response| expect_response(response, StoreResponse::Renamed));
                self.complete_rename(rename, result)
            }
            StoreRequest::Delete(delete) => {
                let result = result.and_then(|response| expect_response(response, StoreResponse::Deleted));
                self.complete_delete(delete, result)
            }
            StoreRequest::Load(load) => {
                let records = match result {
                    Ok(StoreResponse::Loaded(records)) => records,
                    Ok(other) => return Err(BoardError::persistence(BoardAction::Load, unexpected(other))),
                    Err(err) => return Err(BoardError::persistence(BoardAction::Load, err)),
                };
                if self.grid.visible_range() != Some(load.range) {
                    log::debug!("Discarding events loaded for {}: grid has moved on", load.range);
                    return Ok(());
                }
                self.load_events(records);
                Ok(())
            }
        }
    }
}

fn expect_response(response: StoreResponse, wanted: StoreResponse) -> Result<(), PersistenceError> {
    if response == wanted {
        Ok(())
    } else {
        Err(unexpected(response))
    }
}

fn unexpected(response: StoreResponse) -> PersistenceError {
    PersistenceError::Unavailable(format!("unexpected response {:?}", response))
}
