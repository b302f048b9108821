use super::CalendarApp;
use crate::services::board::BoardError;
use crate::services::persistence::Completion;
use crate::ui_egui::dialogs::{AlertDialog, ConfirmAction, PromptPurpose, PromptResult, TitlePrompt};
use crate::ui_egui::views::BoardViewAction;

impl CalendarApp {
    /// Apply every store completion that has arrived since the last frame.
    pub(super) fn poll_worker(&mut self) {
        for completion in self.worker.drain() {
            self.apply_completion(completion);
        }
    }

    pub(super) fn apply_completion(&mut self, completion: Completion) {
        let Completion { id, request, result } = completion;
        if let Err(err) = self.board.apply(&request, result) {
            log::error!("Request {} could not be applied: {}", id, err);
            self.report(err);
        }
    }

    pub(super) fn handle_board_action(&mut self, action: BoardViewAction) {
        match action {
            BoardViewAction::SelectionFinished(range) => {
                self.title_prompt = Some(TitlePrompt::create(range));
            }
            BoardViewAction::Dropped { payload, cell } => match self.board.drop_on_cell(&payload, cell) {
                Ok(Some(request)) => {
                    self.worker.submit(request);
                }
                Ok(None) => {}
                Err(err) => self.report(err),
            },
            BoardViewAction::Rename(event_id) => {
                let title = self
                    .board
                    .record(event_id)
                    .map(|record| record.title.clone())
                    .unwrap_or_default();
                self.title_prompt = Some(TitlePrompt::rename(event_id, &title));
            }
            BoardViewAction::Delete(event_id) => {
                let event_title = self
                    .board
                    .record(event_id)
                    .map(|record| record.title.clone())
                    .unwrap_or_else(|| format!("Event {}", event_id));
                self.confirm_dialog
                    .request(ConfirmAction::DeleteEvent { event_id, event_title });
            }
        }
    }

    pub(super) fn finish_title_prompt(&mut self, purpose: PromptPurpose, result: PromptResult) {
        let title = match &result {
            PromptResult::Pending => return,
            PromptResult::Submitted(text) => Some(text.as_str()),
            PromptResult::Cancelled => None,
        };
        self.title_prompt = None;

        match purpose {
            PromptPurpose::Create(range) => {
                if let Some(request) = self.board.submit_title(range, title) {
                    self.worker.submit(request);
                }
            }
            PromptPurpose::Rename(event_id) => {
                if let Some(request) = self.board.request_rename(event_id, title) {
                    self.worker.submit(request);
                }
            }
        }
    }

    pub(super) fn execute_confirmed_action(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::DeleteEvent { event_id, event_title } => {
                log::info!("Deleting \"{}\" ({})", event_title, event_id);
                let request = self.board.request_delete(event_id);
                self.worker.submit(request);
            }
        }
    }

    fn report(&mut self, err: BoardError) {
        if err.is_user_visible() {
            self.alert = Some(AlertDialog::new(err.to_string()));
        }
    }
}
