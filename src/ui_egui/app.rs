mod actions;
mod navigation;

use chrono::{Local, NaiveDate};

use crate::models::grid::CalendarGrid;
use crate::models::settings::Settings;
use crate::services::board::CalendarBoard;
use crate::services::persistence::{EventStore, PersistenceWorker};
use crate::ui_egui::dialogs::{AlertDialog, ConfirmDialogState, ConfirmResult, TitlePrompt};
use crate::ui_egui::views::BoardView;
use crate::utils::date::get_week_start;

pub struct CalendarApp {
    settings: Settings,
    board: CalendarBoard,
    worker: PersistenceWorker,
    /// Start of the first visible week row
    first_week: NaiveDate,
    title_prompt: Option<TitlePrompt>,
    confirm_dialog: ConfirmDialogState,
    alert: Option<AlertDialog>,
}

impl eframe::App for CalendarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker();

        egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
            self.render_navigation(ui);
        });

        let modal_open = self.is_modal_open();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| {
                egui::ScrollArea::both().show(ui, |ui| {
                    let today = Local::now().date_naive();
                    let actions = BoardView::show(ui, &mut self.board, today);
                    for action in actions {
                        self.handle_board_action(action);
                    }
                });
            });
        });

        self.render_dialogs(ctx);
    }
}

impl CalendarApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        store: impl EventStore + 'static,
    ) -> anyhow::Result<Self> {
        let ctx = cc.egui_ctx.clone();
        let worker = PersistenceWorker::new(store)?.with_notifier(move || ctx.request_repaint());
        Ok(Self::with_worker(settings, worker, Local::now().date_naive()))
    }

    fn with_worker(settings: Settings, worker: PersistenceWorker, today: NaiveDate) -> Self {
        let first_week = get_week_start(today, settings.first_day_of_week);
        let board = build_board(first_week, &settings);
        let mut app = Self {
            settings,
            board,
            worker,
            first_week,
            title_prompt: None,
            confirm_dialog: ConfirmDialogState::new(),
            alert: None,
        };
        app.request_load();
        app
    }

    fn is_modal_open(&self) -> bool {
        self.alert.is_some() || self.title_prompt.is_some() || self.confirm_dialog.is_open()
    }

    fn render_dialogs(&mut self, ctx: &egui::Context) {
        // The alert blocks everything else until dismissed
        if let Some(alert) = &self.alert {
            if alert.render(ctx) {
                self.alert = None;
            }
            return;
        }

        if let Some(prompt) = &mut self.title_prompt {
            let purpose = prompt.purpose();
            let result = prompt.render(ctx);
            self.finish_title_prompt(purpose, result);
        }

        if self.confirm_dialog.render(ctx) == ConfirmResult::Confirmed {
            if let Some(action) = self.confirm_dialog.take_action() {
                self.execute_confirmed_action(action);
            }
        }
    }
}

fn build_board(first_week: NaiveDate, settings: &Settings) -> CalendarBoard {
    let grid = CalendarGrid::contiguous(first_week, settings.visible_weeks);
    CalendarBoard::from_settings(grid, settings)
}
