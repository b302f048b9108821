use super::{build_board, CalendarApp};
use crate::utils::date::{add_days, get_week_start};
use chrono::{Local, NaiveDate};

impl CalendarApp {
    pub(super) fn render_navigation(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("◀").on_hover_text("Previous weeks").clicked() {
                self.navigate_previous();
            }
            if ui.button("Today").clicked() {
                self.jump_to_today();
            }
            if ui.button("▶").on_hover_text("Next weeks").clicked() {
                self.navigate_next();
            }
            ui.separator();
            ui.heading(self.title());
            if self.worker.in_flight() > 0 {
                ui.spinner();
            }
        });
    }

    pub(super) fn title(&self) -> String {
        match self.board.grid().visible_range() {
            Some(range) => format!(
                "{} to {}",
                range.start().format("%b %-d, %Y"),
                range.end().format("%b %-d, %Y")
            ),
            None => String::new(),
        }
    }

    pub(super) fn navigate_previous(&mut self) {
        let days = -(self.block_days());
        self.show_weeks_from(add_days(self.first_week, days));
    }

    pub(super) fn navigate_next(&mut self) {
        let days = self.block_days();
        self.show_weeks_from(add_days(self.first_week, days));
    }

    pub(super) fn jump_to_today(&mut self) {
        let today = Local::now().date_naive();
        self.show_weeks_from(get_week_start(today, self.settings.first_day_of_week));
    }

    fn block_days(&self) -> i64 {
        self.settings.visible_weeks as i64 * 7
    }

    /// Rebuild the board from a new first week and fetch its events.
    pub(super) fn show_weeks_from(&mut self, first_week: NaiveDate) {
        if first_week == self.first_week {
            return;
        }
        self.first_week = first_week;
        self.board = build_board(first_week, &self.settings);
        self.title_prompt = None;
        self.request_load();
    }

    pub(super) fn request_load(&mut self) {
        match self.board.load_request() {
            Some(request) => {
                let id = self.worker.submit(request);
                log::debug!("Requested events for {} (request {})", self.first_week, id);
            }
            None => log::warn!("Board shows no days, nothing to load"),
        }
    }
}
