//! Single-line title prompt used for new events and renames.

use egui::{Context, Key};

use crate::models::event::{DateRange, EventId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPurpose {
    Create(DateRange),
    Rename(EventId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// Raw text as typed; validation happens on the board.
    Submitted(String),
    Cancelled,
    Pending,
}

#[derive(Debug, Clone)]
pub struct TitlePrompt {
    purpose: PromptPurpose,
    text: String,
    focus_requested: bool,
}

impl TitlePrompt {
    pub fn create(range: DateRange) -> Self {
        Self {
            purpose: PromptPurpose::Create(range),
            text: String::new(),
            focus_requested: false,
        }
    }

    pub fn rename(event_id: EventId, current_title: &str) -> Self {
        Self {
            purpose: PromptPurpose::Rename(event_id),
            text: current_title.to_owned(),
            focus_requested: false,
        }
    }

    pub fn purpose(&self) -> PromptPurpose {
        self.purpose
    }

    pub fn heading(&self) -> String {
        match self.purpose {
            PromptPurpose::Create(range) if range.start() == range.end() => {
                format!("New event on {}", range.start().format("%a %b %-d"))
            }
            PromptPurpose::Create(range) => format!(
                "New event, {} to {}",
                range.start().format("%a %b %-d"),
                range.end().format("%a %b %-d")
            ),
            PromptPurpose::Rename(_) => "Rename event".to_string(),
        }
    }

    pub fn render(&mut self, ctx: &Context) -> PromptResult {
        let mut result = PromptResult::Pending;

        egui::Window::new(self.heading())
            .id(egui::Id::new("title_prompt"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(300.0);
                ui.label("Event title:");

                let edit = ui.text_edit_singleline(&mut self.text);
                if !self.focus_requested {
                    edit.request_focus();
                    self.focus_requested = true;
                }
                if edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                    result = PromptResult::Submitted(self.text.clone());
                }

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("OK").clicked() {
                            result = PromptResult::Submitted(self.text.clone());
                        }
                        if ui.button("Cancel").clicked() {
                            result = PromptResult::Cancelled;
                        }
                    });
                });
            });

        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            result = PromptResult::Cancelled;
        }

        result
    }
}
