use egui::{Context, Id, Order, RichText, Sense};

/// Blocking error alert. While open, input to the rest of the window is
/// swallowed by a dimmed backdrop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDialog {
    message: String,
}

impl AlertDialog {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true once the user dismisses the alert.
    pub fn render(&self, ctx: &Context) -> bool {
        let screen = ctx.screen_rect();
        egui::Area::new(Id::new("alert_backdrop"))
            .order(Order::Middle)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                ui.allocate_rect(screen, Sense::click_and_drag());
                ui.painter().rect_filled(screen, 0.0, egui::Color32::from_black_alpha(96));
            });

        let mut dismissed = false;
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .order(Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(280.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new("⚠").size(24.0).color(egui::Color32::from_rgb(220, 150, 50)));
                    ui.label(&self.message);
                });
                ui.add_space(10.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape)) {
            dismissed = true;
        }
        dismissed
    }
}
