mod app;
pub mod dialogs;
pub mod drag;
pub mod views;

pub use app::CalendarApp;
