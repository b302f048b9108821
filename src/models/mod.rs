// Module exports for models

pub mod drag;
pub mod event;
pub mod grid;
pub mod settings;
