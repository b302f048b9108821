// Settings service module
// Loads and saves board settings as TOML in the platform config directory

mod service;

pub use service::{default_database_path, SettingsService};
