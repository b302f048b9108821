// Strip Calendar Application
// Main entry point

use anyhow::Context;
use strip_calendar::services::persistence::SqliteEventStore;
use strip_calendar::services::settings::SettingsService;
use strip_calendar::ui_egui::CalendarApp;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Strip Calendar");

    let settings_service = SettingsService::from_default_location()?;
    let settings = match settings_service.get_or_create() {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("{:#}; falling back to defaults", err);
            Default::default()
        }
    };

    let db_path = SettingsService::database_path(&settings);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
    }
    log::info!("Using database at {}", db_path.display());
    let store = SqliteEventStore::open(&db_path.to_string_lossy())?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Strip Calendar"),
        ..Default::default()
    };

    eframe::run_native(
        "Strip Calendar",
        options,
        Box::new(move |cc| {
            let app = CalendarApp::new(cc, settings, store)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("Failed to run the calendar window: {}", err))
}
