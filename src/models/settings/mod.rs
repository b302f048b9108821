// Settings module
// Layout constants and interaction policies for the calendar board

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Pixel width of one day cell in the reference layout.
pub const DEFAULT_CELL_WIDTH: f32 = 185.5;
/// Pixel height of one strip lane in the reference layout.
pub const DEFAULT_LANE_HEIGHT: f32 = 28.0;

/// What to do with a drop whose new range would not be fully visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffscreenMovePolicy {
    /// Send the relocation and draw whatever part stays visible.
    #[default]
    Allow,
    /// Refuse the drop before any request is sent.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cell_width: f32,
    pub lane_height: f32,
    /// 0 = Sunday, 1 = Monday, ... 6 = Saturday
    pub first_day_of_week: u8,
    pub visible_weeks: usize,
    pub offscreen_moves: OffscreenMovePolicy,
    /// SQLite file; the platform data directory is used when unset.
    pub database_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_width: DEFAULT_CELL_WIDTH,
            lane_height: DEFAULT_LANE_HEIGHT,
            first_day_of_week: 0, // Sunday
            visible_weeks: 6,
            offscreen_moves: OffscreenMovePolicy::Allow,
            database_path: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.cell_width.is_finite() && self.cell_width > 0.0) {
            return Err(format!("cell_width must be positive, got {}", self.cell_width));
        }
        if !(self.lane_height.is_finite() && self.lane_height > 0.0) {
            return Err(format!("lane_height must be positive, got {}", self.lane_height));
        }
        if self.first_day_of_week > 6 {
            return Err(format!(
                "first_day_of_week must be between 0 and 6, got {}",
                self.first_day_of_week
            ));
        }
        if !(1..=52).contains(&self.visible_weeks) {
            return Err(format!(
                "visible_weeks must be between 1 and 52, got {}",
                self.visible_weeks
            ));
        }
        Ok(())
    }
}
