use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{preview_colors, sweep};

/// Snap tool preferences that persist to disk
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SnapSettings {
    /// Whether new snap windows start with the preview on
    #[serde(default = "default_preview_by_default")]
    pub preview_by_default: bool,
    /// Furthest the sweep looks for an obstruction
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
    /// Upper bound on hits collected per sweep.
    ///
    /// Colliders the selection already overlaps are not counted. If more
    /// obstructions than this lie along the path, the nearest may be missed.
    #[serde(default = "default_max_hits")]
    pub max_hits: u32,
    /// Close the snap window when the selection changes (otherwise the preview follows it)
    #[serde(default = "default_close_on_selection_change")]
    pub close_on_selection_change: bool,
    /// Wire box around the selection, sRGBA
    #[serde(default = "default_bounds_color")]
    pub bounds_color: [f32; 4],
    /// Wire box at the snap destination, sRGBA
    #[serde(default = "default_destination_color")]
    pub destination_color: [f32; 4],
    /// Direction arrow, sRGBA
    #[serde(default = "default_arrow_color")]
    pub arrow_color: [f32; 4],
    /// Preview gizmo line width in pixels
    #[serde(default = "default_line_width")]
    pub line_width: f32,
}

fn default_preview_by_default() -> bool {
    true
}

fn default_max_distance() -> f32 {
    sweep::DEFAULT_MAX_DISTANCE
}

fn default_max_hits() -> u32 {
    sweep::DEFAULT_MAX_HITS
}

fn default_close_on_selection_change() -> bool {
    true
}

fn default_bounds_color() -> [f32; 4] {
    preview_colors::BOUNDS
}

fn default_destination_color() -> [f32; 4] {
    preview_colors::DESTINATION
}

fn default_arrow_color() -> [f32; 4] {
    preview_colors::ARROW
}

fn default_line_width() -> f32 {
    2.0
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            preview_by_default: default_preview_by_default(),
            max_distance: default_max_distance(),
            max_hits: default_max_hits(),
            close_on_selection_change: default_close_on_selection_change(),
            bounds_color: default_bounds_color(),
            destination_color: default_destination_color(),
            arrow_color: default_arrow_color(),
            line_width: default_line_width(),
        }
    }
}

impl SnapSettings {
    /// Get the settings file path
    fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("bevy_collision_snap");
            p.push("snap.ron");
            p
        })
    }

    /// Parse settings, falling back to defaults for missing fields
    pub fn from_ron(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(content)
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(content) => Self::from_ron(&content).unwrap_or_else(|e| {
                warn!("Ignoring malformed snap settings at {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk
    pub fn save(&self) {
        let Some(path) = Self::file_path() else {
            error!("Could not determine config directory");
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {}", e);
                return;
            }
        }

        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(content) => {
                if let Err(e) = fs::write(&path, content) {
                    error!("Failed to save snap settings: {}", e);
                } else {
                    debug!("Snap settings saved to: {:?}", path);
                }
            }
            Err(e) => {
                error!("Failed to serialize snap settings: {}", e);
            }
        }
    }

    pub fn bounds_color(&self) -> Color {
        to_color(self.bounds_color)
    }

    pub fn destination_color(&self) -> Color {
        to_color(self.destination_color)
    }

    pub fn arrow_color(&self) -> Color {
        to_color(self.arrow_color)
    }
}

fn to_color([r, g, b, a]: [f32; 4]) -> Color {
    Color::srgba(r, g, b, a)
}
