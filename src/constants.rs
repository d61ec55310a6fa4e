//! Centralized constants for the snap tool
//!
//! Shared colors and sweep limits, so the settings defaults and the
//! preview stay consistent.

/// Default preview colors, sRGBA
pub mod preview_colors {
    /// Wire box around the current selection (magenta)
    pub const BOUNDS: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    /// Wire box at the snap destination (yellow)
    pub const DESTINATION: [f32; 4] = [1.0, 0.92, 0.016, 1.0];
    /// Direction arrow
    pub const ARROW: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    /// Outline drawn around selected objects
    pub const SELECTION: [f32; 4] = [1.0, 0.6, 0.1, 1.0];
}

/// Sweep limits
pub mod sweep {
    /// How far the box sweep looks ahead by default
    pub const DEFAULT_MAX_DISTANCE: f32 = 1000.0;
    /// Hits collected per sweep, not counting starting overlaps
    pub const DEFAULT_MAX_HITS: u32 = 64;
}

/// Picking
pub mod picking {
    /// Maximum click-selection ray length
    pub const MAX_PICK_DISTANCE: f32 = 100.0;
}
